//! Builds a document tree programmatically and prints it as TOML.

use tomlite::{Array, Datetime, Table, TableArray};

fn main() {
    let mut server = Table::new();
    server.insert("host", "127.0.0.1");
    server.insert("port", 8080);
    server.insert("ratio", 0.25);
    server.insert(
        "started",
        Datetime {
            year: 2024,
            month: 6,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            microsecond: 0,
            offset_hour: 0,
            offset_minute: 0,
        },
    );
    server.insert("tags", ["fast", "local"].into_iter().collect::<Array>());

    let mut jobs = TableArray::new();
    for name in ["ingest", "compact"] {
        let mut job = Table::new();
        job.insert("name", name);
        job.insert("enabled", true);
        jobs.push(job);
    }

    let mut root = Table::new();
    root.insert("title", "generated");
    root.insert("server", server);
    root.insert("jobs", jobs);

    print!("{}", tomlite::ser::to_string(&root));

    for (key, value) in root.iter() {
        eprintln!("{key}: {}", value.kind());
    }
}
