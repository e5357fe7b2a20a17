//! Parses TOML from stdin and prints the JSON-tagged form, for conformance
//! harnesses.

use std::io;
use std::process;

fn main() {
    env_logger::init();
    match tomlite::parse_reader(io::stdin().lock()) {
        Ok(doc) => println!("{}", tomlite::json::to_tagged_json(&doc)),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
