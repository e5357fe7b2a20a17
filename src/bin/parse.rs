//! Parses a TOML file and prints the tree back as TOML.

use std::{env, process};

fn main() {
    env_logger::init();
    let mut args = env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: parse <file>");
        process::exit(2);
    };
    match tomlite::parse_file(&path) {
        Ok(doc) => print!("{}", tomlite::ser::to_string(&doc)),
        Err(err) => {
            eprintln!("{path}: {err}");
            process::exit(1);
        }
    }
}
