//! Merges an override TOML file onto a base file and prints the result.

use std::{env, process};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: toml_conf <base> <override>");
        process::exit(2);
    }
    match tomlite::parse_base_and_override(&args[1], &args[2], true) {
        Ok(doc) => print!("{}", tomlite::ser::to_string(&doc)),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
