#![forbid(unsafe_code)]
#![deny(
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]

mod value;
pub use value::{FromValue, Value, ValueKind};
pub mod table;
pub use table::Table;
pub mod array;
pub use array::Array;
pub mod table_array;
pub use table_array::TableArray;
mod datetime;
pub use datetime::Datetime;
mod parse;
pub use parse::{parse, parse_file, parse_reader};
pub mod json;
pub mod ser;
mod merge;
pub use merge::{merge_into, parse_base_and_override};
mod error;
pub use error::{Error, ErrorKind, IoError, MergeError, ParseError};
