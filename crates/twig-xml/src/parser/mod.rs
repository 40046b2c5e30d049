//! Tree construction from the token stream.

/// XML builder implementation.
pub mod core;

pub use self::core::{XmlParser, parse_file, parse_reader, parse_str};
