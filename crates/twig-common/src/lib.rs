//! Common utilities for the twig XML crates.
//!
//! This crate provides shared infrastructure used by the tree and the parser:
//! - **Warning System** - deduplicated, highlighted stderr output for input the
//!   library accepts but that is probably not what the author meant

pub mod warning;
