//! Natural-language query parsing
//!
//! Turns a short developer query such as `"react useEffect cleanup"` into a
//! [`ParsedQuery`]: the framework and npm package it targets, the API concept
//! being asked about, an optional version and a confidence score.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod parser;
mod tokenize;
mod version;

pub use parser::{MatchKind, ParsedQuery, QueryParser};
pub use version::extract_version;
