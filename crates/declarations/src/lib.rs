//! TypeScript declaration parsing
//!
//! Parses `.d.ts` text with tree-sitter into [`TypeDefinition`]s (functions,
//! interfaces, type aliases, classes, enums and constants) with their JSDoc,
//! then answers two questions over the result:
//!
//! - [`DeclarationParser::extract_api_signature`]: the signature of one API,
//!   with overloads and the types it references
//! - [`DeclarationParser::search_apis`]: declarations matching a query, ranked

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod cache;
mod classify;
mod jsdoc;
mod parser;
mod search;
mod signature;
mod syntax;
pub mod types;

pub use parser::{DeclarationParser, DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_RESULTS};
pub use search::score;
pub use types::{
    ApiSignature, CacheStats, DefinitionKind, Member, MemberKind, Parameter, ParseResult,
    RelatedType, SearchHit, SourceLocation, TypeDefinition,
};
