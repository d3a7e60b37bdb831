//! API context orchestration
//!
//! [`ApiContextService`] ties the query parser, the fetch collaborators and the
//! declaration parser together:
//!
//! - [`ApiContextService::get_api_context`] answers "what is the signature of X"
//! - [`ApiContextService::search_apis`] ranks declarations across frameworks
//!
//! Neither operation returns an error; failures become notes or omitted
//! frameworks in the response.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod search;
mod service;
mod types;

pub use service::ApiContextService;
pub use types::{
    ApiContextRequest, ApiContextResponse, ApiSearchResult, SearchApisRequest, SearchApisResponse,
};
