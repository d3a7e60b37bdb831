//! Core types for the augments API-context system
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - **Configuration**: layered TOML/environment configuration
//! - **Framework catalog**: known frameworks, their npm packages, aliases and API patterns
//! - **Models**: data shared between the fetch layer and the orchestrator
//! - **Error handling**: unified error type
//!

pub mod config;
pub mod error;
pub mod frameworks;
pub mod models;

// Re-export main types for convenience
pub use config::{Config, ContextConfig, FetchConfig, ParserConfig, SearchConfig};
pub use error::{Error, Result};
pub use frameworks::{FrameworkCatalog, FrameworkInfo};
pub use models::CodeExample;

