//! harvest library
//!
//! Compiles free-form boolean search queries into per-collector query
//! documents, and decodes the CSV result tables those collectors append to.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod params;
pub mod query;
pub mod table;

pub use compiler::{compile, CompileOptions, CompiledQuery};
pub use config::Config;
pub use dialect::{CollectorQuerySpec, Dialect, Emitter};
pub use params::ParamsFormat;
pub use query::TermBuckets;
pub use table::{DecodeError, Flush, ResultRecord, ResultStream, StatusReport};
