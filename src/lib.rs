//! Entity recognition and intent resolution for medical knowledge-graph QA.
//!
//! [`nlp::Extractor`] turns a free-text question into the recognised entities
//! per category plus an ordered list of query intents.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;

pub use error::{NluError, Result};
pub use nlp::{ExtractionResult, Extractor, ExtractorContext};
