//! Pipeline module.
//!
//! This module provides the main cleaning pipeline and its builder.

mod builder;

pub use builder::{CleaningOutcome, Pipeline, PipelineBuilder};
