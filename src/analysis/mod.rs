//! Issue analysis: data model, prompt construction, and the model-backed
//! classifier.

pub mod analyzer;
pub mod models;
pub mod prompt;
