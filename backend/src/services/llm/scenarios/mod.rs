//! LLM Scenarios
//!
//! Prompt construction, kept free of I/O.

pub mod cold_opener;
pub mod language;
