//! LLM Service Module
//!
//! Turns a prospect description into cold email openers.
//!
//! # Architecture
//! ```text
//! role / company type / context
//!          │
//!          ▼
//! ┌──────────────────┐    ┌────────────────┐
//! │ detect_language  │───▶│  build_prompt  │
//! └──────────────────┘    └───────┬────────┘
//!                                 ▼
//!                     ┌────────────────────────┐
//!                     │   CompletionClient     │  ← Trait
//!                     │  (OpenAIClient impl)   │
//!                     └───────────┬────────────┘
//!                                 ▼
//!                          parse_openers
//! ```

mod client;
mod models;
mod parser;
mod scenarios;

pub use client::{CompletionClient, OpenAIClient};
pub use models::*;
pub use parser::parse_openers;
pub use scenarios::cold_opener::{OPENER_COUNT, SYSTEM_PROMPT, build_prompt};
pub use scenarios::language::{DetectedLanguage, detect_language};
