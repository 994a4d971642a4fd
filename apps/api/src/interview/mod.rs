// Interview engine: profile analysis, question generation, the session state
// machine, scoring and the summary. All completion calls go through the
// `Completion` trait in llm_client.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod questions;
pub mod session;
pub mod summary;
