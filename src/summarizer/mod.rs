//! Summarization capability
//!
//! The pipeline only depends on the [`Summarizer`] trait. [`OpenAiSummarizer`]
//! talks to any OpenAI-compatible chat-completions endpoint.

pub mod client;
pub mod errors;
pub mod prompts;

pub use client::{CompletionRequest, DEFAULT_OPENAI_BASE_URL, OpenAiSummarizer, Summarizer};
pub use errors::SummaryError;
pub use prompts::{
    KNOWLEDGE_DISCLAIMER, build_corpus, knowledge_request, summary_request, with_disclaimer,
};
