//! Prompt construction for summaries and model-only answers

use crate::config::SearchConfig;
use crate::pipeline::ScrapedItem;
use crate::utils::preview;

use super::client::CompletionRequest;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant that creates concise, \
informative summaries of web search results. Provide a comprehensive summary that covers the key \
points from all the search results. Focus on the most important and relevant information.";

pub const KNOWLEDGE_SYSTEM_PROMPT: &str = "You are a helpful assistant. The user asked a question \
but web search is currently unavailable. Provide a comprehensive answer based on your training \
data. Be clear that this information is based on your knowledge cutoff and may not include the \
very latest developments.";

/// Prefix marking an answer that is not grounded in retrieved pages
pub const KNOWLEDGE_DISCLAIMER: &str = "**Note: Web search is currently unavailable, so this \
response is based on AI knowledge only and may not include the very latest information.**";

const SEPARATOR_WIDTH: usize = 80;

/// Aggregate scraped items into the text block handed to the model
#[must_use]
pub fn build_corpus(query: &str, items: &[ScrapedItem], content_chars: usize) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut corpus = format!("Search Query: {query}\n\nSearch Results:\n");
    for (index, item) in items.iter().enumerate() {
        corpus.push_str(&format!(
            "\n{}. {}\nURL: {}\nSnippet: {}\nContent: {}...\n",
            index + 1,
            item.title,
            item.url,
            item.snippet,
            preview(&item.content, content_chars),
        ));
        corpus.push_str(&separator);
        corpus.push('\n');
    }
    corpus
}

/// Request summarizing a run's scraped items
#[must_use]
pub fn summary_request(query: &str, items: &[ScrapedItem], config: &SearchConfig) -> CompletionRequest {
    let corpus = build_corpus(query, items, config.corpus_content_chars());
    CompletionRequest {
        system: SUMMARY_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Please provide a comprehensive summary of these search results for the query '{query}':\n\n{corpus}"
        ),
        max_tokens: config.summary_max_tokens(),
        temperature: config.summary_temperature(),
    }
}

/// Request answering from the model alone
#[must_use]
pub fn knowledge_request(query: &str, config: &SearchConfig) -> CompletionRequest {
    CompletionRequest {
        system: KNOWLEDGE_SYSTEM_PROMPT.to_string(),
        user: format!("Please provide a comprehensive answer about: {query}"),
        max_tokens: config.summary_max_tokens(),
        temperature: config.summary_temperature(),
    }
}

/// Disclaimer, blank line, then the model text
#[must_use]
pub fn with_disclaimer(answer: &str) -> String {
    format!("{KNOWLEDGE_DISCLAIMER}\n\n{answer}")
}
