//! Generative-text integration for semantic extraction.
//!
//! Talks to Ollama, OpenAI-compatible APIs or Cloudflare Workers AI.

mod client;

pub use client::{
    semantic_prompt, ChatMessage, GenerationRequest, GenerationResponse, LlmClient, LlmConfig,
    LlmProvider, TextGenerator, SEMANTIC_SYSTEM_PROMPT,
};
