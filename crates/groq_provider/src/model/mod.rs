//! Model client module for chat inference
//!
//! This module provides:
//! - `client`: Groq chat client over the OpenAI-compatible API

mod client;

pub use client::{ChatGroq, ChatGroqConfig, ChatResponse, TokenUsage};
