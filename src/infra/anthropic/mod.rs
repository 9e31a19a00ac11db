//! Anthropic Messages endpoint integration.

pub mod client;
pub mod error;

pub use client::{
    AnthropicClient, AnthropicConfig, DEFAULT_API_BASE, Message, MessagesRequest, Role,
};
pub use error::{AnthropicError, Result};
