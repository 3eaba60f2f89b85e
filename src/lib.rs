//! Backend for the dashboard's AI assistant.
//!
//! Receives typed requests, picks a prompt template by kind, forwards the
//! rendered prompts to a chat-completion gateway, and returns the raw reply.

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
