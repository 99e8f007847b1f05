//! HTTP handlers for chat-service.

pub mod chat;
pub mod health;

pub use chat::{chat, method_not_allowed, preflight};
pub use health::health_check;
