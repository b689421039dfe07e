//! # Delivery Gateway
//!
//! Transport seam between the reminder engine and the outside world. The
//! engine only ever resolves a provider id to a channel and sends text;
//! failures here are logged by the caller, never fatal.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod discord;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use discord::{DiscordGateway, DISCORD_PROVIDER_ID};

/// Errors from an outbound delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("no delivery channel registered for provider `{0}`")]
    UnknownProvider(String),

    #[error("invalid conversation id `{0}`")]
    InvalidConversation(String),

    #[error("message send failed: {0}")]
    Send(#[from] serenity::Error),
}

/// Resolves provider ids to concrete delivery channels.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Look up the channel for a stored provider id. `None` means the
    /// provider is unknown to this deployment.
    async fn resolve_channel(&self, provider_id: &str) -> Option<Arc<dyn DeliveryChannel>>;
}

/// A resolved transport able to push a text message to a conversation.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<(), DeliveryError>;
}
