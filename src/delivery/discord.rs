//! Discord-backed delivery gateway
//!
//! Conversation ids are Discord channel ids in decimal form, which is what
//! the command handlers record at mutation time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;

use super::{DeliveryChannel, DeliveryError, DeliveryGateway};

/// Provider id stored in user records created through Discord commands.
pub const DISCORD_PROVIDER_ID: &str = "discord";

/// Gateway backed by a serenity HTTP client.
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        DiscordGateway { http }
    }
}

#[async_trait]
impl DeliveryGateway for DiscordGateway {
    async fn resolve_channel(&self, provider_id: &str) -> Option<Arc<dyn DeliveryChannel>> {
        if provider_id != DISCORD_PROVIDER_ID {
            return None;
        }
        Some(Arc::new(DiscordChannel {
            http: Arc::clone(&self.http),
        }))
    }
}

struct DiscordChannel {
    http: Arc<Http>,
}

#[async_trait]
impl DeliveryChannel for DiscordChannel {
    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<(), DeliveryError> {
        let id: u64 = conversation_id
            .parse()
            .map_err(|_| DeliveryError::InvalidConversation(conversation_id.to_string()))?;

        ChannelId(id).say(&self.http, text).await?;
        Ok(())
    }
}
