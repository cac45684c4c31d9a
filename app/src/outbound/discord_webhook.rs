use anyhow::{Context, Result};
use internal::{domain::error::NotificationError, port::notifier::NotifierDrivenPort};
use log::{error, info};
use reqwest::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts the alarm text to a Discord channel webhook.
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: Option<String>,
}

impl DiscordWebhook {
    pub fn new(url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Unable to build the webhook http client")?;
        Ok(DiscordWebhook { client, url })
    }
}

impl NotifierDrivenPort for DiscordWebhook {
    async fn notify(&self, text: &str) -> Result<(), NotificationError> {
        let Some(url) = self.url.as_deref() else {
            error!("Discord webhook URL is not set.");
            return Err(NotificationError::ConfigurationMissing("discord webhook url"));
        };

        let response = self
            .client
            .post(url)
            .json(&WebhookPayload { content: text })
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send motion alarm to Discord: {e}");
                NotificationError::NotificationTransport(e.to_string())
            })?;

        // Discord answers 204 when the message is accepted without `?wait=true`.
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!("Motion alarm sent to Discord.");
            Ok(())
        } else {
            error!("Failed to send motion alarm to Discord. Status code: {}", status.as_u16());
            Err(NotificationError::NotificationFailure(status.as_u16()))
        }
    }
}
