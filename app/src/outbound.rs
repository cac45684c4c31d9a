pub mod discord_webhook;
