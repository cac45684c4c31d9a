mod config;
mod inbound;
mod outbound;
mod utils;

use anyhow::Result;
use async_nats::jetstream;
use config::app_config::AppConfig;
use futures::TryStreamExt;
use inbound::{
    model::event::EventDecoder,
    motion_handler::{MotionHandler, ack_kind},
    nats::NatsConsumer,
};
use internal::service::alarm_service::AlarmService;
use log::{debug, error, info};
use outbound::discord_webhook::DiscordWebhook;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let conf = AppConfig::from_env().inspect_err(|e| error!("Invalid configuration: {e:#}"))?;

    let notifier = DiscordWebhook::new(conf.webhook_url())?;
    let alarm_service = AlarmService::new(conf.alarm_config()?, notifier);
    let handler = MotionHandler::new(EventDecoder::new(conf.envelope()), alarm_service);

    let nats = NatsConsumer::new(conf.nats.clone());
    let client = nats.connect().await?;
    let context = jetstream::new(client);
    let consumer = nats.create_consumer(&context).await?;
    info!("Listening for motion events on {}", conf.nats.consumer.topic);

    loop {
        let mut messages = consumer.messages().await?;
        while let Some(input) = messages.try_next().await? {
            info!(
                "Received message: {} -> {}",
                input.subject,
                String::from_utf8_lossy(&input.payload)
            );
            let result = handler.handle(&input.payload).await;
            input.ack_with(ack_kind(&result)).await.map_err(|e| anyhow::anyhow!(e))?;

            let outcome = result.inspect_err(|e| error!("{e}"))?;
            debug!("Message processed: {:?}", outcome);
        }
    }
}
