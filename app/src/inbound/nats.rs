use std::sync::Arc;

use anyhow::{Context, Result};
use async_nats::{
    ConnectOptions,
    jetstream::{self, consumer::DeliverPolicy, stream},
};
use log::info;
use rustls::{ClientConfig, RootCertStore, crypto::ring};

use crate::config::{app_config::CertificateProvider, nats_config::NatsConfig};

pub struct NatsConsumer {
    nats_config: NatsConfig,
}

impl NatsConsumer {
    pub fn new(nats_config: NatsConfig) -> Self {
        NatsConsumer { nats_config }
    }

    fn client_configuration(certificate_provider: &impl CertificateProvider) -> Result<ClientConfig> {
        let mut store = RootCertStore::empty();
        let ca = certificate_provider.root_ca()?;
        let cert = certificate_provider.certificate()?;
        let private_key = certificate_provider.private_key()?;
        store.add(ca).context("Unable to trust the root CA")?;
        ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .context("Unable to select TLS protocol versions")?
            .with_root_certificates(store)
            .with_client_auth_cert(vec![cert], private_key)
            .context("Unable to build client configuration!")
    }

    pub async fn connect(&self) -> Result<async_nats::Client> {
        let client_config = &self.nats_config.client;
        let mut options = ConnectOptions::new().name("motion-alarm");
        if let Some(cert) = &client_config.cert {
            options = options
                .tls_client_config(Self::client_configuration(cert)?)
                .require_tls(true);
        }
        if let Some(creds_path) = &client_config.creds_path {
            options = options
                .credentials_file(creds_path)
                .await
                .with_context(|| format!("Cannot read credentials file {}", creds_path))?;
        }

        let address = client_config.address();
        info!("Connecting to {address}");
        async_nats::connect_with_options(address, options)
            .await
            .context("Cannot connect to nats server")
    }

    pub async fn create_consumer(
        &self, context: &jetstream::Context,
    ) -> Result<jetstream::consumer::Consumer<jetstream::consumer::pull::Config>> {
        context
            .get_or_create_stream(self.stream_config())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create stream: {}", e))?
            .get_or_create_consumer(&self.nats_config.consumer.durable_name, self.consumer_config())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create consumer: {}", e))
    }

    fn stream_config(&self) -> jetstream::stream::Config {
        jetstream::stream::Config {
            name: self.nats_config.consumer.stream_name.to_string(),
            subjects: vec![self.nats_config.consumer.topic.to_string()],
            retention: stream::RetentionPolicy::Limits,
            ..Default::default()
        }
    }

    fn consumer_config(&self) -> jetstream::consumer::pull::Config {
        jetstream::consumer::pull::Config {
            durable_name: Some(self.nats_config.consumer.durable_name.to_string()),
            filter_subject: self.nats_config.consumer.topic.to_string(),
            deliver_policy: DeliverPolicy::New,
            ..Default::default()
        }
    }
}
