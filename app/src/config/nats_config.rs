use serde::Deserialize;

use super::app_config::CertConfig;

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct NatsConfig {
    pub client: ClientConfig,
    pub consumer: ConsumerConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Subject the motion sensors publish on.
    pub topic: String,
    pub stream_name: String,
    pub durable_name: String,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        ConsumerConfig {
            topic: String::from("motion"),
            stream_name: String::from("MOTION"),
            durable_name: String::from("motion-alarm"),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Mutual TLS material, plain TCP when absent.
    pub cert: Option<CertConfig>,
    pub creds_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: String::from("localhost"),
            port: 4222,
            cert: None,
            creds_path: None,
        }
    }
}

impl ClientConfig {
    pub fn address(&self) -> String {
        let scheme = if self.cert.is_some() { "tls" } else { "nats" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}
