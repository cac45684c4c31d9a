use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, anyhow};
use internal::domain::{
    alarm::{AlarmConfig, DEFAULT_ALARM_TEXT, MalformedEventPolicy},
    night_window::{DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND, NightWindow},
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use serde::Deserialize;

use crate::{
    inbound::model::event::{Envelope, EnvelopeKind},
    utils::pem::PemUtils,
};

use super::nats_config::NatsConfig;

pub const CONFIG_PATH_VAR: &str = "MOTION_ALARM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

const TOPIC_VAR: &str = "KAFKA_MOTION_TOPIC";
const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";
const ALARM_TEXT_VAR: &str = "MOTION_ALARM_STR";
const UPPER_BOUND_VAR: &str = "MOTION_ALARM_UPPER_BOUND";
const LOWER_BOUND_VAR: &str = "MOTION_ALARM_LOWER_BOUND";
const ENVELOPE_VAR: &str = "MOTION_EVENT_ENVELOPE";
const MALFORMED_POLICY_VAR: &str = "MOTION_MALFORMED_POLICY";

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct AppConfig {
    pub nats: NatsConfig,
    pub alarm: AlarmSettings,
    pub webhook: WebhookConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AlarmSettings {
    pub alarm_text: String,
    pub upper_bound: u32,
    pub lower_bound: u32,
    pub envelope: EnvelopeKind,
    /// Wrapper key holding the JSON encoded event, only read for the nested envelope.
    pub envelope_key: String,
    pub malformed_policy: String,
}

impl Default for AlarmSettings {
    fn default() -> Self {
        AlarmSettings {
            alarm_text: DEFAULT_ALARM_TEXT.to_string(),
            upper_bound: DEFAULT_UPPER_BOUND,
            lower_bound: DEFAULT_LOWER_BOUND,
            envelope: EnvelopeKind::default(),
            envelope_key: String::from("message"),
            malformed_policy: String::from("abort"),
        }
    }
}

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: Option<String>,
}

impl AppConfig {
    pub fn load(file_path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(file_path)
            .map_err(|err| anyhow!("Could not read config file {}: {:?}", file_path.display(), err))?;
        toml::from_str(&content).map_err(|err| anyhow!("Could not parse TOML config: {:?}", err))
    }

    /// Reads the TOML file, when there is one, then applies the environment on top of it.
    pub fn from_env() -> Result<AppConfig> {
        let mut conf = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load(&PathBuf::from(path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(Path::new(DEFAULT_CONFIG_FILE))?,
            Err(_) => AppConfig::default(),
        };
        conf.override_with(|key| env::var(key).ok())?;
        Ok(conf)
    }

    pub fn override_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(topic) = lookup(TOPIC_VAR) {
            self.nats.consumer.topic = topic;
        }
        if let Some(url) = lookup(WEBHOOK_URL_VAR) {
            self.webhook.url = Some(url);
        }
        if let Some(text) = lookup(ALARM_TEXT_VAR) {
            self.alarm.alarm_text = text;
        }
        if let Some(hour) = lookup(UPPER_BOUND_VAR) {
            self.alarm.upper_bound = Self::parse_hour(UPPER_BOUND_VAR, &hour)?;
        }
        if let Some(hour) = lookup(LOWER_BOUND_VAR) {
            self.alarm.lower_bound = Self::parse_hour(LOWER_BOUND_VAR, &hour)?;
        }
        if let Some(kind) = lookup(ENVELOPE_VAR) {
            self.alarm.envelope = EnvelopeKind::from_str(&kind).with_context(|| format!("Invalid {ENVELOPE_VAR}"))?;
        }
        if let Some(policy) = lookup(MALFORMED_POLICY_VAR) {
            self.alarm.malformed_policy = policy;
        }
        Ok(())
    }

    fn parse_hour(name: &str, value: &str) -> Result<u32> {
        value
            .trim()
            .parse::<u32>()
            .with_context(|| format!("{name} must be an hour of the day, got `{value}`"))
    }

    pub fn alarm_config(&self) -> Result<AlarmConfig> {
        Ok(AlarmConfig {
            window: NightWindow::new(self.alarm.upper_bound, self.alarm.lower_bound)?,
            alarm_text: self.alarm.alarm_text.clone(),
            malformed_policy: MalformedEventPolicy::from_str(&self.alarm.malformed_policy)?,
        })
    }

    pub fn envelope(&self) -> Envelope {
        self.alarm.envelope.with_key(&self.alarm.envelope_key)
    }

    /// An empty URL counts as unset.
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook.url.clone().filter(|url| !url.trim().is_empty())
    }
}

#[derive(Deserialize, Default, Clone, Debug)]
pub struct CertConfig {
    absolute_folder_path: String,
    key_file_name: String,
    cert_file_name: String,
    root_ca_file_name: String,
}

pub enum CertFileType {
    Key,
    Cert,
    Ca,
}

#[cfg_attr(test, mockall::automock)]
pub trait CertificateProvider {
    fn get_path_of(&self, cert_type: CertFileType) -> String;
    fn private_key(&self) -> Result<PrivateKeyDer<'static>>;
    fn certificate(&self) -> Result<CertificateDer<'static>>;
    fn root_ca(&self) -> Result<CertificateDer<'static>>;
}

impl CertConfig {
    fn read(&self, cert_type: CertFileType) -> Result<Vec<u8>> {
        let path = self.get_path_of(cert_type);
        fs::read(&path).with_context(|| format!("Failed to read file: {}", path))
    }
}

impl CertificateProvider for CertConfig {
    fn get_path_of(&self, cert_type: CertFileType) -> String {
        match cert_type {
            CertFileType::Ca => format!("{}/{}", self.absolute_folder_path, self.root_ca_file_name),
            CertFileType::Cert => format!("{}/{}", self.absolute_folder_path, self.cert_file_name),
            CertFileType::Key => format!("{}/{}", self.absolute_folder_path, self.key_file_name),
        }
    }

    fn private_key(&self) -> Result<PrivateKeyDer<'static>> {
        PemUtils::parse_private_key(self.read(CertFileType::Key)?)
    }

    fn certificate(&self) -> Result<CertificateDer<'static>> {
        PemUtils::parse_certificate(self.read(CertFileType::Cert)?)
    }

    fn root_ca(&self) -> Result<CertificateDer<'static>> {
        PemUtils::parse_certificate(self.read(CertFileType::Ca)?)
    }
}
