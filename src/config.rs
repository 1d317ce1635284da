//! Projector configuration
//!
//! ```toml
//! host = "192.168.0.100"
//! port = 43728          # number or string, optional
//! model = "dp-series2"  # dp-legacy | dp-series2 | hdx | hdx-series2
//! ```

use crate::error::{Error, Result};
use barco_projector_core::catalog::DEFAULT_HOST;
use barco_projector_core::ProtocolVariant;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

/// Connection settings for one projector
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectorConfig {
    /// Projector address; empty means no connection is opened
    #[serde(default = "default_host")]
    pub host: String,

    /// Control port; ignored on models with a fixed port
    #[serde(default, deserialize_with = "deserialize_port", skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Projector family and protocol generation
    #[serde(default, with = "model")]
    pub model: ProtocolVariant,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            model: ProtocolVariant::default(),
        }
    }
}

impl ProjectorConfig {
    pub fn new(host: impl Into<String>, model: ProtocolVariant) -> Self {
        Self {
            host: host.into(),
            port: None,
            model,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse `host[:port]` as given on a command line
    pub fn from_address(address: &str, model: ProtocolVariant) -> Result<Self> {
        match address.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("Invalid port in address: {}", address)))?;
                Ok(Self::new(host, model).with_port(port))
            }
            None => Ok(Self::new(address, model)),
        }
    }

    /// Whether a host is configured
    pub fn has_host(&self) -> bool {
        !self.host.trim().is_empty()
    }

    /// Port actually used to connect
    pub fn effective_port(&self) -> u16 {
        let desc = self.model.descriptor();
        match self.port {
            Some(port) if desc.port_selectable => port,
            Some(port) => {
                if port != desc.default_port {
                    log::warn!(
                        "{} uses fixed port {}, ignoring configured port {}",
                        self.model.label(),
                        desc.default_port,
                        port
                    );
                }
                desc.default_port
            }
            None => desc.default_port,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortValue::Number(port)) => Ok(Some(port)),
        Some(PortValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(PortValue::Text(text)) => text
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {:?}", text))),
    }
}

mod model {
    use super::*;

    pub fn serialize<S: Serializer>(model: &ProtocolVariant, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(model.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ProtocolVariant, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown projector model: {:?}", name)))
    }
}
