//! SIP transport configuration
//!
//! [`TransportConfig`] describes one listening transport: its port (and an
//! optional range to try), the addresses to bind and advertise, QoS, and the
//! [`TlsConfig`] used when the transport is secure. The same record is used
//! for SIP transports and, inside `AccountMediaConfig`, for media transports.

use rvoip_persist_core::Persistent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a transport created on an [`Endpoint`](crate::Endpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransportId(pub i32);

impl TransportId {
    /// Let the library pick any suitable transport
    pub const ANY: TransportId = TransportId(-1);
}

impl fmt::Display for TransportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportType {
    Udp,
    Tcp,
    Tls,
    Udp6,
    Tcp6,
    Tls6,
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportType::Udp => "UDP",
            TransportType::Tcp => "TCP",
            TransportType::Tls => "TLS",
            TransportType::Udp6 => "UDP6",
            TransportType::Tcp6 => "TCP6",
            TransportType::Tls6 => "TLS6",
        };
        f.write_str(name)
    }
}

/// SSL/TLS protocol version selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SslMethod {
    /// Let the TLS backend choose
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
    #[serde(rename = "tlsv1")]
    Tlsv1,
    #[serde(rename = "tlsv1.1")]
    Tlsv1_1,
    #[serde(rename = "tlsv1.2")]
    Tlsv1_2,
    #[serde(rename = "tlsv1.3")]
    Tlsv1_3,
    /// Negotiate the highest version both sides support
    #[serde(rename = "sslv23")]
    Sslv23,
}

/// Traffic class used to mark outgoing packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QosType {
    #[default]
    BestEffort,
    Background,
    Video,
    Voice,
    Control,
    Signalling,
}

/// TLS settings of a secure transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// File holding the trusted CA certificates
    #[serde(rename = "CaListFile")]
    pub ca_list_file: String,
    /// Certificate presented by this endpoint
    pub cert_file: String,
    /// Private key for `cert_file`
    pub priv_key_file: String,
    /// Password protecting the private key
    pub password: String,
    pub method: SslMethod,
    /// Cipher suite identifiers; empty means backend defaults
    pub ciphers: Vec<i32>,
    pub verify_server: bool,
    pub verify_client: bool,
    pub require_client_cert: bool,
    /// Handshake timeout in milliseconds; 0 disables it
    pub msec_timeout: u32,
    pub qos_type: QosType,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            ca_list_file: String::new(),
            cert_file: String::new(),
            priv_key_file: String::new(),
            password: String::new(),
            method: SslMethod::Unspecified,
            ciphers: Vec::new(),
            verify_server: false,
            verify_client: false,
            require_client_cert: false,
            msec_timeout: 0,
            qos_type: QosType::BestEffort,
        }
    }
}

impl Persistent for TlsConfig {
    const CONTAINER_NAME: &'static str = "TlsConfig";
}

/// Settings of one SIP or media transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    /// Port to bind; 0 lets the system choose
    pub port: u16,
    /// Number of ports above `port` to try if it is taken
    pub port_range: u16,
    /// Address advertised in SIP headers, if different from the bound one
    pub public_address: String,
    /// Address to bind; empty binds all interfaces
    pub bound_address: String,
    #[serde(rename = "TlsConfig")]
    pub tls_config: TlsConfig,
    pub qos_type: QosType,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: 0,
            port_range: 0,
            public_address: String::new(),
            bound_address: String::new(),
            tls_config: TlsConfig::default(),
            qos_type: QosType::BestEffort,
        }
    }
}

impl TransportConfig {
    /// Create a transport config bound to `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Highest port this transport may end up on
    pub fn last_port(&self) -> u32 {
        self.port as u32 + self.port_range as u32
    }
}

impl Persistent for TransportConfig {
    const CONTAINER_NAME: &'static str = "TransportConfig";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvoip_persist_core::{ConfigDocument, ConfigValue};

    #[test]
    fn transport_type_names() {
        assert_eq!(TransportType::Udp6.to_string(), "UDP6");
        assert_eq!(TransportType::Tls.to_string(), "TLS");
    }

    #[test]
    fn tls_config_uses_pjsua_key_names() {
        let mut doc = ConfigDocument::new();
        let tls = TlsConfig {
            ca_list_file: "/etc/ssl/ca.pem".to_string(),
            method: SslMethod::Tlsv1_2,
            ciphers: vec![1, 2, 3],
            ..Default::default()
        };
        doc.write_object(&tls).unwrap();

        assert_eq!(
            doc.get("TlsConfig.CaListFile").and_then(|v| v.as_str()),
            Some("/etc/ssl/ca.pem")
        );
        assert_eq!(doc.get("TlsConfig.method").and_then(|v| v.as_str()), Some("tlsv1.2"));
        assert_eq!(doc.get("TlsConfig.ciphers[2]"), Some(&ConfigValue::Int(3)));
        assert_eq!(doc.read_object::<TlsConfig>().unwrap(), tls);
    }

    #[test]
    fn transport_config_nests_tls() {
        let mut cfg = TransportConfig::with_port(5061);
        cfg.tls_config.verify_server = true;

        let mut doc = ConfigDocument::new();
        doc.write_object(&cfg).unwrap();
        assert_eq!(
            doc.get("TransportConfig.TlsConfig.verifyServer"),
            Some(&ConfigValue::Bool(true))
        );
        assert_eq!(doc.read_object::<TransportConfig>().unwrap(), cfg);
    }

    #[test]
    fn unknown_ssl_method_is_rejected() {
        let mut doc = ConfigDocument::new();
        doc.write_object(&TlsConfig::default()).unwrap();
        doc.set("TlsConfig.method", ConfigValue::from("sslv2")).unwrap();
        assert!(doc.read_object::<TlsConfig>().unwrap_err().is_parse());
    }

    #[test]
    fn last_port_does_not_overflow() {
        let cfg = TransportConfig {
            port: u16::MAX,
            port_range: 10,
            ..Default::default()
        };
        assert_eq!(cfg.last_port(), 65545);
    }
}
