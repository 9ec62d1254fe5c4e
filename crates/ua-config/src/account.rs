//! Account configuration records
//!
//! An account is one SIP identity. [`AccountConfig`] gathers everything the
//! library needs to represent it: the identity URI, how to register, which
//! credentials and proxies to use, call/presence/MWI behaviour, NAT
//! traversal and media transport settings.
//!
//! ```text
//! AccountConfig
//! ├── priority, idUri
//! ├── AccountRegConfig   registrarUri, headers[SipHeader], timers
//! ├── AccountSipConfig   authCreds[AuthCredInfo], proxies[], contact overrides
//! ├── AccountCallConfig  hold, 100rel, session timers
//! ├── AccountPresConfig  headers[SipHeader], PUBLISH
//! ├── AccountMwiConfig   MWI subscription
//! ├── AccountNatConfig   STUN/ICE/TURN, keep-alive
//! └── AccountMediaConfig SRTP, IPv6
//!     └── TransportConfig
//!         └── TlsConfig  ciphers[]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rvoip_ua_config::{AccountConfig, AuthCredInfo, SipHeader};
//!
//! let mut acc_cfg = AccountConfig::new("sip:test1@pjsip.org")
//!     .with_registrar("sip:pjsip.org")
//!     .with_credential(AuthCredInfo::new("digest", "*", "test1", "test1"));
//! acc_cfg.reg_config.headers.push(SipHeader::new("X-Header", "User header"));
//!
//! assert_eq!(acc_cfg.sip_config.auth_creds.len(), 1);
//! assert_eq!(acc_cfg.reg_config.registrar_uri, "sip:pjsip.org");
//! ```

use rvoip_persist_core::Persistent;
use serde::{Deserialize, Serialize};

use crate::transport::{TransportConfig, TransportId};

/// A SIP header name/value pair added to outgoing requests
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipHeader {
    pub h_name: String,
    pub h_value: String,
}

impl SipHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            h_name: name.into(),
            h_value: value.into(),
        }
    }
}

impl Persistent for SipHeader {
    const CONTAINER_NAME: &'static str = "SipHeader";
}

/// How the `data` of an [`AuthCredInfo`] is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialDataType {
    /// `data` is the plain-text password
    #[default]
    PlainPassword,
    /// `data` is the precomputed digest of `username:realm:password`
    DigestHash,
}

/// Credentials for digest authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredInfo {
    /// Authentication scheme, normally `digest`
    pub scheme: String,
    /// Realm the credentials apply to; `*` matches any realm
    pub realm: String,
    pub username: String,
    pub data_type: CredentialDataType,
    /// Password or hash, depending on `data_type`
    pub data: String,
    /// AKA key, for AKA digest authentication
    pub aka_k: String,
    pub aka_op: String,
    pub aka_amf: String,
}

impl AuthCredInfo {
    /// Create a plain-password credential
    pub fn new(
        scheme: impl Into<String>,
        realm: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            realm: realm.into(),
            username: username.into(),
            data_type: CredentialDataType::PlainPassword,
            data: password.into(),
            aka_k: String::new(),
            aka_op: String::new(),
            aka_amf: String::new(),
        }
    }
}

impl Default for AuthCredInfo {
    fn default() -> Self {
        Self::new("digest", "*", "", "")
    }
}

impl Persistent for AuthCredInfo {
    const CONTAINER_NAME: &'static str = "AuthCredInfo";
}

/// Registration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRegConfig {
    /// Registrar URI; empty disables registration
    pub registrar_uri: String,
    /// Register as soon as the account is added
    pub register_on_add: bool,
    /// Extra headers put in REGISTER requests
    pub headers: Vec<SipHeader>,
    /// Requested registration lifetime in seconds
    pub timeout_sec: u32,
    /// Delay before retrying a failed registration; 0 disables retries
    pub retry_interval_sec: u32,
    /// Delay before the first retry; 0 uses `retry_interval_sec`
    pub first_retry_interval_sec: u32,
    /// Random jitter added to the retry interval
    pub random_retry_interval_sec: u32,
    /// Refresh this many seconds before the registration expires
    pub delay_before_refresh_sec: u32,
    /// Hang up calls when registration fails
    pub drop_calls_on_fail: bool,
    /// How long to wait for the unregistration response, in milliseconds
    pub unreg_wait_msec: u32,
    /// Bit mask choosing which proxies REGISTER goes through
    pub proxy_use: u32,
}

impl Default for AccountRegConfig {
    fn default() -> Self {
        Self {
            registrar_uri: String::new(),
            register_on_add: true,
            headers: Vec::new(),
            timeout_sec: 300,
            retry_interval_sec: 0,
            first_retry_interval_sec: 0,
            random_retry_interval_sec: 10,
            delay_before_refresh_sec: 5,
            drop_calls_on_fail: false,
            unreg_wait_msec: 4000,
            proxy_use: 3,
        }
    }
}

impl Persistent for AccountRegConfig {
    const CONTAINER_NAME: &'static str = "AccountRegConfig";
}

/// SIP-level account settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSipConfig {
    pub auth_creds: Vec<AuthCredInfo>,
    /// Route set for this account, as name-addr URIs
    pub proxies: Vec<String>,
    /// Contact URI to use instead of the generated one
    pub contact_forced: String,
    /// Parameters appended to the Contact header
    pub contact_params: String,
    /// Parameters appended to the Contact URI
    pub contact_uri_params: String,
    /// Send an empty Authorization header with the first request
    pub auth_initial_empty: bool,
    pub auth_initial_algorithm: String,
    /// Transport to bind this account to
    pub transport_id: TransportId,
}

impl Default for AccountSipConfig {
    fn default() -> Self {
        Self {
            auth_creds: Vec::new(),
            proxies: Vec::new(),
            contact_forced: String::new(),
            contact_params: String::new(),
            contact_uri_params: String::new(),
            auth_initial_empty: false,
            auth_initial_algorithm: String::new(),
            transport_id: TransportId::ANY,
        }
    }
}

impl Persistent for AccountSipConfig {
    const CONTAINER_NAME: &'static str = "AccountSipConfig";
}

/// How a call is put on hold in SDP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoldType {
    /// `a=sendonly` / `a=inactive` as in RFC 3264
    #[default]
    Rfc3264,
    /// Connection address 0.0.0.0 as in RFC 2543
    Rfc2543,
}

/// Use of an optional SIP extension (100rel, session timers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionUse {
    Inactive,
    #[default]
    Optional,
    Required,
    Always,
}

/// Call settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCallConfig {
    pub hold_type: HoldType,
    /// Reliable provisional responses (100rel)
    pub prack_use: ExtensionUse,
    /// Session timers
    pub timer_use: ExtensionUse,
    #[serde(rename = "timerMinSESec")]
    pub timer_min_se_sec: u32,
    pub timer_sess_expires_sec: u32,
}

impl Default for AccountCallConfig {
    fn default() -> Self {
        Self {
            hold_type: HoldType::Rfc3264,
            prack_use: ExtensionUse::Inactive,
            timer_use: ExtensionUse::Optional,
            timer_min_se_sec: 90,
            timer_sess_expires_sec: 1800,
        }
    }
}

impl Persistent for AccountCallConfig {
    const CONTAINER_NAME: &'static str = "AccountCallConfig";
}

/// Presence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPresConfig {
    /// Extra headers put in presence requests
    pub headers: Vec<SipHeader>,
    /// Publish presence with PUBLISH
    pub publish_enabled: bool,
    /// Queue PUBLISH requests while one is pending
    pub publish_queue: bool,
    pub publish_shutdown_wait_msec: u32,
    pub pidf_tuple_id: String,
}

impl Default for AccountPresConfig {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            publish_enabled: false,
            publish_queue: true,
            publish_shutdown_wait_msec: 2000,
            pidf_tuple_id: String::new(),
        }
    }
}

impl Persistent for AccountPresConfig {
    const CONTAINER_NAME: &'static str = "AccountPresConfig";
}

/// Message waiting indication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMwiConfig {
    pub enabled: bool,
    pub expiration_sec: u32,
}

impl Default for AccountMwiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            expiration_sec: 3600,
        }
    }
}

impl Persistent for AccountMwiConfig {
    const CONTAINER_NAME: &'static str = "AccountMwiConfig";
}

/// Whether STUN is used for SIP or media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StunUse {
    /// Follow the endpoint-wide STUN settings
    #[default]
    Default,
    Disabled,
}

/// NAT traversal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNatConfig {
    pub sip_stun_use: StunUse,
    pub media_stun_use: StunUse,
    pub ice_enabled: bool,
    /// Maximum host candidates; -1 means no limit
    pub ice_max_host_cands: i32,
    pub ice_aggressive_nomination: bool,
    pub turn_enabled: bool,
    pub turn_server: String,
    pub turn_user_name: String,
    pub turn_password: String,
    /// Rewrite Contact from the address seen by the registrar
    pub contact_rewrite_use: u32,
    /// Rewrite Via sent-by from the address seen by the server
    pub via_rewrite_use: u32,
    /// SIP outbound (RFC 5626) usage
    pub sip_outbound_use: u32,
    /// UDP keep-alive interval; 0 disables keep-alives
    pub udp_ka_interval_sec: u32,
    pub udp_ka_data: String,
}

impl Default for AccountNatConfig {
    fn default() -> Self {
        Self {
            sip_stun_use: StunUse::Default,
            media_stun_use: StunUse::Default,
            ice_enabled: false,
            ice_max_host_cands: -1,
            ice_aggressive_nomination: true,
            turn_enabled: false,
            turn_server: String::new(),
            turn_user_name: String::new(),
            turn_password: String::new(),
            contact_rewrite_use: 1,
            via_rewrite_use: 1,
            sip_outbound_use: 1,
            udp_ka_interval_sec: 15,
            udp_ka_data: "\r\n".to_string(),
        }
    }
}

impl Persistent for AccountNatConfig {
    const CONTAINER_NAME: &'static str = "AccountNatConfig";
}

/// SRTP policy for calls on this account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SrtpUse {
    #[default]
    Disabled,
    Optional,
    Mandatory,
}

/// IPv6 use for media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ipv6Use {
    #[default]
    Disabled,
    Enabled,
}

/// Media settings of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMediaConfig {
    /// Media transport settings
    #[serde(rename = "TransportConfig")]
    pub transport_config: TransportConfig,
    /// Answer re-offers with a single codec
    pub lock_codec_enabled: bool,
    pub stream_ka_enabled: bool,
    pub srtp_use: SrtpUse,
    /// 0 = any, 1 = require TLS, 2 = require SIPS end to end
    pub srtp_secure_signaling: u32,
    pub ipv6_use: Ipv6Use,
}

impl Default for AccountMediaConfig {
    fn default() -> Self {
        Self {
            transport_config: TransportConfig::default(),
            lock_codec_enabled: true,
            stream_ka_enabled: false,
            srtp_use: SrtpUse::Disabled,
            srtp_secure_signaling: 1,
            ipv6_use: Ipv6Use::Disabled,
        }
    }
}

impl Persistent for AccountMediaConfig {
    const CONTAINER_NAME: &'static str = "AccountMediaConfig";
}

/// Complete account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    /// Higher priority accounts are preferred when choosing one for a call
    pub priority: i32,
    /// Identity of this account, e.g. `"Alice" <sip:alice@example.com>`
    pub id_uri: String,
    #[serde(rename = "AccountRegConfig")]
    pub reg_config: AccountRegConfig,
    #[serde(rename = "AccountSipConfig")]
    pub sip_config: AccountSipConfig,
    #[serde(rename = "AccountCallConfig")]
    pub call_config: AccountCallConfig,
    #[serde(rename = "AccountPresConfig")]
    pub pres_config: AccountPresConfig,
    #[serde(rename = "AccountMwiConfig")]
    pub mwi_config: AccountMwiConfig,
    #[serde(rename = "AccountNatConfig")]
    pub nat_config: AccountNatConfig,
    #[serde(rename = "AccountMediaConfig")]
    pub media_config: AccountMediaConfig,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            priority: 0,
            id_uri: String::new(),
            reg_config: AccountRegConfig::default(),
            sip_config: AccountSipConfig::default(),
            call_config: AccountCallConfig::default(),
            pres_config: AccountPresConfig::default(),
            mwi_config: AccountMwiConfig::default(),
            nat_config: AccountNatConfig::default(),
            media_config: AccountMediaConfig::default(),
        }
    }
}

impl AccountConfig {
    /// Create an account config for the given identity
    pub fn new(id_uri: impl Into<String>) -> Self {
        Self {
            id_uri: id_uri.into(),
            ..Default::default()
        }
    }

    /// Set the registrar URI
    pub fn with_registrar(mut self, registrar_uri: impl Into<String>) -> Self {
        self.reg_config.registrar_uri = registrar_uri.into();
        self
    }

    /// Add a credential
    pub fn with_credential(mut self, cred: AuthCredInfo) -> Self {
        self.sip_config.auth_creds.push(cred);
        self
    }

    /// Add a proxy to the route set
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.sip_config.proxies.push(proxy.into());
        self
    }
}

impl Persistent for AccountConfig {
    const CONTAINER_NAME: &'static str = "AccountConfig";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvoip_persist_core::{ConfigDocument, ConfigValue};

    #[test]
    fn builder_helpers() {
        let cfg = AccountConfig::new("sip:alice@example.com")
            .with_registrar("sip:example.com")
            .with_proxy("<sip:proxy.example.com;lr>")
            .with_credential(AuthCredInfo::new("digest", "example.com", "alice", "secret"));

        assert_eq!(cfg.reg_config.registrar_uri, "sip:example.com");
        assert_eq!(cfg.sip_config.proxies, vec!["<sip:proxy.example.com;lr>".to_string()]);
        assert_eq!(cfg.sip_config.auth_creds[0].username, "alice");
        assert_eq!(cfg.sip_config.auth_creds[0].data_type, CredentialDataType::PlainPassword);
        assert!(AccountConfig::default().reg_config.registrar_uri.is_empty());
    }

    #[test]
    fn document_layout_uses_type_names_and_camel_case() {
        let mut cfg = AccountConfig::new("sip:test@pjsip.org");
        cfg.reg_config.headers.push(SipHeader::new("X-Header", "User header"));
        cfg.call_config.timer_min_se_sec = 120;

        let mut doc = ConfigDocument::new();
        doc.write_object(&cfg).unwrap();

        assert_eq!(
            doc.get("AccountConfig.AccountRegConfig.headers[0].hName").and_then(|v| v.as_str()),
            Some("X-Header")
        );
        assert_eq!(
            doc.get("AccountConfig.AccountCallConfig.timerMinSESec"),
            Some(&ConfigValue::Int(120))
        );
        assert_eq!(
            doc.get("AccountConfig.AccountSipConfig.transportId"),
            Some(&ConfigValue::Int(-1))
        );
        assert_eq!(
            doc.get("AccountConfig.AccountMediaConfig.srtpUse").and_then(|v| v.as_str()),
            Some("disabled")
        );
        assert_eq!(
            doc.get("AccountConfig.AccountSipConfig.authCreds"),
            Some(&ConfigValue::Array(Vec::new()))
        );
    }

    #[test]
    fn missing_nested_record_fails_to_read() {
        let mut doc = ConfigDocument::new();
        doc.write_object(&AccountConfig::default()).unwrap();
        doc.remove("AccountConfig.AccountMwiConfig").unwrap();

        let err = doc.read_object::<AccountConfig>().unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("AccountMwiConfig"), "{}", err);
    }

    #[test]
    fn credential_list_element_with_wrong_type_fails() {
        let mut doc = ConfigDocument::new();
        doc.write_object(&AccountConfig::default().with_credential(AuthCredInfo::default()))
            .unwrap();
        doc.set("AccountConfig.AccountSipConfig.authCreds[0].username", ConfigValue::Int(7))
            .unwrap();
        assert!(doc.read_object::<AccountConfig>().unwrap_err().is_parse());
    }

    #[test]
    fn credential_data_type_round_trips() {
        let mut cred = AuthCredInfo::new("digest", "*", "u", "0123456789abcdef");
        cred.data_type = CredentialDataType::DigestHash;

        let mut doc = ConfigDocument::new();
        doc.write_object(&cred).unwrap();
        assert_eq!(
            doc.get("AuthCredInfo.dataType").and_then(|v| v.as_str()),
            Some("digestHash")
        );
        assert_eq!(doc.read_object::<AuthCredInfo>().unwrap(), cred);
    }
}
