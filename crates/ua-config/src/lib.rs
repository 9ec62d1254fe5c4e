//! # UA Config - SIP User-Agent Configuration for rvoip
//!
//! Typed configuration records for a SIP user agent, persisted through
//! [`rvoip_persist_core::ConfigDocument`]:
//!
//! - [`EpConfig`] - endpoint-wide user-agent, logging and media settings
//! - [`AccountConfig`] - one SIP identity with registration, credentials,
//!   proxies, call, presence, NAT and media settings
//! - [`TransportConfig`] / [`TlsConfig`] - transport settings
//! - [`Endpoint`] - the library lifecycle handle that consumes them
//!
//! Every record implements [`Persistent`](rvoip_persist_core::Persistent)
//! under its type name, so a document holding an account looks like
//! `{"AccountConfig": {"priority": 0, "idUri": "...", "AccountRegConfig": {...}}}`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rvoip_persist_core::ConfigDocument;
//! use rvoip_ua_config::{AccountConfig, AuthCredInfo};
//!
//! # fn main() -> Result<(), rvoip_ua_config::UaError> {
//! let acc_cfg = AccountConfig::new("\"Just Test\" <sip:test@pjsip.org>")
//!     .with_registrar("sip:pjsip.org")
//!     .with_credential(AuthCredInfo::new("digest", "*", "test", "passwd"));
//!
//! let mut doc = ConfigDocument::new();
//! doc.write_object(&acc_cfg)?;
//! let text = doc.save_string()?;
//!
//! let parsed: AccountConfig = ConfigDocument::from_json_str(&text)?.read_object()?;
//! assert_eq!(parsed, acc_cfg);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod transport;

pub use account::{
    AccountCallConfig, AccountConfig, AccountMediaConfig, AccountMwiConfig, AccountNatConfig,
    AccountPresConfig, AccountRegConfig, AccountSipConfig, AuthCredInfo, CredentialDataType,
    ExtensionUse, HoldType, Ipv6Use, SipHeader, SrtpUse, StunUse,
};
pub use endpoint::{Endpoint, EpConfig, LibState, LogConfig, MediaConfig, TransportInfo, UaConfig};
pub use error::{UaError, UaResult};
pub use transport::{QosType, SslMethod, TlsConfig, TransportConfig, TransportId, TransportType};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
