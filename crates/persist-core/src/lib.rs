//! # Persist Core - Configuration Documents for rvoip
//!
//! This crate provides the document model used to store user-agent and
//! account configuration:
//!
//! - [`ConfigValue`] - a JSON-like tree node that keeps integers and floats apart
//! - [`Persistent`] - the trait a configuration record implements to live in a document
//! - [`ConfigDocument`] - a tree of named containers with JSON string/file persistence
//! - [`path`] - dotted-path access (`"AccountConfig.AccountSipConfig.proxies[0]"`)
//!
//! ## Quick Start
//!
//! ```rust
//! use rvoip_persist_core::{ConfigDocument, Persistent};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct UaSettings {
//!     max_calls: u32,
//!     stun_server: Vec<String>,
//! }
//!
//! impl Persistent for UaSettings {
//!     const CONTAINER_NAME: &'static str = "UaSettings";
//! }
//!
//! # fn main() -> Result<(), rvoip_persist_core::PersistError> {
//! let settings = UaSettings {
//!     max_calls: 61,
//!     stun_server: vec!["stun1.pjsip.org".into(), "stun2.pjsip.org".into()],
//! };
//!
//! let mut doc = ConfigDocument::new();
//! doc.write_object(&settings)?;
//! let text = doc.save_string()?;
//!
//! let restored: UaSettings = ConfigDocument::from_json_str(&text)?.read_object()?;
//! assert_eq!(restored, settings);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod path;
pub mod persistent;
pub mod value;

pub use document::ConfigDocument;
pub use error::{PersistError, PersistResult};
pub use path::PathSegment;
pub use persistent::Persistent;
pub use value::{ConfigMap, ConfigValue};
