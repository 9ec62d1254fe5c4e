//! Records that can be written into and read from a [`ConfigDocument`](crate::ConfigDocument)

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PersistError, PersistResult};
use crate::value::ConfigValue;

/// A configuration record with a stable place in a document.
///
/// The record's fields are mapped through serde: primitive fields become
/// leaf nodes, nested records become child objects and `Vec`s become
/// arrays. Fields without a `#[serde(default)]` are required when reading.
///
/// ```
/// # use rvoip_persist_core::{ConfigDocument, Persistent};
/// # use serde::{Deserialize, Serialize};
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct SipHeader {
///     h_name: String,
///     h_value: String,
/// }
///
/// impl Persistent for SipHeader {
///     const CONTAINER_NAME: &'static str = "SipHeader";
/// }
///
/// let header = SipHeader { h_name: "X-Header".into(), h_value: "User header".into() };
/// let mut doc = ConfigDocument::new();
/// doc.write_object(&header).unwrap();
/// assert_eq!(doc.read_object::<SipHeader>().unwrap(), header);
/// ```
pub trait Persistent: Serialize + DeserializeOwned {
    /// Name of the container node this record is stored under
    const CONTAINER_NAME: &'static str;

    /// Convert this record to a value tree.
    fn to_config_value(&self) -> PersistResult<ConfigValue> {
        let json = serde_json::to_value(self).map_err(|e| PersistError::Serialize(e.to_string()))?;
        Ok(ConfigValue::from_json_value(&json))
    }

    /// Rebuild a record from a value tree.
    fn from_config_value(value: &ConfigValue) -> PersistResult<Self> {
        serde_json::from_value(value.to_json_value())
            .map_err(|e| PersistError::parse(Self::CONTAINER_NAME, e.to_string()))
    }
}
