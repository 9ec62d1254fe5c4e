//! # Configuration Documents
//!
//! A [`ConfigDocument`] holds a tree of named containers, one per record
//! written into it. It can be rendered to and loaded from JSON text or a
//! file.
//!
//! ```text
//! ┌──────────────────── ConfigDocument ────────────────────┐
//! │ "AccountConfig": {                                     │
//! │    "priority": 0,                                      │
//! │    "idUri": "\"Just Test\" <sip:test@pjsip.org>",      │
//! │    "AccountRegConfig": { "registrarUri": ... },        │
//! │    "AccountSipConfig": { "proxies": [ ... ], ... },    │
//! │    ...                                                 │
//! │ }                                                      │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading is all-or-nothing: a failed `load_*` leaves the previous tree in
//! place, and a failed `read_object_into` leaves the target record untouched.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{PersistError, PersistResult};
use crate::path;
use crate::persistent::Persistent;
use crate::value::{ConfigMap, ConfigValue};

/// Tree-structured document used for configuration serialization.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    // Always an object; top-level keys are container names
    root: ConfigValue,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ConfigDocument {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl ConfigDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            root: ConfigValue::object(),
        }
    }

    /// Create a document from JSON text
    pub fn from_json_str(text: &str) -> PersistResult<Self> {
        let mut doc = Self::new();
        doc.load_string(text)?;
        Ok(doc)
    }

    /// Create a document from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> PersistResult<Self> {
        let mut doc = Self::new();
        doc.load_file(path)?;
        Ok(doc)
    }

    fn containers_map(&self) -> &ConfigMap {
        let ConfigValue::Object(map) = &self.root else {
            unreachable!("document root is always an object");
        };
        map
    }

    fn containers_map_mut(&mut self) -> &mut ConfigMap {
        let ConfigValue::Object(map) = &mut self.root else {
            unreachable!("document root is always an object");
        };
        map
    }

    /// Write a record into the document under its container name.
    ///
    /// A container written earlier under the same name is replaced.
    pub fn write_object<T: Persistent>(&mut self, record: &T) -> PersistResult<()> {
        let value = record.to_config_value()?;
        debug!(container = T::CONTAINER_NAME, "writing record into document");
        self.containers_map_mut()
            .insert(T::CONTAINER_NAME.to_string(), value);
        Ok(())
    }

    /// Reconstruct a record from its container.
    ///
    /// Fails with [`PersistError::Parse`] if the container is missing, a
    /// required field is absent, or a value has an incompatible type.
    pub fn read_object<T: Persistent>(&self) -> PersistResult<T> {
        let value = self.containers_map().get(T::CONTAINER_NAME).ok_or_else(|| {
            PersistError::parse(T::CONTAINER_NAME, "container not found in document")
        })?;
        T::from_config_value(value)
    }

    /// Populate an existing record from its container.
    ///
    /// On error the record is left exactly as it was.
    pub fn read_object_into<T: Persistent>(&self, record: &mut T) -> PersistResult<()> {
        *record = self.read_object()?;
        Ok(())
    }

    /// Remove a container and return its tree
    pub fn remove_object(&mut self, name: &str) -> Option<ConfigValue> {
        self.containers_map_mut().shift_remove(name)
    }

    /// Whether a container with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.containers_map().contains_key(name)
    }

    /// Names of all containers, in insertion order
    pub fn containers(&self) -> impl Iterator<Item = &str> {
        self.containers_map().keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.containers_map().is_empty()
    }

    /// Drop every container
    pub fn clear(&mut self) {
        self.root = ConfigValue::object();
    }

    /// The document tree; always an object
    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    /// Get a node by path, e.g. `"EpConfig.UaConfig.maxCalls"`
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        path::get_path(&self.root, path)
    }

    /// Set a node by path, creating intermediate nodes.
    ///
    /// The path must start with a container name; the root stays an object.
    pub fn set(&mut self, path: &str, value: ConfigValue) -> PersistResult<()> {
        match path::parse_path(path)?.first() {
            Some(path::PathSegment::Field(_)) => path::set_path(&mut self.root, path, value),
            _ => Err(PersistError::InvalidPath(format!(
                "{}: must start with a container name",
                path
            ))),
        }
    }

    /// Remove a node by path and return it
    pub fn remove(&mut self, path: &str) -> PersistResult<ConfigValue> {
        path::remove_path(&mut self.root, path)
    }

    /// Render the document as JSON text indented by two spaces
    pub fn save_string(&self) -> PersistResult<String> {
        self.root.to_json_string_pretty()
    }

    /// Render the document as single-line JSON text
    pub fn save_compact_string(&self) -> PersistResult<String> {
        self.root.to_json_string()
    }

    /// Replace the document tree with the one parsed from `text`.
    ///
    /// Malformed text, or text whose root is not an object, fails with
    /// [`PersistError::Syntax`] and leaves the document unchanged.
    pub fn load_string(&mut self, text: &str) -> PersistResult<()> {
        let root = match ConfigValue::from_json_str(text) {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "rejecting malformed document text");
                return Err(e);
            }
        };
        if !root.is_object() {
            return Err(PersistError::Syntax {
                line: 1,
                column: 1,
                message: format!("document root must be an object, found {}", root.kind()),
            });
        }
        debug!(containers = root.as_object().map_or(0, |m| m.len()), "loaded document");
        self.root = root;
        Ok(())
    }

    /// Write the document to `path`, replacing any existing file
    pub fn save_file(&self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        let text = self.save_string()?;
        fs::write(path, text).map_err(|e| PersistError::io(path, e))?;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }

    /// Replace the document tree with the contents of the file at `path`
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> PersistResult<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
        self.load_string(&text)
    }
}

impl FromStr for ConfigDocument {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}
