//! # Configuration Value Tree
//!
//! [`ConfigValue`] is the node type of a configuration document. A record is
//! written into a document by turning it into a tree of `ConfigValue`s, and
//! read back by walking that tree.
//!
//! Unlike a plain JSON value, integers and floats are kept apart so that an
//! integer field written into a document always comes back as an integer.
//! Object keys keep their insertion order, so records print their fields in
//! declaration order.
//!
//! ```
//! # use rvoip_persist_core::ConfigValue;
//! # use indexmap::IndexMap;
//! let mut tls = IndexMap::new();
//! tls.insert("ciphers".to_string(), ConfigValue::from(vec![1i64, 2, 3]));
//! tls.insert("verifyServer".to_string(), ConfigValue::Bool(false));
//!
//! let value = ConfigValue::Object(tls);
//! assert_eq!(value.get_path("ciphers[2]").and_then(|v| v.as_i64()), Some(3));
//! ```

use indexmap::IndexMap;
use std::fmt;

use crate::error::{PersistError, PersistResult};

/// Ordered map used for object nodes
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A node of a configuration document tree.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ConfigValue {
    /// Absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Ordered sequence of values
    Array(Vec<ConfigValue>),
    /// Named child nodes, in insertion order
    Object(ConfigMap),
}

impl ConfigValue {
    /// Create an empty object node
    pub fn object() -> Self {
        ConfigValue::Object(ConfigMap::new())
    }

    /// Convert to a boolean value if possible.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert to an integer value if possible.
    ///
    /// Floats with no fractional part are accepted.
    ///
    /// ```
    /// # use rvoip_persist_core::ConfigValue;
    /// assert_eq!(ConfigValue::Int(61).as_i64(), Some(61));
    /// assert_eq!(ConfigValue::Float(20.0).as_i64(), Some(20));
    /// assert_eq!(ConfigValue::Float(20.5).as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 => {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// Convert to a floating-point value if possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to a string reference if possible.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to an array reference if possible.
    pub fn as_array(&self) -> Option<&Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Convert to a mutable array reference if possible.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Convert to an object reference if possible.
    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convert to a mutable object reference if possible.
    pub fn as_object_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ConfigValue::Array(_))
    }

    /// Short name of the node kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Object(_) => "object",
        }
    }

    /// Get a value from a path, e.g. `"AccountSipConfig.proxies[0]"`.
    pub fn get_path<S: AsRef<str>>(&self, path: S) -> Option<&ConfigValue> {
        crate::path::get_path(self, path.as_ref())
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(*b),
            ConfigValue::Int(i) => serde_json::Value::Number((*i).into()),
            ConfigValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ConfigValue::String(s) => serde_json::Value::String(s.clone()),
            ConfigValue::Array(a) => {
                serde_json::Value::Array(a.iter().map(|v| v.to_json_value()).collect())
            }
            ConfigValue::Object(o) => serde_json::Value::Object(
                o.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }

    /// Convert from a `serde_json::Value`.
    ///
    /// Numbers that fit an `i64` become [`ConfigValue::Int`]; everything else
    /// numeric becomes [`ConfigValue::Float`].
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Int(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => ConfigValue::String(s.clone()),
            serde_json::Value::Array(a) => {
                ConfigValue::Array(a.iter().map(ConfigValue::from_json_value).collect())
            }
            serde_json::Value::Object(o) => ConfigValue::Object(
                o.iter()
                    .map(|(k, v)| (k.clone(), ConfigValue::from_json_value(v)))
                    .collect(),
            ),
        }
    }

    /// Render as compact JSON text.
    pub fn to_json_string(&self) -> PersistResult<String> {
        serde_json::to_string(&self.to_json_value())
            .map_err(|e| PersistError::Serialize(e.to_string()))
    }

    /// Render as JSON text indented by two spaces.
    pub fn to_json_string_pretty(&self) -> PersistResult<String> {
        serde_json::to_string_pretty(&self.to_json_value())
            .map_err(|e| PersistError::Serialize(e.to_string()))
    }

    /// Parse JSON text into a value tree.
    ///
    /// ```
    /// # use rvoip_persist_core::ConfigValue;
    /// let value = ConfigValue::from_json_str(r#"{"maxCalls": 61, "userAgent": "Just JSON Test"}"#).unwrap();
    /// assert_eq!(value.get_path("maxCalls"), Some(&ConfigValue::Int(61)));
    ///
    /// assert!(ConfigValue::from_json_str("{ maxCalls: }").unwrap_err().is_syntax());
    /// ```
    pub fn from_json_str(text: &str) -> PersistResult<Self> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| PersistError::syntax(&e))?;
        Ok(ConfigValue::from_json_value(&json))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "<unprintable {}>", self.kind()),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Int(i as i64)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<u32> for ConfigValue {
    fn from(i: u32) -> Self {
        ConfigValue::Int(i as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_owned())
    }
}

impl<T> From<Vec<T>> for ConfigValue
where
    T: Into<ConfigValue>,
{
    fn from(v: Vec<T>) -> Self {
        ConfigValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(m: ConfigMap) -> Self {
        ConfigValue::Object(m)
    }
}

impl<T> From<Option<T>> for ConfigValue
where
    T: Into<ConfigValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => ConfigValue::Null,
        }
    }
}
