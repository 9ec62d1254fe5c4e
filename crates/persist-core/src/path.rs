//! # Path-based Access to Document Trees
//!
//! Paths use dot notation with optional array indices:
//!
//! - `"AccountConfig.idUri"` - nested fields
//! - `"AccountConfig.AccountSipConfig.proxies[0]"` - array elements
//! - `"AccountConfig.AccountSipConfig.proxies[-1]"` - negative indices count from the end
//!
//! Field names are matched exactly; configuration keys are case-sensitive.
//!
//! ```
//! # use rvoip_persist_core::{ConfigValue, path};
//! let mut root = ConfigValue::object();
//! path::set_path(&mut root, "UaConfig.stunServer[0]", ConfigValue::from("stun1.pjsip.org")).unwrap();
//! path::set_path(&mut root, "UaConfig.stunServer[1]", ConfigValue::from("stun2.pjsip.org")).unwrap();
//!
//! // Indices may address an existing element or append one; gaps are rejected
//! assert!(path::set_path(&mut root, "UaConfig.stunServer[5]", ConfigValue::Null).is_err());
//! assert_eq!(
//!     path::get_path(&root, "UaConfig.stunServer[-1]").and_then(|v| v.as_str()),
//!     Some("stun2.pjsip.org")
//! );
//! ```

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;

use crate::error::{PersistError, PersistResult};
use crate::value::ConfigValue;

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field of an object
    Field(String),
    /// An array position; negative values count from the end
    Index(i64),
}

fn parse_field(i: &str) -> IResult<&str, PathSegment> {
    map(
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-'),
        |name: &str| PathSegment::Field(name.to_string()),
    )(i)
}

fn parse_index(i: &str) -> IResult<&str, PathSegment> {
    delimited(
        char('['),
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(PathSegment::Index)
        }),
        char(']'),
    )(i)
}

// field[0][1] or [0]
fn parse_segment(i: &str) -> IResult<&str, Vec<PathSegment>> {
    alt((
        map(tuple((parse_field, many0(parse_index))), |(field, indices)| {
            let mut segments = Vec::with_capacity(indices.len() + 1);
            segments.push(field);
            segments.extend(indices);
            segments
        }),
        map(tuple((parse_index, many0(parse_index))), |(first, rest)| {
            let mut segments = Vec::with_capacity(rest.len() + 1);
            segments.push(first);
            segments.extend(rest);
            segments
        }),
    ))(i)
}

/// Parse a path expression into its segments.
///
/// The whole input must be consumed; trailing garbage is an error.
pub fn parse_path(path: &str) -> PersistResult<Vec<PathSegment>> {
    let (_, lists) = all_consuming(separated_list1(char('.'), parse_segment))(path)
        .map_err(|_| PersistError::InvalidPath(path.to_string()))?;
    Ok(lists.into_iter().flatten().collect())
}

fn resolve_index(len: usize, idx: i64) -> Option<usize> {
    if idx < 0 {
        len.checked_sub(idx.unsigned_abs() as usize)
    } else {
        let idx = idx as usize;
        (idx < len).then_some(idx)
    }
}

/// Get a value from a path.
///
/// Returns `None` if the path is malformed or any segment does not resolve.
/// An empty path resolves to the root itself.
pub fn get_path<'a>(root: &'a ConfigValue, path: &str) -> Option<&'a ConfigValue> {
    if path.is_empty() {
        return Some(root);
    }
    let segments = parse_path(path).ok()?;

    let mut current = root;
    for segment in &segments {
        current = match (segment, current) {
            (PathSegment::Field(name), ConfigValue::Object(map)) => map.get(name)?,
            (PathSegment::Index(idx), ConfigValue::Array(arr)) => {
                &arr[resolve_index(arr.len(), *idx)?]
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Set a value at a path, creating intermediate nodes as needed.
///
/// Missing fields become objects or arrays depending on the next segment.
/// An index may refer to an existing element or to one past the end, which
/// appends. A node of the wrong kind on the way is replaced. Negative
/// indices must refer to an existing element.
pub fn set_path(root: &mut ConfigValue, path: &str, new_value: ConfigValue) -> PersistResult<()> {
    if path.is_empty() {
        *root = new_value;
        return Ok(());
    }
    let segments = parse_path(path)?;
    set_segments(root, &segments, new_value, path)
}

fn empty_for(next: Option<&PathSegment>) -> ConfigValue {
    match next {
        Some(PathSegment::Index(_)) => ConfigValue::Array(Vec::new()),
        _ => ConfigValue::object(),
    }
}

// Builds new nodes off to the side and attaches them only once the rest of
// the path has been applied, so a failed set leaves the tree unchanged.
fn set_segments(
    value: &mut ConfigValue,
    segments: &[PathSegment],
    new_value: ConfigValue,
    path: &str,
) -> PersistResult<()> {
    let Some((first, rest)) = segments.split_first() else {
        *value = new_value;
        return Ok(());
    };

    let fits = match first {
        PathSegment::Field(_) => value.is_object(),
        PathSegment::Index(_) => value.is_array(),
    };
    if !fits {
        let mut fresh = empty_for(Some(first));
        set_segments(&mut fresh, segments, new_value, path)?;
        *value = fresh;
        return Ok(());
    }

    match (first, value) {
        (PathSegment::Field(name), ConfigValue::Object(map)) => {
            if let Some(next) = map.get_mut(name) {
                return set_segments(next, rest, new_value, path);
            }
            let mut fresh = empty_for(rest.first());
            set_segments(&mut fresh, rest, new_value, path)?;
            map.insert(name.clone(), fresh);
            Ok(())
        }
        (PathSegment::Index(idx), ConfigValue::Array(arr)) => {
            if *idx < 0 {
                let i = resolve_index(arr.len(), *idx).ok_or_else(|| {
                    PersistError::InvalidPath(format!("{}: negative index out of range", path))
                })?;
                return set_segments(&mut arr[i], rest, new_value, path);
            }
            let i = usize::try_from(*idx).unwrap_or(usize::MAX);
            if i < arr.len() {
                return set_segments(&mut arr[i], rest, new_value, path);
            }
            if i > arr.len() {
                return Err(PersistError::InvalidPath(format!(
                    "{}: index {} is past the end of an array of {}",
                    path,
                    idx,
                    arr.len()
                )));
            }
            let mut fresh = empty_for(rest.first());
            set_segments(&mut fresh, rest, new_value, path)?;
            arr.push(fresh);
            Ok(())
        }
        _ => Err(PersistError::InvalidPath(path.to_string())),
    }
}

/// Remove the value at a path and return it.
///
/// Removing an array element shifts the following elements down.
pub fn remove_path(root: &mut ConfigValue, path: &str) -> PersistResult<ConfigValue> {
    if path.is_empty() {
        return Err(PersistError::InvalidPath("cannot remove the root".to_string()));
    }
    let segments = parse_path(path)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| PersistError::InvalidPath(path.to_string()))?;

    let mut current = root;
    for segment in parents {
        current = match (segment, current) {
            (PathSegment::Field(name), ConfigValue::Object(map)) => map.get_mut(name),
            (PathSegment::Index(idx), ConfigValue::Array(arr)) => {
                resolve_index(arr.len(), *idx).map(move |i| &mut arr[i])
            }
            _ => None,
        }
        .ok_or_else(|| PersistError::InvalidPath(format!("{}: not found", path)))?;
    }

    let removed = match (last, current) {
        (PathSegment::Field(name), ConfigValue::Object(map)) => map.shift_remove(name),
        (PathSegment::Index(idx), ConfigValue::Array(arr)) => {
            resolve_index(arr.len(), *idx).map(|i| arr.remove(i))
        }
        _ => None,
    };
    removed.ok_or_else(|| PersistError::InvalidPath(format!("{}: not found", path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigValue {
        ConfigValue::from_json_str(
            r#"{
                "AccountConfig": {
                    "idUri": "sip:test@pjsip.org",
                    "AccountSipConfig": {
                        "proxies": ["<sip:a>", "<sip:b>", "<sip:c>"],
                        "authCreds": [{"username": "test", "realm": "*"}]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parse_mixed_segments() {
        assert_eq!(
            parse_path("a.b[2][-1].c").unwrap(),
            vec![
                PathSegment::Field("a".to_string()),
                PathSegment::Field("b".to_string()),
                PathSegment::Index(2),
                PathSegment::Index(-1),
                PathSegment::Field("c".to_string()),
            ]
        );
        assert_eq!(parse_path("[0]").unwrap(), vec![PathSegment::Index(0)]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_path("a..b").is_err());
        assert!(parse_path("a[x]").is_err());
        assert!(parse_path("a b").is_err());
        assert!(parse_path(".a").is_err());
    }

    #[test]
    fn get_nested_fields_and_indices() {
        let root = sample();
        assert_eq!(
            get_path(&root, "AccountConfig.idUri").and_then(|v| v.as_str()),
            Some("sip:test@pjsip.org")
        );
        assert_eq!(
            get_path(&root, "AccountConfig.AccountSipConfig.proxies[1]").and_then(|v| v.as_str()),
            Some("<sip:b>")
        );
        assert_eq!(
            get_path(&root, "AccountConfig.AccountSipConfig.proxies[-1]").and_then(|v| v.as_str()),
            Some("<sip:c>")
        );
        assert_eq!(
            get_path(&root, "AccountConfig.AccountSipConfig.authCreds[0].username")
                .and_then(|v| v.as_str()),
            Some("test")
        );
    }

    #[test]
    fn get_missing_or_mismatched() {
        let root = sample();
        assert!(get_path(&root, "AccountConfig.missing").is_none());
        assert!(get_path(&root, "AccountConfig.AccountSipConfig.proxies[3]").is_none());
        assert!(get_path(&root, "AccountConfig.AccountSipConfig.proxies[-4]").is_none());
        assert!(get_path(&root, "AccountConfig.idUri[0]").is_none());
        assert!(get_path(&root, "accountconfig").is_none());
        assert!(get_path(&root, "bad path").is_none());
        assert_eq!(get_path(&root, ""), Some(&root));
    }

    #[test]
    fn set_creates_intermediate_nodes() {
        let mut root = ConfigValue::object();
        set_path(&mut root, "EpConfig.UaConfig.maxCalls", ConfigValue::Int(61)).unwrap();
        set_path(&mut root, "EpConfig.UaConfig.stunServer[0]", ConfigValue::from("stun1")).unwrap();

        assert_eq!(
            get_path(&root, "EpConfig.UaConfig.maxCalls"),
            Some(&ConfigValue::Int(61))
        );
        assert!(get_path(&root, "EpConfig.UaConfig.stunServer").unwrap().is_array());
    }

    #[test]
    fn set_replaces_existing_and_appends() {
        let mut root = sample();
        set_path(&mut root, "AccountConfig.AccountSipConfig.proxies[-1]", ConfigValue::from("<sip:z>"))
            .unwrap();
        set_path(&mut root, "AccountConfig.AccountSipConfig.proxies[3]", ConfigValue::from("<sip:d>"))
            .unwrap();

        let proxies = get_path(&root, "AccountConfig.AccountSipConfig.proxies")
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(proxies.len(), 4);
        assert_eq!(proxies[2].as_str(), Some("<sip:z>"));
        assert_eq!(proxies[3].as_str(), Some("<sip:d>"));
    }

    #[test]
    fn set_rejects_index_past_the_end() {
        let mut root = sample();
        let err = set_path(&mut root, "AccountConfig.AccountSipConfig.proxies[5]", ConfigValue::Int(1))
            .unwrap_err();
        assert!(matches!(err, PersistError::InvalidPath(_)));

        let err = set_path(&mut root, "C.list[4000000000000]", ConfigValue::Int(1)).unwrap_err();
        assert!(matches!(err, PersistError::InvalidPath(_)));
        assert!(get_path(&root, "C").is_none());

        // A failure deep in the path leaves replaced nodes alone too
        assert!(set_path(&mut root, "AccountConfig.idUri[2]", ConfigValue::Int(1)).is_err());
        assert_eq!(
            get_path(&root, "AccountConfig.idUri").and_then(|v| v.as_str()),
            Some("sip:test@pjsip.org")
        );
        assert_eq!(
            get_path(&root, "AccountConfig.AccountSipConfig.proxies")
                .and_then(|v| v.as_array())
                .map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn set_rejects_negative_index_on_empty_array() {
        let mut root = ConfigValue::object();
        let err = set_path(&mut root, "list[-1]", ConfigValue::Int(1)).unwrap_err();
        assert!(matches!(err, PersistError::InvalidPath(_)));
    }

    #[test]
    fn remove_field_and_element() {
        let mut root = sample();
        let removed = remove_path(&mut root, "AccountConfig.AccountSipConfig.proxies[0]").unwrap();
        assert_eq!(removed.as_str(), Some("<sip:a>"));
        assert_eq!(
            get_path(&root, "AccountConfig.AccountSipConfig.proxies[0]").and_then(|v| v.as_str()),
            Some("<sip:b>")
        );

        let removed = remove_path(&mut root, "AccountConfig.idUri").unwrap();
        assert_eq!(removed.as_str(), Some("sip:test@pjsip.org"));
        assert!(get_path(&root, "AccountConfig.idUri").is_none());
    }

    #[test]
    fn remove_missing_is_an_error() {
        let mut root = sample();
        assert!(remove_path(&mut root, "AccountConfig.nothing").is_err());
        assert!(remove_path(&mut root, "Nope.idUri").is_err());
        assert!(remove_path(&mut root, "").is_err());
    }
}
