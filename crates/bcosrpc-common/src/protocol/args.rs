//! Positional RPC arguments
//!
//! Every remote procedure of the group-management API takes an ordered list of
//! positional parameters. [`RpcArg`] is the closed set of shapes those
//! parameters can take; serialization matches on the variant explicitly.
//!
//! Map arguments keep their insertion order on the wire (`serde_json` is built
//! with `preserve_order`), so a request body is byte-for-byte reproducible.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::error::Result;

/// A single positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcArg {
    Str(String),
    Int(i64),
    Uint(u64),
    StrList(Vec<String>),
    /// String-keyed map, serialized in insertion order.
    Map(Vec<(String, RpcArg)>),
}

impl RpcArg {
    /// Builds a map argument from `(key, value)` pairs, keeping their order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RpcArg)>,
    {
        RpcArg::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for RpcArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RpcArg::Str(s) => serializer.serialize_str(s),
            RpcArg::Int(n) => serializer.serialize_i64(*n),
            RpcArg::Uint(n) => serializer.serialize_u64(*n),
            RpcArg::StrList(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RpcArg::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for RpcArg {
    fn from(s: &str) -> Self {
        RpcArg::Str(s.to_string())
    }
}

impl From<String> for RpcArg {
    fn from(s: String) -> Self {
        RpcArg::Str(s)
    }
}

impl From<i64> for RpcArg {
    fn from(n: i64) -> Self {
        RpcArg::Int(n)
    }
}

impl From<u32> for RpcArg {
    fn from(n: u32) -> Self {
        RpcArg::Uint(u64::from(n))
    }
}

impl From<u64> for RpcArg {
    fn from(n: u64) -> Self {
        RpcArg::Uint(n)
    }
}

impl From<Vec<String>> for RpcArg {
    fn from(items: Vec<String>) -> Self {
        RpcArg::StrList(items)
    }
}

impl From<&[String]> for RpcArg {
    fn from(items: &[String]) -> Self {
        RpcArg::StrList(items.to_vec())
    }
}

/// Serializes an ordered argument list into a JSON-RPC `params` array.
pub fn to_params(args: &[RpcArg]) -> Result<Value> {
    Ok(serde_json::to_value(args)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_serialization() {
        assert_eq!(serde_json::to_value(RpcArg::from("abc")).unwrap(), json!("abc"));
        assert_eq!(serde_json::to_value(RpcArg::Int(-3)).unwrap(), json!(-3));
        assert_eq!(serde_json::to_value(RpcArg::from(7u32)).unwrap(), json!(7));
    }

    #[test]
    fn test_string_list_keeps_order() {
        let arg = RpcArg::from(vec!["b".to_string(), "a".to_string(), "c".to_string()]);
        assert_eq!(serde_json::to_string(&arg).unwrap(), r#"["b","a","c"]"#);
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let arg = RpcArg::map([
            ("timestamp", RpcArg::from("1700000000")),
            ("sealers", RpcArg::from(vec!["n1".to_string(), "n2".to_string()])),
        ]);
        assert_eq!(
            serde_json::to_string(&arg).unwrap(),
            r#"{"timestamp":"1700000000","sealers":["n1","n2"]}"#
        );
    }

    #[test]
    fn test_to_params_preserves_positions() {
        let params = to_params(&[
            RpcArg::from(7u32),
            RpcArg::map([("timestamp", RpcArg::from("1"))]),
        ])
        .unwrap();
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"[7,{"timestamp":"1"}]"#
        );
    }

    #[test]
    fn test_to_params_empty() {
        assert_eq!(to_params(&[]).unwrap(), json!([]));
    }
}
