//! Small helpers shared by host call sites

use crate::errors::BridgeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fail with [`BridgeError::NotSupported`] for a feature the engine lacks.
///
/// There is no success path; the `Ok` type is free so the call can sit in
/// any position that expects a `Result`.
pub fn unsupported<T>(name: &str, issue: Option<&str>) -> Result<T, BridgeError> {
    let mut message = format!("{} is not supported by packhost.", name);
    if let Some(issue) = issue.filter(|issue| !issue.is_empty()) {
        message.push_str(&format!(
            " Please refer to issue {} for more information.",
            issue
        ));
    }
    Err(BridgeError::NotSupported(message))
}

/// Map every value of a record, keeping keys and their order
pub fn map_values<K, V, U, C>(
    record: impl IntoIterator<Item = (K, V)>,
    mut f: impl FnMut(V) -> U,
) -> C
where
    C: FromIterator<(K, U)>,
{
    record.into_iter().map(|(k, v)| (k, f(v))).collect()
}

/// A loader reference; its display form is the loader's identity string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderRequest {
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub fragment: String,
}

impl fmt::Display for LoaderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.path, self.query, self.fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_unsupported_names_feature() {
        let err = unsupported::<()>("X", None).unwrap_err();
        assert_eq!(
            err,
            BridgeError::NotSupported("X is not supported by packhost.".to_string())
        );
    }

    #[test]
    fn test_unsupported_mentions_issue() {
        let err = unsupported::<u32>("module.hot", Some("#1234")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("module.hot"));
        assert!(message.ends_with("Please refer to issue #1234 for more information."));
    }

    #[test]
    fn test_map_values_keeps_keys() {
        let record = vec![
            ("b".to_string(), "./b".to_string()),
            ("a".to_string(), "./a".to_string()),
        ];
        let mapped: Vec<(String, String)> = map_values(record, |v| format!("{}.js", v));
        assert_eq!(
            mapped,
            vec![
                ("b".to_string(), "./b.js".to_string()),
                ("a".to_string(), "./a.js".to_string()),
            ]
        );

        let sorted: BTreeMap<&str, usize> = map_values([("x", "abc"), ("y", "")], str::len);
        assert_eq!(sorted.get("x"), Some(&3));
        assert_eq!(sorted.get("y"), Some(&0));
    }

    #[test]
    fn test_loader_request_identity() {
        let request: LoaderRequest =
            serde_json::from_str(r##"{"path":"/l/babel.js","query":"?cache","fragment":"#x"}"##)
                .unwrap();
        assert_eq!(request.to_string(), "/l/babel.js?cache#x");

        let bare: LoaderRequest = serde_json::from_str(r#"{"path":"/l/css.js"}"#).unwrap();
        assert_eq!(bare.to_string(), "/l/css.js");
    }
}
