//! URL-encoded field access over the query string and request body.

use pds_core::ServiceError;

/// Decoded `key=value` pairs. Body fields come before query fields, so a
/// single-valued lookup prefers the body.
#[derive(Debug, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(query: Option<&str>, body: &[u8]) -> Result<Self, ServiceError> {
        let mut pairs: Vec<(String, String)> = if body.is_empty() {
            Vec::new()
        } else {
            serde_urlencoded::from_bytes(body)
                .map_err(|e| ServiceError::validation(format!("malformed form body: {e}")))?
        };
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let query_pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
                .map_err(|e| ServiceError::validation(format!("malformed query string: {e}")))?;
            pairs.extend(query_pairs);
        }
        Ok(Self { pairs })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The field's value, or the empty string when absent.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_owned()
    }

    /// Every value submitted under `key`, in submission order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}
