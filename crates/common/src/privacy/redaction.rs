//! Key-based redaction of structured payloads
//!
//! Walks a [`serde_json::Value`] and replaces the value of every object key
//! that matches the [`RedactionPolicy`] with [`REDACTION_MASK`]. The input is
//! never modified; a fresh copy is returned.

use serde_json::{Map, Value};

/// Literal that replaces every sensitive value.
pub const REDACTION_MASK: &str = "***";

/// Nesting depth after which whole sub-trees are masked.
pub const MAX_REDACTION_DEPTH: usize = 64;

/// Key fragments treated as sensitive by default.
pub const DEFAULT_SENSITIVE_PATTERNS: [&str; 6] =
    ["password", "token", "secret", "apiKey", "cardNumber", "cvv"];

/// Extra fragments applied to HTTP header maps.
pub const SENSITIVE_HEADER_PATTERNS: [&str; 5] =
    ["authorization", "cookie", "csrf", "api-key", "session"];

/// Case-insensitive substring matchers applied to object keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPolicy {
    patterns: Vec<String>,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_PATTERNS)
    }
}

impl RedactionPolicy {
    /// Build a policy from arbitrary key fragments.
    ///
    /// Fragments are lower-cased; empty fragments are ignored because they
    /// would match every key.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self { patterns: Vec::new() };
        policy.extend(patterns);
        policy
    }

    /// Default patterns plus the header-specific ones.
    pub fn http_headers() -> Self {
        Self::default().with_patterns(SENSITIVE_HEADER_PATTERNS)
    }

    /// Add more key fragments to the policy.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(patterns);
        self
    }

    /// Lower-cased fragments in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `key` contains any sensitive fragment, ignoring case.
    pub fn is_sensitive(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.patterns.iter().any(|pattern| key.contains(pattern.as_str()))
    }

    fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().to_lowercase();
            if !pattern.is_empty() && !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
    }
}

/// Produces masked deep copies of JSON payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redactor {
    policy: RedactionPolicy,
    max_depth: usize,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(RedactionPolicy::default())
    }
}

impl Redactor {
    /// Create a redactor for the given policy.
    pub fn new(policy: RedactionPolicy) -> Self {
        Self { policy, max_depth: MAX_REDACTION_DEPTH }
    }

    /// Override the nesting depth guard.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Policy in use.
    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Return a copy of `value` with every sensitive key masked.
    ///
    /// Containers nested deeper than the depth guard are replaced by the mask
    /// as a whole.
    pub fn redact(&self, value: &Value) -> Value {
        self.redact_at(value, 0)
    }

    /// Mask a flat string map, such as HTTP headers, into a JSON object.
    pub fn redact_pairs<'a, I>(&self, pairs: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| {
                let value = if self.policy.is_sensitive(key) {
                    mask()
                } else {
                    Value::String(value.clone())
                };
                (key.clone(), value)
            })
            .collect()
    }

    fn redact_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::Array(items) => {
                if depth >= self.max_depth {
                    return mask();
                }
                Value::Array(items.iter().map(|item| self.redact_at(item, depth + 1)).collect())
            }
            Value::Object(map) => {
                if depth >= self.max_depth {
                    return mask();
                }
                Value::Object(self.redact_object(map, depth))
            }
            scalar => scalar.clone(),
        }
    }

    fn redact_object(&self, map: &Map<String, Value>, depth: usize) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| {
                let value = if self.policy.is_sensitive(key) {
                    mask()
                } else {
                    self.redact_at(value, depth + 1)
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Mask `value` with the default policy.
pub fn redact(value: &Value) -> Value {
    Redactor::default().redact(value)
}

fn mask() -> Value {
    Value::String(REDACTION_MASK.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_pass_through() {
        for value in [json!(null), json!(true), json!(42), json!(1.5), json!("password")] {
            assert_eq!(redact(&value), value);
        }
    }

    #[test]
    fn masks_matching_keys_case_insensitively() {
        let input = json!({
            "username": "ada",
            "Password": "hunter2",
            "accessToken": "abc",
            "client_secret": {"nested": true},
            "APIKEY": 7,
            "cardNumber": "4111111111111111",
            "CVV": null
        });

        let output = redact(&input);

        assert_eq!(
            output,
            json!({
                "username": "ada",
                "Password": "***",
                "accessToken": "***",
                "client_secret": "***",
                "APIKEY": "***",
                "cardNumber": "***",
                "CVV": "***"
            })
        );
    }

    #[test]
    fn masks_at_every_depth_including_inside_arrays() {
        let input = json!({
            "order": {
                "payment": {"cvv": "123", "amount": 10},
                "items": [{"sku": "A1", "token": "t"}, {"sku": "B2"}]
            },
            "history": [[{"secret": 1}]]
        });

        let output = redact(&input);

        assert_eq!(output["order"]["payment"]["cvv"], json!("***"));
        assert_eq!(output["order"]["payment"]["amount"], json!(10));
        assert_eq!(output["order"]["items"][0], json!({"sku": "A1", "token": "***"}));
        assert_eq!(output["order"]["items"][1], json!({"sku": "B2"}));
        assert_eq!(output["history"][0][0]["secret"], json!("***"));
    }

    #[test]
    fn top_level_arrays_are_copied_element_wise() {
        let input = json!([{"password": "x"}, 3, "plain"]);
        assert_eq!(redact(&input), json!([{"password": "***"}, 3, "plain"]));
    }

    #[test]
    fn input_is_left_untouched() {
        let input = json!({"profile": {"password": "p", "name": "n"}});
        let snapshot = input.clone();

        let output = redact(&input);

        assert_eq!(input, snapshot);
        assert_ne!(output, input);
        assert_eq!(output["profile"]["name"], input["profile"]["name"]);
        assert!(!std::ptr::eq(&output["profile"], &input["profile"]));
    }

    #[test]
    fn depth_guard_masks_deep_subtrees() {
        let mut value = json!({"leaf": "visible"});
        for _ in 0..5 {
            value = json!({ "next": value });
        }

        let shallow = Redactor::default().with_max_depth(3).redact(&value);
        assert_eq!(shallow["next"]["next"]["next"], json!("***"));

        let deep = Redactor::default().redact(&value);
        assert_eq!(deep, value);
    }

    #[test]
    fn custom_and_header_policies() {
        let policy = RedactionPolicy::new(["SSN", "", "ssn"]);
        assert_eq!(policy.patterns(), ["ssn"]);
        assert!(policy.is_sensitive("customer_ssn"));
        assert!(!policy.is_sensitive("password"));

        let headers = RedactionPolicy::http_headers();
        assert!(headers.is_sensitive("Authorization"));
        assert!(headers.is_sensitive("X-API-Key"));
        assert!(headers.is_sensitive("Set-Cookie"));
        assert!(headers.is_sensitive("X-CSRFToken"));
        assert!(!headers.is_sensitive("Content-Type"));
    }

    #[test]
    fn redacts_flat_string_pairs() {
        let mut headers = BTreeMap::new();
        headers.insert("authorization".to_string(), "Bearer abc".to_string());
        headers.insert("accept".to_string(), "application/json".to_string());

        let redactor = Redactor::new(RedactionPolicy::http_headers());
        let masked = redactor.redact_pairs(&headers);

        assert_eq!(masked["authorization"], json!("***"));
        assert_eq!(masked["accept"], json!("application/json"));
    }
}
