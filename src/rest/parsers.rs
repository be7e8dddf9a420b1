/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde_json::{Map, Value};

/// Anything that exposes named fields the way API records do
pub trait Record {
    fn value(&self, key: &str) -> Option<&Value>;

    /// Field rendered as a string.
    ///
    /// Strings, numbers and booleans are accepted, as is the `{"_content": ...}`
    /// wrapping the API uses for text nodes. Empty strings count as absent.
    fn field(&self, key: &str) -> Option<String> {
        self.value(key).and_then(scalar_to_string)
    }
}

impl Record for Map<String, Value> {
    fn value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for Value {
    fn value(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }
}

// Renders scalars and `_content` wrappers
pub fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Object(m) => m.get("_content").and_then(scalar_to_string),
        _ => None,
    }
}
