/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::Perms;
use crate::rest::oauth::OAuthParams;
use std::collections::BTreeMap;

/// Value of a single request argument, already in its wire form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgValue(String);

impl ArgValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&String> for ArgValue {
    fn from(v: &String) -> Self {
        Self(v.clone())
    }
}

// The API spells booleans as 1/0
impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self(if v { "1" } else { "0" }.to_string())
    }
}

impl From<Perms> for ArgValue {
    fn from(v: Perms) -> Self {
        let s: &'static str = v.into();
        Self(s.to_string())
    }
}

macro_rules! arg_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for ArgValue {
            fn from(v: $t) -> Self {
                Self(v.to_string())
            }
        })*
    };
}

arg_value_from_int!(i32, i64, u32, u64, usize);

/// Arguments for one API call.
///
/// `params` are sent as the method parameters. `oauth` entries only reach the
/// signing step (for example a one off `oauth_callback`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    params: BTreeMap<String, String>,
    oauth: OAuthParams,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.params.insert(key.into(), value.into().0);
    }

    /// Adds an override for the OAuth protocol parameters
    pub fn with_oauth(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.oauth.insert(key.into(), value.into().0);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn oauth(&self) -> &OAuthParams {
        &self.oauth
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.oauth.is_empty()
    }

    /// Splits into (method parameters, oauth overrides)
    pub(crate) fn into_parts(self) -> (BTreeMap<String, String>, OAuthParams) {
        (self.params, self.oauth)
    }
}

impl<K, V> FromIterator<(K, V)> for Args
where
    K: Into<String>,
    V: Into<ArgValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.set(k, v);
        }
        args
    }
}

/// Adds the protocol constants every method call carries
pub(crate) fn build_args(
    mut params: BTreeMap<String, String>,
    method_name: Option<&str>,
) -> BTreeMap<String, String> {
    if let Some(method) = method_name {
        params.insert("method".into(), method.into());
    }
    params.insert("format".into(), "json".into());
    params.insert("nojsoncallback".into(), "1".into());
    params
}
