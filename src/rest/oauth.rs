/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! OAuth1 (HMAC-SHA1) request signing.

use crate::rest::errors::FlickrError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::borrow::Cow;
use std::collections::BTreeMap;
use url::Url;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Parameters that travel in the `Authorization` header
pub type OAuthParams = BTreeMap<String, String>;

/// Token and secret pair handed out by the OAuth handshake
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("secret", &"xxx")
            .finish()
    }
}

/// Form encoded body returned by the request/access token endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    values: BTreeMap<String, String>,
}

impl TokenResponse {
    pub(crate) fn parse(body: &str) -> Self {
        Self {
            values: url::form_urlencoded::parse(body.trim().as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn token(&self) -> Option<&str> {
        self.get("oauth_token")
    }

    pub fn secret(&self) -> Option<&str> {
        self.get("oauth_token_secret")
    }

    /// Extracts the token pair, failing when the server left either half out
    pub fn pair(&self) -> Result<TokenPair, FlickrError> {
        match (self.token(), self.secret()) {
            (Some(token), Some(secret)) => Ok(TokenPair::new(token, secret)),
            _ => Err(FlickrError::OAuth {
                status: 200,
                body: url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.values.iter())
                    .finish(),
            }),
        }
    }
}

/// RFC 3986 percent encoding used throughout OAuth1
pub fn percent_encode(s: &str) -> Cow<'_, str> {
    urlencoding::encode(s)
}

/// Builds the protocol parameters for one request, overrides win
pub(crate) fn protocol_params(consumer_key: &str, overrides: &OAuthParams) -> OAuthParams {
    let mut params = OAuthParams::new();
    params.insert("oauth_consumer_key".into(), consumer_key.into());
    params.insert("oauth_nonce".into(), nonce());
    params.insert("oauth_signature_method".into(), SIGNATURE_METHOD.into());
    params.insert(
        "oauth_timestamp".into(),
        chrono::Utc::now().timestamp().to_string(),
    );
    params.insert("oauth_version".into(), OAUTH_VERSION.into());
    params.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

fn nonce() -> String {
    format!("{:016x}{:016x}", rand::random::<u64>(), rand::random::<u64>())
}

/// Scheme, host, non default port and path. No query or fragment.
fn normalized_url(url: &Url) -> String {
    let mut out = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        out.push_str(&format!(":{port}"));
    }
    out.push_str(url.path());
    out
}

/// Signature base string over the request method, url and every parameter.
///
/// Query parameters already present on `url` are folded in with the rest.
pub(crate) fn signature_base_string<'a>(
    method: &str,
    url: &Url,
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k).into_owned(), percent_encode(v).into_owned()))
        .chain(url.query_pairs().map(|(k, v)| {
            (percent_encode(&k).into_owned(), percent_encode(&v).into_owned())
        }))
        .collect();
    pairs.sort();

    let normalized_params = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&normalized_url(url)),
        percent_encode(&normalized_params)
    )
}

/// HMAC-SHA1 over the base string, keyed by both secrets
pub(crate) fn sign(base_string: &str, consumer_secret: &str, token_secret: Option<&str>) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    );
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any size"));
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Value for the `Authorization` header. `params` must include `oauth_signature`.
pub(crate) fn authorization_header(params: &OAuthParams) -> String {
    let fields = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

/// Encodes body parameters with the same escaping used for signing
pub(crate) fn form_encode(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
