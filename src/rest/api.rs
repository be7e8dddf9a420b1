/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::config::Config;
use crate::rest::errors::FlickrError;
use crate::rest::oauth::{
    OAuthParams, TokenResponse, authorization_header, form_encode, protocol_params,
    signature_base_string, sign,
};
use num_enum::TryFromPrimitive;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const USER_AGENT: &str = concat!(
    "Flickr/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/cyclotron3k/flickr)"
);

/// Photo payload for upload and replace
#[derive(Debug, Clone)]
pub enum Photo {
    /// File read when the request is made
    Path(PathBuf),
    /// Data already in memory
    Bytes { file_name: String, data: Vec<u8> },
}

impl Photo {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    // The file handle is opened and dropped inside this call
    fn into_part(self) -> Result<Part, FlickrError> {
        let (file_name, data) = match self {
            Photo::Path(path) => {
                let data = std::fs::read(&path)?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "photo".to_string());
                (file_name, data)
            }
            Photo::Bytes { file_name, data } => (file_name, data),
        };
        Ok(Part::bytes(data).file_name(file_name))
    }
}

impl From<PathBuf> for Photo {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Photo {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

/// Signs and sends requests. One per [`crate::rest::Client`].
#[derive(Clone)]
pub struct ApiClient {
    consumer_key: String,
    consumer_secret: String,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates the transport using the process wide proxy and TLS settings
    pub fn new(
        consumer_key: &str,
        consumer_secret: &str,
        config: &Config,
    ) -> Result<Self, FlickrError> {
        Ok(Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            https_client: https_client(config)?,
        })
    }

    fn signed_header(
        &self,
        method: &str,
        url: &url::Url,
        token_secret: Option<&str>,
        oauth_overrides: &OAuthParams,
        body_params: &BTreeMap<String, String>,
    ) -> String {
        let mut oauth = protocol_params(&self.consumer_key, oauth_overrides);
        let base = signature_base_string(
            method,
            url,
            oauth
                .iter()
                .chain(body_params.iter())
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        oauth.insert(
            "oauth_signature".into(),
            sign(&base, &self.consumer_secret, token_secret),
        );
        authorization_header(&oauth)
    }

    /// Signed `application/x-www-form-urlencoded` POST
    pub async fn post_form(
        &self,
        url: &str,
        token_secret: Option<&str>,
        oauth_overrides: &OAuthParams,
        body_params: &BTreeMap<String, String>,
    ) -> Result<reqwest::Response, FlickrError> {
        let req_url = url::Url::parse(url)?;
        let auth = self.signed_header("POST", &req_url, token_secret, oauth_overrides, body_params);
        log::debug!("POST {req_url}");
        Ok(self
            .https_client
            .post(req_url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_encode(body_params))
            .send()
            .await?)
    }

    /// Signed `multipart/form-data` POST. The photo is not part of the signature.
    pub async fn post_multipart(
        &self,
        url: &str,
        token_secret: Option<&str>,
        oauth_overrides: &OAuthParams,
        body_params: &BTreeMap<String, String>,
        photo: Photo,
    ) -> Result<reqwest::Response, FlickrError> {
        let req_url = url::Url::parse(url)?;
        let auth = self.signed_header("POST", &req_url, token_secret, oauth_overrides, body_params);
        let form = body_params
            .iter()
            .fold(Form::new(), |form, (k, v)| form.text(k.clone(), v.clone()))
            .part("photo", photo.into_part()?);
        log::debug!("POST multipart {req_url}");
        Ok(self
            .https_client
            .post(req_url)
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?)
    }

    /// Obtains a request token. `oauth_callback` defaults to `oob`.
    pub async fn request_token(
        &self,
        url: &str,
        oauth_params: &OAuthParams,
    ) -> Result<TokenResponse, FlickrError> {
        let mut oauth = OAuthParams::new();
        oauth.insert("oauth_callback".into(), "oob".into());
        oauth.extend(oauth_params.iter().map(|(k, v)| (k.clone(), v.clone())));
        let resp = self.post_form(url, None, &oauth, &BTreeMap::new()).await?;
        token_response(resp).await
    }

    /// Url the user visits to grant access
    pub fn authorize_url(
        &self,
        url: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, FlickrError> {
        Ok(url::Url::parse_with_params(url, params)?.to_string())
    }

    /// Exchanges an authorized request token for an access token
    pub async fn access_token(
        &self,
        url: &str,
        token_secret: &str,
        oauth_params: &OAuthParams,
    ) -> Result<TokenResponse, FlickrError> {
        let resp = self
            .post_form(url, Some(token_secret), oauth_params, &BTreeMap::new())
            .await?;
        token_response(resp).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("consumer_key", &"xxx")
            .field("consumer_secret", &"xxx")
            .finish()
    }
}

async fn token_response(resp: reqwest::Response) -> Result<TokenResponse, FlickrError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(FlickrError::OAuth {
            status: status.as_u16(),
            body,
        });
    }
    Ok(TokenResponse::parse(&body))
}

fn https_client(config: &Config) -> Result<reqwest::Client, FlickrError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(!config.check_certificate);

    builder = match &config.proxy {
        Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.as_str())?),
        None => builder.no_proxy(),
    };

    let mut pem_files = Vec::new();
    if let Some(ca_file) = &config.ca_file {
        pem_files.push(ca_file.clone());
    }
    if let Some(ca_path) = &config.ca_path {
        for entry in std::fs::read_dir(ca_path)? {
            let path = entry?.path();
            if path.is_file() {
                pem_files.push(path);
            }
        }
    }
    for pem in pem_files {
        for cert in reqwest::Certificate::from_pem_bundle(&std::fs::read(&pem)?)? {
            builder = builder.add_root_certificate(cert);
        }
    }

    Ok(builder.build()?)
}

/// Globally documented API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCode {
    SslRequired = 95,
    InvalidSignature = 96,
    MissingSignature = 97,
    LoginFailed = 98,
    InsufficientPermissions = 99,
    InvalidApiKey = 100,
    ServiceUnavailable = 105,
    WriteOperationFailed = 106,
    FormatNotFound = 111,
    MethodNotFound = 112,
    InvalidSoapEnvelope = 114,
    InvalidXmlRpcCall = 115,
    BadUrlFound = 116,
}
