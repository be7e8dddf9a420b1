/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::rest::api::{ApiClient, Photo};
use crate::rest::args::Args;
use crate::rest::catalog::retrieve_endpoints;
use crate::rest::config::Config;
use crate::rest::dispatch;
use crate::rest::errors::FlickrError;
use crate::rest::namespace::{Method, Namespace, Scope};
use crate::rest::oauth::{OAuthParams, TokenPair, TokenResponse};
use crate::rest::response::Response;
use std::sync::Arc;

/// Application credentials, plus an access token when one is already known
#[derive(Default, Clone)]
pub struct Creds {
    api_key: Option<String>,
    shared_secret: Option<String>,
    access_token: Option<String>,
    access_secret: Option<String>,
}

impl Creds {
    pub fn from_tokens(
        api_key: &str,
        shared_secret: Option<&str>,
        access_token: Option<&str>,
        access_secret: Option<&str>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            shared_secret: shared_secret.map(Into::into),
            access_token: access_token.map(Into::into),
            access_secret: access_secret.map(Into::into),
        }
    }

    /// Reads `FLICKR_API_KEY`, `FLICKR_SHARED_SECRET` and optionally
    /// `FLICKR_ACCESS_TOKEN`/`FLICKR_ACCESS_SECRET`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            api_key: var("FLICKR_API_KEY"),
            shared_secret: var("FLICKR_SHARED_SECRET"),
            access_token: var("FLICKR_ACCESS_TOKEN"),
            access_secret: var("FLICKR_ACCESS_SECRET"),
        }
    }

    fn access_pair(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.access_secret) {
            (Some(token), Some(secret)) => Some(TokenPair::new(token, secret)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("api_key", &"xxx")
            .field("shared_secret", &"xxx")
            .field("access_token", &"xxx")
            .field("access_secret", &"xxx")
            .finish()
    }
}

fn required(value: Option<String>, what: &str) -> Result<String, FlickrError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FlickrError::AppNotConfigured(format!("No {what} defined!")))
}

/// Entry point to the API.
///
/// Methods are reached through the namespace tree built from the server's
/// method catalog:
///
/// ```no_run
/// # async fn demo() -> Result<(), flickr::rest::FlickrError> {
/// use flickr::args;
/// use flickr::rest::{Client, Creds};
///
/// let client = Client::new(Creds::from_tokens("key", Some("secret"), None, None)).await?;
/// let photos = client
///     .ns("people")?
///     .method("getPhotos")?
///     .call(args! { "user_id" => "12037949754@N01" })
///     .await?;
/// assert_eq!(photos.kind(), Some("photos"));
/// # Ok(())
/// # }
/// ```
pub struct Client {
    api_client: ApiClient,
    config: &'static Config,
    access: Option<TokenPair>,
    namespace: Arc<Namespace>,
}

impl Client {
    /// Creates a client, building the shared namespace tree if this is the
    /// first client of the process.
    ///
    /// Missing application credentials fail before any request is made.
    pub async fn new(creds: Creds) -> Result<Self, FlickrError> {
        let access = creds.access_pair();
        let api_key = required(creds.api_key, "API key")?;
        let shared_secret = required(creds.shared_secret, "shared secret")?;

        let config = Config::global();
        let api_client = ApiClient::new(&api_key, &shared_secret, config)?;
        let (api, token) = (&api_client, access.as_ref());
        let namespace = Namespace::shared(move || retrieve_endpoints(api, config, token)).await?;

        Ok(Self {
            api_client,
            config,
            access,
            namespace,
        })
    }

    /// Creates a client from the `FLICKR_*` environment variables
    pub async fn from_env() -> Result<Self, FlickrError> {
        Self::new(Creds::from_env()).await
    }

    /// Calls a method by its full dotted name.
    ///
    /// Entries added with [`Args::with_oauth`] only reach the signature.
    pub async fn call(&self, endpoint: &str, args: Args) -> Result<Response, FlickrError> {
        dispatch::call(
            &self.api_client,
            self.config,
            self.access.as_ref(),
            endpoint,
            args,
        )
        .await
    }

    /// Root of the namespace tree
    pub fn root(&self) -> Scope<'_> {
        Scope::new(self, self.namespace.root())
    }

    /// Top level namespace such as `people` or `photos`
    pub fn ns(&self, segment: &str) -> Result<Scope<'_>, FlickrError> {
        self.root().ns(segment)
    }

    /// Resolves a dotted method path, with or without the leading `flickr.`
    pub fn method(&self, path: &str) -> Result<Method<'_>, FlickrError> {
        self.namespace
            .endpoint(path)
            .map(|endpoint| Method::new(self, endpoint))
            .ok_or_else(|| FlickrError::UnknownMethod(path.to_string()))
    }

    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }

    pub fn access_token(&self) -> Option<&TokenPair> {
        self.access.as_ref()
    }

    pub fn set_access_token(&mut self, access: Option<TokenPair>) {
        self.access = access;
    }

    /// Gets a request token. Pass `oauth_callback` through
    /// [`Args::with_oauth`], it defaults to `oob`.
    pub async fn get_request_token(&self, args: Args) -> Result<TokenResponse, FlickrError> {
        let (_, oauth) = args.into_parts();
        self.api_client
            .request_token(&self.config.endpoints().oauth_request_token, &oauth)
            .await
    }

    /// Url where the user authorizes the request token, e.g. with `perms`
    pub fn get_authorize_url(&self, token: &str, args: Args) -> Result<String, FlickrError> {
        let (mut params, _) = args.into_parts();
        params.insert("oauth_token".into(), token.into());
        self.api_client
            .authorize_url(&self.config.endpoints().oauth_authorize, &params)
    }

    /// Exchanges the authorized request token for an access token and keeps it
    pub async fn get_access_token(
        &mut self,
        token: &str,
        secret: &str,
        verifier: &str,
    ) -> Result<TokenResponse, FlickrError> {
        let mut oauth = OAuthParams::new();
        oauth.insert("oauth_token".into(), token.into());
        oauth.insert("oauth_verifier".into(), verifier.into());
        let resp = self
            .api_client
            .access_token(&self.config.endpoints().oauth_access_token, secret, &oauth)
            .await?;
        self.access = Some(resp.pair()?);
        Ok(resp)
    }

    /// Uploads a new photo. See the upload API for `title`, `description`, ...
    pub async fn upload_photo(&self, photo: Photo, args: Args) -> Result<Response, FlickrError> {
        let url = self.config.endpoints().upload;
        self.upload(&url, photo, args).await
    }

    /// Replaces the photo given by the `photo_id` argument
    pub async fn replace_photo(&self, photo: Photo, args: Args) -> Result<Response, FlickrError> {
        let url = self.config.endpoints().replace;
        self.upload(&url, photo, args).await
    }

    async fn upload(&self, url: &str, photo: Photo, args: Args) -> Result<Response, FlickrError> {
        dispatch::upload(
            &self.api_client,
            self.config,
            self.access.as_ref(),
            url,
            photo,
            args,
        )
        .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_client", &self.api_client)
            .field("access", &self.access)
            .field("namespace_nodes", &self.namespace.node_count())
            .finish()
    }
}
