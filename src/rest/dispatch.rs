/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::api::{ApiClient, Photo};
use crate::rest::args::{Args, build_args};
use crate::rest::config::Config;
use crate::rest::errors::FlickrError;
use crate::rest::oauth::{OAuthParams, TokenPair};
use crate::rest::response::{Response, process_response};

// Access token goes first so a caller override can still replace it
fn signing_params(access: Option<&TokenPair>, overrides: OAuthParams) -> OAuthParams {
    let mut oauth = OAuthParams::new();
    if let Some(access) = access {
        oauth.insert("oauth_token".into(), access.token.clone());
    }
    oauth.extend(overrides);
    oauth
}

/// Calls a REST method by its full dotted name
pub(crate) async fn call(
    api: &ApiClient,
    config: &Config,
    access: Option<&TokenPair>,
    endpoint: &str,
    args: Args,
) -> Result<Response, FlickrError> {
    let (params, overrides) = args.into_parts();
    let oauth = signing_params(access, overrides);
    let body = build_args(params, Some(endpoint));

    let http_response = api
        .post_form(
            &config.endpoints().rest,
            access.map(|a| a.secret.as_str()),
            &oauth,
            &body,
        )
        .await?;
    process_response(endpoint, &http_response.text().await?, config.debug)
}

/// Posts a photo to the upload or replace endpoint
pub(crate) async fn upload(
    api: &ApiClient,
    config: &Config,
    access: Option<&TokenPair>,
    url: &str,
    photo: Photo,
    args: Args,
) -> Result<Response, FlickrError> {
    let (params, overrides) = args.into_parts();
    let oauth = signing_params(access, overrides);
    let body = build_args(params, None);

    let http_response = api
        .post_multipart(url, access.map(|a| a.secret.as_str()), &oauth, &body, photo)
        .await?;
    process_response(url, &http_response.text().await?, config.debug)
}
