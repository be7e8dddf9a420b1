/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use std::path::PathBuf;
use std::sync::OnceLock;

// Root Flickr API
pub const API_ORIGIN: &str = "https://api.flickr.com/services";

// Root for the upload and replace endpoints
pub const UPLOAD_ORIGIN: &str = "https://up.flickr.com/services";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Locations of every endpoint the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub rest: String,
    pub upload: String,
    pub replace: String,
    pub oauth_request_token: String,
    pub oauth_authorize: String,
    pub oauth_access_token: String,
}

impl Endpoints {
    /// Derives all endpoints from the API and upload service roots
    pub fn new(api_base: &str, upload_base: &str) -> Self {
        let api_base = api_base.trim_end_matches('/');
        let upload_base = upload_base.trim_end_matches('/');
        Self {
            rest: format!("{api_base}/rest/"),
            upload: format!("{upload_base}/upload/"),
            replace: format!("{upload_base}/replace/"),
            oauth_request_token: format!("{api_base}/oauth/request_token"),
            oauth_authorize: format!("{api_base}/oauth/authorize"),
            oauth_access_token: format!("{api_base}/oauth/access_token"),
        }
    }

    fn insecure(&self) -> Self {
        let downgrade = |u: &String| match u.strip_prefix("https://") {
            Some(rest) => format!("http://{rest}"),
            None => u.clone(),
        };
        Self {
            rest: downgrade(&self.rest),
            upload: downgrade(&self.upload),
            replace: downgrade(&self.replace),
            oauth_request_token: downgrade(&self.oauth_request_token),
            oauth_authorize: downgrade(&self.oauth_authorize),
            oauth_access_token: downgrade(&self.oauth_access_token),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(API_ORIGIN, UPLOAD_ORIGIN)
    }
}

/// Process wide settings read by every [`crate::rest::Client`].
///
/// Install once at startup with [`Config::install`]. If nothing was installed
/// the first client falls back to [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy url used for every request. `None` connects directly.
    pub proxy: Option<String>,

    /// Use `https` for the endpoints. When false they are downgraded to `http`.
    pub secure: bool,

    /// Verify the server certificate
    pub check_certificate: bool,

    /// PEM file with additional CA certificates
    pub ca_file: Option<PathBuf>,

    /// Directory of PEM files with additional CA certificates
    pub ca_path: Option<PathBuf>,

    /// File used to store the method catalog between runs
    pub cache: Option<PathBuf>,

    /// Log raw response payloads under the `flickr::debug` target
    pub debug: bool,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            secure: true,
            check_certificate: true,
            ca_file: None,
            ca_path: None,
            cache: None,
            debug: false,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Reads the settings from `FLICKR_*` environment variables
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let flag = |name: &str, default: bool| {
            var(name).map_or(default, |v| !matches!(v.as_str(), "0" | "false" | "no"))
        };
        Self {
            proxy: var("FLICKR_PROXY"),
            secure: flag("FLICKR_SECURE", true),
            check_certificate: flag("FLICKR_CHECK_CERTIFICATE", true),
            ca_file: var("FLICKR_CA_FILE").map(PathBuf::from),
            ca_path: var("FLICKR_CA_PATH").map(PathBuf::from),
            cache: var("FLICKR_CACHE").map(PathBuf::from),
            debug: flag("FLICKR_DEBUG", false),
            endpoints: Endpoints::default(),
        }
    }

    /// Publishes this configuration for the rest of the process
    pub fn install(self) -> Result<&'static Config, FlickrError> {
        CONFIG
            .set(self)
            .map_err(|_| FlickrError::ConfigAlreadyInstalled())?;
        Ok(Self::global())
    }

    /// Returns the installed configuration
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }

    /// Endpoints with the scheme toggle applied
    pub fn endpoints(&self) -> Endpoints {
        if self.secure {
            self.endpoints.clone()
        } else {
            self.endpoints.insecure()
        }
    }
}
