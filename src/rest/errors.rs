/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::rest::ApiErrorCode;
use std::fmt;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum FlickrError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Application not configured. {0}")]
    AppNotConfigured(String),

    #[error("Process configuration was already installed")]
    ConfigAlreadyInstalled(),

    #[error("Invalid namespace in endpoint: {0}")]
    InvalidNamespace(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Method catalog is malformed: {0}")]
    MalformedCatalog(String),

    #[error(transparent)]
    Failed(#[from] FailedResponse),

    #[error("Unrecognized response body from {0}")]
    UnrecognizedResponse(String),

    #[error("OAuth error. status: {status}, body: {body}")]
    OAuth { status: u16, body: String },

    #[error("Record is missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid photo id: {0}")]
    InvalidPhotoId(String),
}

/// Failure reported by the API itself (`stat="fail"`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct FailedResponse {
    /// Human readable message from the server
    pub message: String,

    /// Error code as sent by the server
    pub code: String,

    /// Endpoint identifier the request was made against
    pub method: String,
}

impl FailedResponse {
    pub fn new(
        message: impl Into<String>,
        code: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            method: method.into(),
        }
    }

    /// Maps the code onto one of the globally documented error codes
    pub fn known_code(&self) -> Option<ApiErrorCode> {
        self.code
            .parse::<u32>()
            .ok()
            .and_then(|c| ApiErrorCode::try_from(c).ok())
    }
}

impl fmt::Display for FailedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' - {}", self.method, self.message)
    }
}
