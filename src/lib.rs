/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Flickr
//!
//! This Flickr library was created for working with the Flickr REST API.
//!
//! For further details on the Rest API refer to the [Flickr API Docs](https://www.flickr.com/services/api/)
//!
//! ## Features
//!
//! - Every API method, discovered from the server's own method catalog
//!     - Methods are grouped in namespaces (`people`, `photos.comments`, ...)
//!     - The catalog can be cached on disk between runs
//! - OAuth1 request signing and the request/authorize/access token handshake
//! - Photo upload and replace
//! - JSON and upload XML responses normalized into one [`rest::Response`] type
//! - Helpers for photo, profile and flic.kr short urls
//!
//! *Credentials storage is left up to the consumer of this library. The
//! [`rest::Client`] can perform the OAuth1 handshake or take an existing
//! access token/secret.*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! flickr = "0.3.0"
//! ```
//!
//! ## Usage
//!
//! **You will need to acquire an API key/shared secret from Flickr prior to using the API**
//!
//! ```rust,no_run
//! use flickr::args;
//! use flickr::rest::{Client, Creds, urls};
//!
//!async fn list_photos(api_key: &str, shared_secret: &str, user_id: &str) -> anyhow::Result<()> {
//!    // The first client of the process fetches the method catalog and
//!    // builds the namespace tree, later ones reuse it
//!    let client = Client::new(Creds::from_tokens(api_key, Some(shared_secret), None, None)).await?;
//!
//!    // flickr.people.getPhotos
//!    let photos = client
//!        .ns("people")?
//!        .method("getPhotos")?
//!        .call(args! { "user_id" => user_id, "per_page" => 10u32 })
//!        .await?;
//!
//!    for photo in photos.get("photo").and_then(|p| p.as_array()).into_iter().flatten() {
//!        println!("{}", urls::url_z(photo)?);
//!    }
//!    Ok(())
//!}
//! ```
//!
pub mod rest;
