/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::api::ApiClient;
use crate::rest::args::Args;
use crate::rest::config::Config;
use crate::rest::dispatch;
use crate::rest::errors::FlickrError;
use crate::rest::oauth::TokenPair;
use crate::rest::response::{Response, content_list};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Reflection method listing every available method
pub const REFLECTION_METHOD: &str = "flickr.reflection.getMethods";

/// Returns the method catalog, from the cache file when one exists.
///
/// A fresh catalog is written to the cache when a cache location is configured.
pub async fn retrieve_endpoints(
    api: &ApiClient,
    config: &Config,
    access: Option<&TokenPair>,
) -> Result<Vec<String>, FlickrError> {
    if let Some(cache) = &config.cache {
        if cache.exists() {
            log::debug!("Loading method catalog from {}", cache.display());
            return load_cache(cache);
        }
    }

    let resp = dispatch::call(api, config, access, REFLECTION_METHOD, Args::new()).await?;
    let endpoints = endpoint_names(&resp)?;
    log::debug!("Retrieved {} methods", endpoints.len());

    if let Some(cache) = &config.cache {
        dump_cache(cache, &endpoints)?;
    }
    Ok(endpoints)
}

// Flattens `{"method": [{"_content": "flickr.x.y"}, ...]}`
fn endpoint_names(resp: &Response) -> Result<Vec<String>, FlickrError> {
    let names = content_list(resp, "method").ok_or_else(|| {
        FlickrError::MalformedCatalog(format!("no method list in {}", resp.payload()))
    })?;
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            name.ok_or_else(|| FlickrError::MalformedCatalog(format!("entry {i} has no name")))
        })
        .collect()
}

/// Reads a catalog written by [`dump_cache`]
pub fn load_cache(path: &Path) -> Result<Vec<String>, FlickrError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the catalog as a JSON list of method names
pub fn dump_cache(path: &Path, endpoints: &[String]) -> Result<(), FlickrError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, endpoints)?;
    Ok(())
}
