/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate flickr;

use anyhow::Result;
use dotenvy::dotenv;
use flickr::args;
use flickr::rest::{Client, Record, urls};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // The API key/shared secret come from FLICKR_API_KEY/FLICKR_SHARED_SECRET
    let client = Client::from_env().await?;

    let user_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "66956608@N06".to_string());

    // flickr.people.getPhotos
    let photos = client
        .ns("people")?
        .method("getPhotos")?
        .call(args! { "user_id" => user_id.as_str(), "per_page" => 20u32 })
        .await?;

    let list = photos
        .get("photo")
        .and_then(|p| p.as_array())
        .cloned()
        .unwrap_or_default();
    println!(
        "Page {} of {}, {} photos",
        photos.field("page").unwrap_or_default(),
        photos.field("pages").unwrap_or_default(),
        list.len()
    );
    for photo in &list {
        println!(
            "{:<40} {} {}",
            photo.field("title").unwrap_or_default(),
            urls::url_q(photo)?,
            urls::url_short(photo)?
        );
    }
    Ok(())
}
