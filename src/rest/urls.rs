/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Public urls computed from photo, person and photoset records.
//!
//! These work on anything implementing [`Record`]: a [`crate::rest::Response`]
//! or an entry of a list inside one (`resp.get("photo")`).

use crate::rest::Size;
use crate::rest::errors::FlickrError;
use crate::rest::macros::{short_image_urls, sized_photo_urls};
use crate::rest::parsers::{Record, scalar_to_string};

pub const URL_PROFILE: &str = "https://www.flickr.com/people/";
pub const URL_PHOTOSTREAM: &str = "https://www.flickr.com/photos/";
pub const URL_SHORT: &str = "https://flic.kr/p/";

/// Base58 alphabet without 0, O, I and l
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Encodes a numeric photo id the way short urls do
pub fn base58(mut id: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(BASE58_ALPHABET[(id % 58) as usize]);
        id /= 58;
        if id == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

fn required<R: Record + ?Sized>(r: &R, key: &'static str) -> Result<String, FlickrError> {
    r.field(key).ok_or(FlickrError::MissingField(key))
}

fn photo_source(farm: &str, server: &str, id: &str, secret: &str, size: &str, ext: &str) -> String {
    format!("https://farm{farm}.staticflickr.com/{server}/{id}_{secret}{size}.{ext}")
}

fn gen_url<R: Record + ?Sized>(r: &R, size: &str) -> Result<String, FlickrError> {
    Ok(photo_source(
        &required(r, "farm")?,
        &required(r, "server")?,
        &required(r, "id")?,
        &required(r, "secret")?,
        size,
        "jpg",
    ))
}

/// Default size photo url
pub fn url<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    gen_url(r, "")
}

pub fn url_sized<R: Record + ?Sized>(r: &R, size: Size) -> Result<String, FlickrError> {
    gen_url(r, &size.suffix())
}

sized_photo_urls! {
    /// Small, 240 on the longest side
    url_m => Size::Small,
    /// Small square 75x75
    url_s => Size::SmallSquare,
    url_t => Size::Thumbnail,
    url_b => Size::Large,
    url_z => Size::Medium640,
    url_q => Size::LargeSquare,
    url_n => Size::Small320,
    url_c => Size::Medium800,
    url_h => Size::Large1600,
    url_k => Size::Large2048,
}

/// Original file, using `originalsecret` and `originalformat`
pub fn url_o<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(photo_source(
        &required(r, "farm")?,
        &required(r, "server")?,
        &required(r, "id")?,
        &required(r, "originalsecret")?,
        "_o",
        &required(r, "originalformat")?,
    ))
}

// `owner` is either an nsid or a person record
fn owner_id<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    let owner = r.value("owner").ok_or(FlickrError::MissingField("owner"))?;
    let id = if owner.is_object() {
        owner.field("nsid")
    } else {
        scalar_to_string(owner)
    };
    id.ok_or(FlickrError::MissingField("owner"))
}

pub fn url_profile<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(format!("{URL_PROFILE}{}/", owner_id(r)?))
}

/// Photostream, by path alias when the owner has one
pub fn url_photostream<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    let who = match r.field("pathalias") {
        Some(alias) => alias,
        None => owner_id(r)?,
    };
    Ok(format!("{URL_PHOTOSTREAM}{who}/"))
}

pub fn url_photopage<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(url_photostream(r)? + &required(r, "id")?)
}

pub fn url_photosets<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(url_photostream(r)? + "sets/")
}

pub fn url_photoset<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(url_photosets(r)? + &required(r, "id")?)
}

fn short_id<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    let id = required(r, "id")?;
    id.parse::<u64>()
        .map(base58)
        .map_err(|_| FlickrError::InvalidPhotoId(id))
}

/// flic.kr short url to the photo page
pub fn url_short<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
    Ok(format!("{URL_SHORT}{}", short_id(r)?))
}

short_image_urls! {
    url_short_m => "_m",
    url_short_s => "",
    url_short_t => "_t",
    url_short_q => "_q",
    url_short_n => "_n",
}
