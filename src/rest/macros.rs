/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

/// Builds [`Args`](crate::rest::Args) from `key => value` pairs.
///
/// ```
/// use flickr::args;
/// let args = args! { "user_id" => "12@N01", "per_page" => 10u32, "safe" => true };
/// assert_eq!(args.get("per_page"), Some("10"));
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::rest::Args::new() };
    ( $( $k:expr => $v:expr ),+ $(,)? ) => {{
        let mut args = $crate::rest::Args::new();
        $( args.set($k, $v); )+
        args
    }};
}

// One photo url function per size suffix
macro_rules! sized_photo_urls {
    ( $( $(#[$doc:meta])* $name:ident => $size:expr ),+ $(,)? ) => {
        $(
            $(#[$doc])*
            pub fn $name<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
                url_sized(r, $size)
            }
        )+
    };
}

// One short url function per image suffix
macro_rules! short_image_urls {
    ( $( $name:ident => $suffix:expr ),+ $(,)? ) => {
        $(
            pub fn $name<R: Record + ?Sized>(r: &R) -> Result<String, FlickrError> {
                Ok(format!("{}img/{}{}.jpg", URL_SHORT, short_id(r)?, $suffix))
            }
        )+
    };
}

pub(crate) use {short_image_urls, sized_photo_urls};
