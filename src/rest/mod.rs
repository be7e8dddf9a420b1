/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

mod macros;
mod parsers;
mod dispatch;
pub mod api;
pub mod args;
pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod namespace;
pub mod oauth;
pub mod properties;
pub mod response;
pub mod urls;

pub use api::*;
pub use args::*;
pub use client::*;
pub use config::*;
pub use errors::*;
pub use namespace::*;
pub use oauth::{TokenPair, TokenResponse};
pub use parsers::Record;
pub use properties::*;
pub use response::*;
