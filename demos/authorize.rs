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
use flickr::rest::{Args, Client, Perms, Record};
use std::io::BufRead;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut client = Client::from_env().await?;

    // Out of band callback, the user copies the verifier by hand
    let request = client.get_request_token(Args::new()).await?.pair()?;
    let url = client.get_authorize_url(&request.token, args! { "perms" => Perms::Read })?;
    println!("Open this url in your browser and authorize the application:\n{url}");
    println!("Then paste the verifier code here:");

    let mut verifier = String::new();
    std::io::stdin().lock().read_line(&mut verifier)?;

    let access = client
        .get_access_token(&request.token, &request.secret, verifier.trim())
        .await?;
    println!(
        "Authorized as {} ({})",
        access.get("username").unwrap_or_default(),
        access.get("user_nsid").unwrap_or_default()
    );
    if let Some(pair) = client.access_token() {
        println!("FLICKR_ACCESS_TOKEN={}", pair.token);
        println!("FLICKR_ACCESS_SECRET={}", pair.secret);
    }

    let login = client.method("test.login")?.call(Args::new()).await?;
    println!("test.login: {}", login.field("username").unwrap_or_default());
    Ok(())
}
