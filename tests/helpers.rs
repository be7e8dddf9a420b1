/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Minimal stand in for the Flickr services, one thread per connection.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flickr::rest::{Config, Creds, Endpoints};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const API_KEY: &str = "test-key";
pub const SHARED_SECRET: &str = "test-secret";

#[allow(dead_code)]
pub const CATALOG: &[&str] = &[
    "flickr.test.echo",
    "flickr.test.login",
    "flickr.people.getPhotos",
    "flickr.people.getInfo",
    "flickr.photos.search",
    "flickr.photos.comments.getList",
    "flickr.photos.comments.addComment",
    "flickr.reflection.getMethods",
];

pub static REFLECTION_CALLS: AtomicUsize = AtomicUsize::new(0);

#[allow(dead_code)]
pub fn reflection_calls() -> usize {
    REFLECTION_CALLS.load(Ordering::SeqCst)
}

#[allow(dead_code)]
pub fn creds() -> Creds {
    Creds::from_tokens(API_KEY, Some(SHARED_SECRET), None, None)
}

/// Starts the stub once and installs a config pointing at it
pub fn install_stub_config(cache: Option<PathBuf>) -> &'static str {
    static BASE: OnceLock<String> = OnceLock::new();
    BASE.get_or_init(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        let base = start_stub().unwrap();
        Config {
            cache,
            debug: true,
            endpoints: Endpoints::new(&base, &base),
            ..Config::default()
        }
        .install()
        .unwrap();
        base
    })
}

fn start_stub() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    std::thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            std::thread::spawn(move || {
                let _ = handle(stream);
            });
        }
    });
    Ok(format!("http://{addr}/services"))
}

pub struct StubRequest {
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl StubRequest {
    fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or_default()
    }

    fn form(&self) -> BTreeMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    // Parameters of the `Authorization: OAuth ...` header
    fn oauth(&self) -> BTreeMap<String, String> {
        let header = self.header("authorization");
        let fields = header.strip_prefix("OAuth ").unwrap_or_default();
        fields
            .split(", ")
            .filter_map(|field| field.split_once('='))
            .map(|(k, v)| {
                let v = urlencoding::decode(v.trim_matches('"'))
                    .map(|v| v.into_owned())
                    .unwrap_or_default();
                (k.to_string(), v)
            })
            .collect()
    }

    fn signature_valid(&self, params: &BTreeMap<String, String>) -> bool {
        let enc = |s: &str| urlencoding::encode(s).into_owned();
        let oauth = self.oauth();
        let Some(signature) = oauth.get("oauth_signature") else {
            return false;
        };
        let token_secret = match oauth.get("oauth_token").map(String::as_str) {
            Some("acc-token") => "acc-secret",
            Some("req-token") => "req-secret",
            _ => "",
        };

        let mut pairs: Vec<(String, String)> = oauth
            .iter()
            .filter(|(k, _)| k.as_str() != "oauth_signature")
            .chain(params.iter())
            .map(|(k, v)| (enc(k), enc(v)))
            .collect();
        pairs.sort();
        let normalized = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("http://{}{}", self.header("host"), self.path);
        let base = format!("POST&{}&{}", enc(&url), enc(&normalized));

        let key = format!("{}&{}", enc(SHARED_SECRET), enc(token_secret));
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes()).unwrap();
        mac.update(base.as_bytes());
        BASE64.encode(mac.finalize().into_bytes()) == *signature
    }
}

fn handle(mut stream: TcpStream) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let path = line.split_whitespace().nth(1).unwrap_or("/").to_string();

    let mut headers = BTreeMap::new();
    loop {
        line.clear();
        reader.read_line(&mut line)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((k, v)) = trimmed.split_once(':') {
            headers.insert(k.trim().to_ascii_lowercase(), v.trim().to_string());
        }
    }

    let mut body = Vec::new();
    if headers.get("transfer-encoding").map(String::as_str) == Some("chunked") {
        loop {
            line.clear();
            reader.read_line(&mut line)?;
            let size = usize::from_str_radix(line.trim(), 16).unwrap_or(0);
            let mut chunk = vec![0u8; size + 2];
            reader.read_exact(&mut chunk)?;
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    } else {
        let length: usize = headers
            .get("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        body.resize(length, 0);
        reader.read_exact(&mut body)?;
    }

    let req = StubRequest {
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let (status, content_type, body) = route(&req);
    write!(
        stream,
        "HTTP/1.1 {status} Stub\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

fn json(body: String) -> (u16, &'static str, String) {
    (200, "application/json", body)
}

fn fail(code: u32, message: &str) -> (u16, &'static str, String) {
    json(format!(r#"{{"stat":"fail","code":{code},"message":"{message}"}}"#))
}

fn xml(body: &str) -> (u16, &'static str, String) {
    (200, "text/xml; charset=utf-8", body.to_string())
}

fn route(req: &StubRequest) -> (u16, &'static str, String) {
    let oauth = req.oauth();
    if oauth.get("oauth_consumer_key").map(String::as_str) != Some(API_KEY) {
        return fail(100, "Invalid API Key (Key not found)");
    }

    if req.path.ends_with("/rest/") {
        let form = req.form();
        if !req.signature_valid(&form) {
            return fail(96, "Invalid signature");
        }
        rest(&form, &oauth)
    } else if req.path.ends_with("/upload/") || req.path.ends_with("/replace/") {
        upload(req)
    } else if req.path.ends_with("/oauth/request_token") {
        if !req.signature_valid(&BTreeMap::new()) {
            return (401, "text/plain", "oauth_problem=signature_invalid".into());
        }
        (
            200,
            "text/plain",
            "oauth_callback_confirmed=true&oauth_token=req-token&oauth_token_secret=req-secret"
                .into(),
        )
    } else if req.path.ends_with("/oauth/access_token") {
        let verified = oauth.get("oauth_verifier").map(String::as_str) == Some("good-verifier")
            && oauth.get("oauth_token").map(String::as_str) == Some("req-token");
        if !req.signature_valid(&BTreeMap::new()) || !verified {
            return (401, "text/plain", "oauth_problem=token_rejected".into());
        }
        (
            200,
            "text/plain",
            "fullname=Jane%20Doe&oauth_token=acc-token&oauth_token_secret=acc-secret&user_nsid=12%40N01&username=jane"
                .into(),
        )
    } else {
        (404, "text/plain", "not found".into())
    }
}

fn rest(form: &BTreeMap<String, String>, oauth: &BTreeMap<String, String>) -> (u16, &'static str, String) {
    let method = form.get("method").map(String::as_str).unwrap_or_default();
    match method {
        "flickr.reflection.getMethods" => {
            REFLECTION_CALLS.fetch_add(1, Ordering::SeqCst);
            let methods: Vec<String> = CATALOG
                .iter()
                .map(|m| format!(r#"{{"_content":"{m}"}}"#))
                .collect();
            json(format!(
                r#"{{"methods":{{"method":[{}]}},"stat":"ok"}}"#,
                methods.join(",")
            ))
        }
        "flickr.test.echo" => {
            let mut out = serde_json::Map::new();
            for (k, v) in form {
                out.insert(k.clone(), serde_json::json!({ "_content": v }));
            }
            let signed: serde_json::Map<String, serde_json::Value> = oauth
                .iter()
                .filter(|(k, _)| {
                    !matches!(
                        k.as_str(),
                        "oauth_nonce" | "oauth_timestamp" | "oauth_signature"
                    )
                })
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            out.insert("signed".into(), serde_json::Value::Object(signed));
            out.insert("stat".into(), "ok".into());
            json(serde_json::Value::Object(out).to_string())
        }
        "flickr.test.login" => match oauth.get("oauth_token").map(String::as_str) {
            Some("acc-token") => json(
                r#"{"user":{"id":"12@N01","username":{"_content":"jane"}},"stat":"ok"}"#.into(),
            ),
            _ => fail(99, "Insufficient permissions. Method requires read privileges; none granted."),
        },
        "flickr.people.getPhotos" => json(
            r#"{"photos":{"page":1,"pages":1,"perpage":100,"total":2,"photo":[
                {"id":"2985209085","owner":"12@N01","secret":"abc","server":"2","farm":1,"title":"One","ispublic":1},
                {"id":"123","owner":"12@N01","secret":"def","server":"3","farm":2,"title":"Two","ispublic":0}
            ]},"stat":"ok"}"#
                .into(),
        ),
        "flickr.people.getInfo" => fail(1, "User not found"),
        other => fail(112, &format!("Method \\\"{other}\\\" not found")),
    }
}

fn upload(req: &StubRequest) -> (u16, &'static str, String) {
    if !req.body.contains("name=\"photo\"") {
        return xml(r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="fail">
	<err code="2" msg="No photo specified" />
</rsp>
"#);
    }
    if req.body.contains("FAILME") {
        return xml(r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="fail">
	<err code="5" msg="Filetype was not recognised" />
</rsp>
"#);
    }
    if req.path.ends_with("/replace/") {
        return xml(r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="ok">
<photoid secret="abc" originalsecret="def">67890</photoid>
</rsp>
"#);
    }
    xml(r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="ok">
<photoid>12345</photoid>
</rsp>
"#)
}
