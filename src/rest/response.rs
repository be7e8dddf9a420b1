/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::{FailedResponse, FlickrError};
use crate::rest::parsers::{Record, scalar_to_string};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Normalized result of an API call.
///
/// `kind` names the resource the server wrapped the payload in (`photos`,
/// `person`, `photoid`, ...). It is `None` when the body had no single
/// wrapping record.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    kind: Option<String>,
    payload: Value,
}

impl Response {
    pub fn new(kind: Option<String>, payload: Value) -> Self {
        Self { kind, payload }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.value(key)
    }

    /// Text content (`_content`) of the payload
    pub fn content(&self) -> Option<String> {
        self.field("_content")
    }

    /// Deserializes the payload into a caller supplied type
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, FlickrError> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

impl Record for Response {
    fn value(&self, key: &str) -> Option<&Value> {
        self.payload.value(key)
    }
}

/// Turns a raw body into a [`Response`], raising API failures as errors.
///
/// Upload and replace answer in XML whatever format is asked for, everything
/// else is JSON.
pub(crate) fn process_response(
    endpoint: &str,
    body: &str,
    debug: bool,
) -> Result<Response, FlickrError> {
    log::trace!("{endpoint} response body: {body}");
    if debug {
        log::info!(target: "flickr::debug", "{endpoint}: {body}");
    }

    let resp = if body.trim_start().starts_with('<') {
        process_xml(endpoint, body)?
    } else {
        process_json(endpoint, body)?
    };

    if debug {
        log::info!(target: "flickr::debug", "{endpoint} -> {:?}: {}", resp.kind, resp.payload);
    }
    Ok(resp)
}

pub(crate) fn process_json(endpoint: &str, body: &str) -> Result<Response, FlickrError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let mut map = match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => map,
        other => return Ok(Response::new(None, other)),
    };

    let stat = map.remove("stat");
    if stat.as_ref().and_then(Value::as_str) == Some("fail") {
        return Err(FailedResponse::new(
            map.field("message").unwrap_or_default(),
            map.field("code").unwrap_or_default(),
            endpoint,
        )
        .into());
    }

    if map.len() == 1 && map.values().all(Value::is_object) {
        let kind = map.keys().next().cloned().unwrap_or_default();
        let payload = map.remove(&kind).unwrap_or_default();
        return Ok(Response::new(Some(kind), payload));
    }
    Ok(Response::new(None, Value::Object(map)))
}

#[derive(Default)]
struct XmlFields {
    kind: Option<String>,
    stat: Option<String>,
    code: Option<String>,
    msg: Option<String>,
    secret: Option<String>,
    original_secret: Option<String>,
    content: Option<String>,
}

impl XmlFields {
    fn element(&mut self, e: &BytesStart<'_>) -> Result<(), FlickrError> {
        let outer = self.kind.is_none();
        if outer {
            self.kind = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
        }
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let value = attr.unescape_value()?.into_owned();
            let slot = match attr.key.as_ref() {
                b"stat" if outer => &mut self.stat,
                b"code" => &mut self.code,
                b"msg" => &mut self.msg,
                b"secret" => &mut self.secret,
                b"originalsecret" => &mut self.original_secret,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(())
    }
}

/// Upload style responses.
///
/// The outer element names the kind and carries `stat`, a document without it
/// (an HTML error page from a proxy) is rejected. Every other attribute
/// is taken from the first element that has it, the content is the first non
/// blank text node.
pub(crate) fn process_xml(endpoint: &str, body: &str) -> Result<Response, FlickrError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut fields = XmlFields::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => fields.element(&e)?,
            Event::Text(t) if fields.content.is_none() => {
                let text = t.unescape()?;
                if !text.trim().is_empty() {
                    fields.content = Some(text.trim().to_string());
                }
            }
            Event::CData(c) if fields.content.is_none() => {
                let text = String::from_utf8_lossy(&c).trim().to_string();
                if !text.is_empty() {
                    fields.content = Some(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Some(stat) = fields.stat else {
        return Err(FlickrError::UnrecognizedResponse(endpoint.to_string()));
    };
    if stat == "fail" {
        return Err(FailedResponse::new(
            fields.msg.unwrap_or_default(),
            fields.code.unwrap_or_default(),
            endpoint,
        )
        .into());
    }

    let mut payload = Map::new();
    let extracted = [
        ("secret", fields.secret),
        ("originalsecret", fields.original_secret),
        ("_content", fields.content),
    ];
    for (key, value) in extracted {
        if let Some(v) = value {
            payload.insert(key.to_string(), Value::String(v));
        }
    }
    Ok(Response::new(fields.kind, Value::Object(payload)))
}

// Exposed for the catalog: flattens a `{"method": [...]}` style list
pub(crate) fn content_list(resp: &Response, key: &str) -> Option<Vec<Option<String>>> {
    let list = resp.get(key)?.as_array()?;
    Some(list.iter().map(scalar_to_string).collect())
}
