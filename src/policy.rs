/*
 * Copyright (2024) Volcengine
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
use std::fmt::{Display, Formatter};
use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::Formatter as JsonFormatter;

use crate::enumeration::CallType;
use crate::error::{FpError, GenericError};
use crate::internal::{base64_url, base64_url_decode};

/// Restrictions a signed policy places on its bearer.
///
/// Only `expiry` is mandatory. Empty strings, empty call lists and zero sizes are
/// left out of the encoded policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyOptions {
    pub(crate) expiry: Option<DateTime<Utc>>,
    pub(crate) handle: String,
    pub(crate) call: Vec<CallType>,
    pub(crate) max_size: u64,
    pub(crate) min_size: u64,
    pub(crate) path: String,
    pub(crate) container: String,
}

impl PolicyOptions {
    pub fn new(expiry: impl Into<DateTime<Utc>>) -> Self {
        Self {
            expiry: Some(expiry.into()),
            ..Default::default()
        }
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }
    pub fn handle(&self) -> &str {
        &self.handle
    }
    pub fn call(&self) -> &Vec<CallType> {
        &self.call
    }
    pub fn max_size(&self) -> u64 {
        self.max_size
    }
    pub fn min_size(&self) -> u64 {
        self.min_size
    }
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn set_expiry(&mut self, expiry: impl Into<DateTime<Utc>>) {
        self.expiry = Some(expiry.into());
    }
    pub fn set_handle(&mut self, handle: impl Into<String>) {
        self.handle = handle.into();
    }
    pub fn set_call(&mut self, call: impl Into<Vec<CallType>>) {
        self.call = call.into();
    }
    pub fn add_call(&mut self, call: impl Into<CallType>) {
        self.call.push(call.into());
    }
    pub fn set_max_size(&mut self, max_size: u64) {
        self.max_size = max_size;
    }
    pub fn set_min_size(&mut self, min_size: u64) {
        self.min_size = min_size;
    }
    /// Regular expression the target path must match.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
    pub fn set_container(&mut self, container: impl Into<String>) {
        self.container = container.into();
    }
}

// Field order here is the key order of the encoded JSON.
#[derive(Serialize)]
struct CanonicalPolicy<'a> {
    #[serde(skip_serializing_if = "is_empty_str")]
    handle: &'a str,
    #[serde(skip_serializing_if = "is_empty_call")]
    call: &'a [CallType],
    #[serde(rename = "maxsize", skip_serializing_if = "is_zero")]
    max_size: u64,
    #[serde(rename = "minsize", skip_serializing_if = "is_zero")]
    min_size: u64,
    #[serde(skip_serializing_if = "is_empty_str")]
    path: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    container: &'a str,
    expiry: i64,
}

fn is_empty_str(value: &&str) -> bool {
    value.is_empty()
}

fn is_empty_call(value: &&[CallType]) -> bool {
    value.is_empty()
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Compact JSON that escapes `&`, `<`, `>`, U+2028 and U+2029 as `\uXXXX`, the bytes
/// the service's reference encoder produces for the same document.
struct HtmlSafeFormatter;

impl JsonFormatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '&' => "\\u0026",
                '<' => "\\u003c",
                '>' => "\\u003e",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// A policy in its wire form: URL-safe base64 of the canonical JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Policy {
    pub(crate) encoded: String,
}

impl Policy {
    pub fn new(options: &PolicyOptions) -> Result<Self, FpError> {
        let expiry = match options.expiry {
            Some(expiry) if expiry.timestamp() != 0 => expiry.timestamp(),
            _ => return Err(FpError::invalid_policy("expiry is required")),
        };

        let canonical = CanonicalPolicy {
            handle: options.handle.as_str(),
            call: options.call.as_slice(),
            max_size: options.max_size,
            min_size: options.min_size,
            path: options.path.as_str(),
            container: options.container.as_str(),
            expiry,
        };

        let mut buf = Vec::with_capacity(128);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
        if let Err(ex) = canonical.serialize(&mut serializer) {
            return Err(FpError::client_error_with_cause("trans json error", GenericError::JsonError(ex.to_string())));
        }
        Ok(Self {
            encoded: base64_url(buf),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Decodes the policy back into its JSON text.
    pub fn to_json(&self) -> Result<String, FpError> {
        let buf = base64_url_decode(&self.encoded)?;
        match String::from_utf8(buf) {
            Ok(x) => Ok(x),
            Err(e) => Err(FpError::client_error_with_cause("trans string error", GenericError::DefaultError(e.to_string()))),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encoded)
    }
}

impl From<String> for Policy {
    fn from(value: String) -> Self {
        Self { encoded: value }
    }
}

impl From<&str> for Policy {
    fn from(value: &str) -> Self {
        Self { encoded: value.to_string() }
    }
}
