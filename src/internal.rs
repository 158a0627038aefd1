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
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::log::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::blob::Blob;
use crate::common::{RequestInfo, RequestInfoTrait};
use crate::config::ConfigHolder;
use crate::constant::{ALLOWED_IN_URL, DEFAULT_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE_FOR_JSON, QUERY_KEY, QUERY_POLICY, QUERY_SIGNATURE, TRUE};
use crate::enumeration::MetaTagType;
use crate::error::{FpError, GenericError};
use crate::http::{HttpRequest, HttpResponse};
use crate::security::Security;

pub(crate) fn url_encode(input: &str) -> String {
    if input == "" {
        return "".to_string();
    }

    let mut temp = String::with_capacity(input.len() * 2);
    for i in input.as_bytes() {
        if let Some(_) = ALLOWED_IN_URL.find(*i as char) {
            temp.push(*i as char);
        } else {
            temp.push('%');
            temp.push_str(format!("{:02X}", i).as_str());
        }
    }
    temp
}

pub(crate) fn base64_url(data: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(data)
}

pub(crate) fn base64_url_decode(data: impl AsRef<[u8]>) -> Result<Vec<u8>, FpError> {
    match URL_SAFE.decode(data) {
        Ok(x) => Ok(x),
        Err(e) => Err(FpError::client_error_with_cause("decode base64 error", GenericError::DefaultError(e.to_string()))),
    }
}

pub(crate) fn hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(input)
}

pub(crate) fn hmac_sha256(input: impl AsRef<[u8]>, sign_key: impl AsRef<[u8]>) -> Result<impl AsRef<[u8]>, FpError> {
    match Hmac::<Sha256>::new_from_slice(sign_key.as_ref()) {
        Ok(mut m) => {
            m.update(input.as_ref());
            Ok(m.finalize().into_bytes())
        }
        Err(e) => {
            Err(FpError::client_error_with_cause("new hmac sha256 error", GenericError::DefaultError(e.to_string())))
        }
    }
}

pub(crate) fn map_insert<'a>(map: &mut HashMap<&'a str, String>, key: &'a str, value: &str) {
    if value == "" {
        return;
    }
    map.insert(key, value.to_string());
}

pub(crate) fn map_insert_bool<'a>(map: &mut HashMap<&'a str, String>, key: &'a str, value: bool) {
    if value {
        map.insert(key, TRUE.to_string());
    }
}

pub(crate) fn map_insert_number<'a, N>(map: &mut HashMap<&'a str, String>, key: &'a str, value: N)
where
    N: PartialEq + Default + ToString,
{
    if value != N::default() {
        map.insert(key, value.to_string());
    }
}

pub(crate) fn set_api_key<'a>(map: &mut HashMap<&'a str, String>, config_holder: &ConfigHolder) {
    map_insert(map, QUERY_KEY, &config_holder.api_key);
}

/// Adds `policy` and `signature` together, or neither of them.
pub(crate) fn set_security_query<I: SecurityQuery>(map: &mut HashMap<&str, String>, input: &I) {
    if let Some(security) = input.security() {
        if security.is_empty() {
            return;
        }
        map.insert(QUERY_POLICY, security.policy().as_str().to_string());
        map.insert(QUERY_SIGNATURE, security.signature().to_string());
    }
}

/// Each requested tag becomes its own `<tag>=true` parameter.
pub(crate) fn set_tags_query<'a>(map: &mut HashMap<&'a str, String>, tags: &'a [MetaTagType]) {
    for tag in tags {
        map.insert(tag.as_str(), TRUE.to_string());
    }
}

pub(crate) trait SecurityQuery {
    fn security(&self) -> &Option<Security>;
}

pub(crate) trait BlobTarget {
    fn blob(&self) -> &Blob;
}

pub(crate) trait InputDescriptor {
    fn operation(&self) -> &str;
}

pub(crate) trait InputTranslator: InputDescriptor {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError>;

    /// A request addressed to the input's file, optionally under a sub path.
    fn trans_blob(&self, sub_path: &str) -> Result<HttpRequest<'_>, FpError>
    where
        Self: BlobTarget,
    {
        let mut request = HttpRequest::default();
        request.operation = self.operation();
        request.request_url = blob_request_url(self.blob(), sub_path)?;
        Ok(request)
    }
}

pub(crate) trait OutputParser: Sized {
    fn parse_by_ref(request: &HttpRequest, response: &mut HttpResponse, request_info: RequestInfo) -> Result<Self, FpError>;
    fn parse(request: HttpRequest, response: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let mut response = response;
        Self::parse_by_ref(&request, &mut response, request_info)
    }
}

/// Logs the outcome of one call and stamps the request url onto a failure.
pub(crate) fn log_result<K>(operation: &str, elapsed_ms: u128, request_url: Option<String>, result: Result<K, FpError>) -> Result<K, FpError>
where
    K: RequestInfoTrait,
{
    match result {
        Ok(k) => {
            info!("do {} succeed, http status: {}, cost: {} ms", operation, k.status_code(), elapsed_ms);
            Ok(k)
        }
        Err(mut e) => {
            match &e {
                FpError::ServiceError { code, .. } => {
                    if *code < 500 {
                        warn!("do {} finished, http status: {}, cost: {} ms, error: {}", operation, code, elapsed_ms, e);
                    } else {
                        info!("do {} finished, http status: {}, cost: {} ms, error: {}", operation, code, elapsed_ms, e);
                    }
                }
                _ => {
                    warn!("do {} failed, cost: {} ms, error: {}", operation, elapsed_ms, e);
                }
            }
            if let Some(request_url) = request_url {
                e.set_request_url(request_url);
            }
            Err(e)
        }
    }
}

pub(crate) fn blob_request_url(blob: &Blob, sub_path: &str) -> Result<String, FpError> {
    if blob.url().trim() == "" {
        return Err(FpError::client_error("empty blob url"));
    }
    let mut url = match Url::parse(blob.url().trim()) {
        Ok(u) => u,
        Err(e) => return Err(FpError::client_error_with_cause("parse blob url error", GenericError::UrlParseError(e))),
    };
    url.set_query(None);
    url.set_fragment(None);
    if sub_path != "" {
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.pop_if_empty().push(sub_path);
            }
            Err(_) => return Err(FpError::client_error(format!("invalid blob url {}", blob.url()))),
        }
    }
    Ok(url.to_string())
}

/// Query or form text with keys in lexicographic order.
pub(crate) fn encode_query(query: &HashMap<&str, String>) -> String {
    let mut pairs: Vec<(&&str, &String)> = query.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let mut result = String::with_capacity(query.len() * 16);
    for (idx, (key, value)) in pairs.iter().enumerate() {
        if idx > 0 {
            result.push('&');
        }
        result.push_str(&url_encode(key));
        result.push('=');
        result.push_str(&url_encode(value));
    }
    result
}

pub(crate) fn get_request_url(request: &HttpRequest) -> String {
    let mut request_url = request.request_url.clone();
    if let Some(query) = request.query.as_ref() {
        if query.len() > 0 {
            request_url.push('?');
            request_url.push_str(&encode_query(query));
        }
    }
    request_url
}

pub(crate) fn trans_header_value(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(v) => v.to_string(),
        Err(_) => "".to_string(),
    }
}

pub(crate) fn trans_header(header: &HeaderMap) -> HashMap<String, String> {
    let mut result = HashMap::<String, String>::with_capacity(header.len());
    for (key, value) in header {
        result.insert(key.to_string(), trans_header_value(value));
    }
    result
}

pub(crate) fn get_header_value(header: &HeaderMap, key: &str) -> String {
    match header.get(key) {
        Some(value) => trans_header_value(value).trim().to_string(),
        None => "".to_string(),
    }
}

pub(crate) fn parse_json_by_buf<T>(buf: &[u8]) -> Result<T, FpError>
where
    T: DeserializeOwned,
{
    match serde_json::from_slice::<T>(buf) {
        Err(e) => Err(FpError::client_error_with_cause("parse json error", GenericError::JsonError(e.to_string()))),
        Ok(item) => Ok(item),
    }
}

pub(crate) fn read_response(response: &mut HttpResponse) -> Result<Vec<u8>, FpError> {
    let mut buf = match response.content_length() {
        Some(x) if (x as usize) <= MAX_READ_BUFFER_SIZE_FOR_JSON => Vec::with_capacity(x as usize),
        _ => Vec::with_capacity(DEFAULT_READ_BUFFER_SIZE),
    };
    let mut reader = Read::take(response, MAX_READ_BUFFER_SIZE_FOR_JSON as u64 + 1);
    if let Err(e) = reader.read_to_end(&mut buf) {
        return Err(FpError::transport_error("read response error", GenericError::IoError(e.to_string())));
    }
    if buf.len() > MAX_READ_BUFFER_SIZE_FOR_JSON {
        return Err(FpError::client_error("response body exceeds the maximum size"));
    }
    Ok(buf)
}

pub(crate) fn parse_json<T>(response: &mut HttpResponse) -> Result<T, FpError>
where
    T: DeserializeOwned,
{
    let buf = read_response(response)?;
    parse_json_by_buf(buf.as_slice())
}

pub(crate) fn load_file_to_buf(file_path: &str) -> Result<Vec<u8>, FpError> {
    match File::open(file_path) {
        Err(ex) => Err(FpError::local_io_error(format!("open file {} error", file_path), GenericError::IoError(ex.to_string()))),
        Ok(mut fd) => {
            let mut buf = Vec::new();
            match fd.read_to_end(&mut buf) {
                Err(ex) => Err(FpError::local_io_error(format!("read file {} error", file_path), GenericError::IoError(ex.to_string()))),
                Ok(_) => Ok(buf)
            }
        }
    }
}

/// Name sent with a multipart upload: the explicit name, else the last component of the path.
pub(crate) fn upload_file_name(file_name: &str, file_path: &str) -> String {
    if file_name != "" {
        return file_name.to_string();
    }
    match Path::new(file_path).file_name() {
        Some(x) => x.to_string_lossy().to_string(),
        None => "".to_string(),
    }
}

/// Where a download lands. A path that is empty, names a directory or has no file
/// component takes its file name from the response's `X-File-Name` header.
pub(crate) fn resolve_download_path(file_path: &str, header_file_name: &str, handle: &str) -> Result<PathBuf, FpError> {
    let path = Path::new(file_path);
    let is_dir = file_path == "" || file_path.ends_with('/') || file_path.ends_with(MAIN_SEPARATOR)
        || path.file_name().is_none() || path.is_dir();
    if !is_dir {
        return Ok(path.to_path_buf());
    }

    // only the last component of the header counts, so it cannot escape the directory
    match Path::new(header_file_name.trim()).file_name() {
        Some(name) => Ok(path.join(name)),
        None => Err(FpError::naming_error(format!("invalid file name (handle {:?})", handle))),
    }
}

/// A sibling of `final_file_path` the body is streamed into before the final rename.
pub(crate) fn temp_download_path(final_file_path: &Path) -> PathBuf {
    let temp_name = format!(".{}.download", Uuid::new_v4());
    match final_file_path.parent() {
        Some(p) if p.as_os_str().len() > 0 => p.join(temp_name),
        _ => PathBuf::from(temp_name),
    }
}
