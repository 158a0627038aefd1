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
use std::fs;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use filepicker_generic::{BlobSetter, RequestInfo, SecurityQuery};

use crate::blob::{Blob, BlobOutput};
use crate::common::RequestInfo;
use crate::config::ConfigHolder;
use crate::constant::*;
use crate::enumeration::HttpMethodType::{HttpMethodDelete, HttpMethodPost};
use crate::enumeration::MetaTagType;
use crate::error::{FpError, GenericError};
use crate::http::{HttpBody, HttpRequest, HttpResponse, MultipartContent};
use crate::internal::{get_header_value, map_insert_bool, parse_json, resolve_download_path, set_api_key, set_security_query, set_tags_query, temp_download_path, upload_file_name, InputDescriptor, InputTranslator, OutputParser, SecurityQuery};
use crate::metadata::Metadata;
use crate::security::Security;

pub trait FileAPI {
    /// Replaces the content of an existing file with a local file.
    fn write_from_file(&self, input: &WriteFromFileInput) -> Result<BlobOutput, FpError>;
    fn write_from_buffer(&self, input: &WriteFromBufferInput) -> Result<BlobOutput, FpError>;
    /// Replaces the content of an existing file with whatever `url` serves.
    fn write_from_url(&self, input: &WriteFromUrlInput) -> Result<BlobOutput, FpError>;
    /// Streams the file's content into `writer`.
    fn download_to<W>(&self, input: &DownloadInput, writer: &mut W) -> Result<DownloadOutput, FpError>
    where
        W: Write + ?Sized;
    fn download_to_file(&self, input: &DownloadToFileInput) -> Result<DownloadToFileOutput, FpError>;
    fn stat(&self, input: &StatInput) -> Result<StatOutput, FpError>;
    /// Deletes the file from the service and its underlying storage.
    fn remove(&self, input: &RemoveInput) -> Result<RemoveOutput, FpError>;
}

fn transfer_query<I: SecurityQuery>(input: &I, base64decode: bool) -> HashMap<&'static str, String> {
    let mut query = HashMap::with_capacity(3);
    map_insert_bool(&mut query, QUERY_BASE64_DECODE, base64decode);
    set_security_query(&mut query, input);
    query
}

#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
pub struct WriteOptions {
    pub(crate) base64decode: bool,
    pub(crate) security: Option<Security>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the uploaded data is base64 and must be decoded before it is written.
    pub fn base64decode(&self) -> bool {
        self.base64decode
    }

    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.base64decode = base64decode;
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
#[use_inner]
pub struct WriteFromFileInput {
    pub(crate) blob: Blob,
    pub(crate) inner: WriteOptions,
    pub(crate) file_path: String,
}

impl WriteFromFileInput {
    pub fn new(blob: impl Into<Blob>, file_path: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            inner: WriteOptions::default(),
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
    pub fn base64decode(&self) -> bool {
        self.inner.base64decode
    }
    pub fn options(&self) -> &WriteOptions {
        &self.inner
    }

    pub fn set_file_path(&mut self, file_path: impl Into<String>) {
        self.file_path = file_path.into();
    }
    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.inner.base64decode = base64decode;
    }
    pub fn set_options(&mut self, options: impl Into<WriteOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for WriteFromFileInput {
    fn operation(&self) -> &str {
        WRITE_FROM_FILE_OPERATION
    }
}

impl InputTranslator for WriteFromFileInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        if self.file_path == "" {
            return Err(FpError::client_error("empty file path"));
        }
        let mut request = self.trans_blob("")?;
        request.method = HttpMethodPost;
        request.query = Some(transfer_query(self, self.inner.base64decode));
        request.body = Some(HttpBody::Multipart {
            file_name: upload_file_name("", &self.file_path),
            content: MultipartContent::File(&self.file_path),
        });
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
#[use_inner]
pub struct WriteFromBufferInput {
    pub(crate) blob: Blob,
    pub(crate) inner: WriteOptions,
    pub(crate) content: Vec<u8>,
    pub(crate) file_name: String,
}

impl WriteFromBufferInput {
    pub fn new(blob: impl Into<Blob>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: blob.into(),
            inner: WriteOptions::default(),
            content: content.into(),
            file_name: "".to_string(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
    /// Name announced in the multipart part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
    pub fn base64decode(&self) -> bool {
        self.inner.base64decode
    }
    pub fn options(&self) -> &WriteOptions {
        &self.inner
    }

    pub fn set_content(&mut self, content: impl Into<Vec<u8>>) {
        self.content = content.into();
    }
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = file_name.into();
    }
    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.inner.base64decode = base64decode;
    }
    pub fn set_options(&mut self, options: impl Into<WriteOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for WriteFromBufferInput {
    fn operation(&self) -> &str {
        WRITE_FROM_BUFFER_OPERATION
    }
}

impl InputTranslator for WriteFromBufferInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob("")?;
        request.method = HttpMethodPost;
        request.query = Some(transfer_query(self, self.inner.base64decode));
        request.body = Some(HttpBody::Multipart {
            file_name: self.file_name.clone(),
            content: MultipartContent::Buffer(&self.content),
        });
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
#[use_inner]
pub struct WriteFromUrlInput {
    pub(crate) blob: Blob,
    pub(crate) inner: WriteOptions,
    pub(crate) url: String,
}

impl WriteFromUrlInput {
    pub fn new(blob: impl Into<Blob>, url: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            inner: WriteOptions::default(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn base64decode(&self) -> bool {
        self.inner.base64decode
    }
    pub fn options(&self) -> &WriteOptions {
        &self.inner
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.inner.base64decode = base64decode;
    }
    pub fn set_options(&mut self, options: impl Into<WriteOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for WriteFromUrlInput {
    fn operation(&self) -> &str {
        WRITE_FROM_URL_OPERATION
    }
}

impl InputTranslator for WriteFromUrlInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        if self.url.trim() == "" {
            return Err(FpError::client_error("empty url"));
        }
        let mut request = self.trans_blob("")?;
        request.method = HttpMethodPost;
        request.query = Some(transfer_query(self, self.inner.base64decode));
        let mut form = HashMap::with_capacity(1);
        form.insert(FORM_URL, self.url.clone());
        request.body = Some(HttpBody::Form(form));
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
pub struct DownloadInput {
    pub(crate) blob: Blob,
    pub(crate) base64decode: bool,
    pub(crate) security: Option<Security>,
}

impl DownloadInput {
    pub fn new(blob: impl Into<Blob>) -> Self {
        Self {
            blob: blob.into(),
            base64decode: false,
            security: None,
        }
    }

    pub fn base64decode(&self) -> bool {
        self.base64decode
    }
    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.base64decode = base64decode;
    }
}

impl InputDescriptor for DownloadInput {
    fn operation(&self) -> &str {
        DOWNLOAD_OPERATION
    }
}

impl InputTranslator for DownloadInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob("")?;
        request.query = Some(transfer_query(self, self.base64decode));
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, RequestInfo)]
pub struct DownloadOutput {
    pub(crate) request_info: RequestInfo,
    pub(crate) written: u64,
    pub(crate) file_name: String,
    pub(crate) content_type: String,
}

impl DownloadOutput {
    /// Number of bytes handed to the writer.
    pub fn written(&self) -> u64 {
        self.written
    }
    /// The name the service reports in `X-File-Name`, empty when absent.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub(crate) fn parse_to<W>(response: &mut HttpResponse, request_info: RequestInfo, writer: &mut W) -> Result<Self, FpError>
    where
        W: Write + ?Sized,
    {
        let file_name = get_header_value(response.headers(), HEADER_FILE_NAME);
        let content_type = get_header_value(response.headers(), HEADER_CONTENT_TYPE);
        let written = copy_response(response, writer)?;
        Ok(Self {
            request_info,
            written,
            file_name,
            content_type,
        })
    }
}

/// Copies the body into `writer`. Read failures are transport errors, write failures are local.
pub(crate) fn copy_response<R, W>(reader: &mut R, writer: &mut W) -> Result<u64, FpError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut data = vec![0u8; DEFAULT_READ_BUFFER_SIZE];
    let mut written = 0u64;
    loop {
        match reader.read(&mut data) {
            Err(re) => {
                if re.kind() == ErrorKind::Interrupted {
                    continue;
                }
                return Err(FpError::transport_error("read response body error", GenericError::IoError(re.to_string())));
            }
            Ok(n) => {
                if n == 0 {
                    break;
                }
                if let Err(we) = writer.write_all(&data[..n]) {
                    return Err(FpError::local_io_error("write downloaded data error", GenericError::IoError(we.to_string())));
                }
                written += n as u64;
            }
        }
    }
    if let Err(we) = writer.flush() {
        return Err(FpError::local_io_error("flush downloaded data error", GenericError::IoError(we.to_string())));
    }
    Ok(written)
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
pub struct DownloadToFileInput {
    pub(crate) blob: Blob,
    pub(crate) base64decode: bool,
    pub(crate) security: Option<Security>,
    pub(crate) file_path: String,
}

impl DownloadToFileInput {
    /// `file_path` may name the target file or a directory; in the latter case the name
    /// comes from the service.
    pub fn new(blob: impl Into<Blob>, file_path: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            base64decode: false,
            security: None,
            file_path: file_path.into(),
        }
    }

    pub fn base64decode(&self) -> bool {
        self.base64decode
    }
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.base64decode = base64decode;
    }
    pub fn set_file_path(&mut self, file_path: impl Into<String>) {
        self.file_path = file_path.into();
    }
}

impl InputDescriptor for DownloadToFileInput {
    fn operation(&self) -> &str {
        DOWNLOAD_TO_FILE_OPERATION
    }
}

impl InputTranslator for DownloadToFileInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob("")?;
        request.query = Some(transfer_query(self, self.base64decode));
        request.file_path = &self.file_path;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, RequestInfo)]
pub struct DownloadToFileOutput {
    pub(crate) request_info: RequestInfo,
    pub(crate) file_path: PathBuf,
    pub(crate) written: u64,
}

impl DownloadToFileOutput {
    /// Where the content was finally written.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
    pub fn written(&self) -> u64 {
        self.written
    }
}

/// The final destination of a download and the sibling temp file its body is streamed into.
pub(crate) fn download_paths(request: &HttpRequest, header_file_name: &str) -> Result<(PathBuf, PathBuf), FpError> {
    let handle = Blob::new_with_url(request.request_url.as_str()).handle();
    let final_file_path = resolve_download_path(request.file_path, header_file_name, &handle)?;
    let temp_file_path = temp_download_path(&final_file_path);
    Ok((final_file_path, temp_file_path))
}

/// The parent directory to create before writing `path`, if it is missing.
pub(crate) fn missing_parent(path: &Path) -> Option<&Path> {
    match path.parent() {
        Some(p) if p.as_os_str().len() > 0 && !p.exists() => Some(p),
        _ => None,
    }
}

impl OutputParser for DownloadToFileOutput {
    fn parse_by_ref(request: &HttpRequest, response: &mut HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let header_file_name = get_header_value(response.headers(), HEADER_FILE_NAME);
        let (final_file_path, temp_file_path) = download_paths(request, &header_file_name)?;
        if let Some(p) = missing_parent(&final_file_path) {
            if let Err(e) = fs::create_dir_all(p) {
                return Err(FpError::local_io_error(format!("create dir for parent {} error", p.display()),
                                                   GenericError::IoError(e.to_string())));
            }
        }
        let written = match File::options().write(true).truncate(true).create(true).open(&temp_file_path) {
            Err(e) => {
                return Err(FpError::local_io_error(format!("open file {} to write error", temp_file_path.display()),
                                                   GenericError::IoError(e.to_string())));
            }
            Ok(mut fd) => match copy_response(response, &mut fd) {
                Ok(written) => written,
                Err(e) => {
                    drop(fd);
                    let _ = fs::remove_file(&temp_file_path);
                    return Err(e);
                }
            },
        };
        if let Err(re) = fs::rename(&temp_file_path, &final_file_path) {
            let _ = fs::remove_file(&temp_file_path);
            return Err(FpError::local_io_error(format!("rename file to {} error", final_file_path.display()),
                                               GenericError::IoError(re.to_string())));
        }

        Ok(Self {
            request_info,
            file_path: final_file_path,
            written,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
pub struct StatInput {
    pub(crate) blob: Blob,
    pub(crate) tags: Vec<MetaTagType>,
    pub(crate) security: Option<Security>,
}

impl StatInput {
    /// Without tags the service decides which attributes to return.
    pub fn new(blob: impl Into<Blob>) -> Self {
        Self {
            blob: blob.into(),
            tags: vec![],
            security: None,
        }
    }

    pub fn new_with_tags(blob: impl Into<Blob>, tags: impl Into<Vec<MetaTagType>>) -> Self {
        Self {
            blob: blob.into(),
            tags: tags.into(),
            security: None,
        }
    }

    pub fn tags(&self) -> &[MetaTagType] {
        &self.tags
    }
    pub fn set_tags(&mut self, tags: impl Into<Vec<MetaTagType>>) {
        self.tags = tags.into();
    }
    pub fn add_tag(&mut self, tag: impl Into<MetaTagType>) {
        self.tags.push(tag.into());
    }
}

impl InputDescriptor for StatInput {
    fn operation(&self) -> &str {
        STAT_OPERATION
    }
}

impl InputTranslator for StatInput {
    fn trans(&self, _: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob(PATH_METADATA)?;
        let mut query = HashMap::with_capacity(self.tags.len() + 2);
        set_tags_query(&mut query, &self.tags);
        set_security_query(&mut query, self);
        request.query = Some(query);
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, RequestInfo)]
pub struct StatOutput {
    pub(crate) request_info: RequestInfo,
    pub(crate) metadata: Metadata,
}

impl StatOutput {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

impl OutputParser for StatOutput {
    fn parse_by_ref(_: &HttpRequest, response: &mut HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let metadata = parse_json::<Metadata>(response)?;
        Ok(Self {
            request_info,
            metadata,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
pub struct RemoveInput {
    pub(crate) blob: Blob,
    pub(crate) security: Option<Security>,
}

impl RemoveInput {
    pub fn new(blob: impl Into<Blob>) -> Self {
        Self {
            blob: blob.into(),
            security: None,
        }
    }
}

impl InputDescriptor for RemoveInput {
    fn operation(&self) -> &str {
        REMOVE_OPERATION
    }
}

impl InputTranslator for RemoveInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob("")?;
        request.method = HttpMethodDelete;
        let mut query = HashMap::with_capacity(3);
        set_security_query(&mut query, self);
        set_api_key(&mut query, &config_holder);
        request.query = Some(query);
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, RequestInfo)]
pub struct RemoveOutput {
    pub(crate) request_info: RequestInfo,
}

impl OutputParser for RemoveOutput {
    fn parse_by_ref(_: &HttpRequest, _: &mut HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        Ok(Self {
            request_info,
        })
    }
}
