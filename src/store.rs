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
use std::sync::Arc;

use filepicker_generic::SecurityQuery;

use crate::blob::BlobOutput;
use crate::config::ConfigHolder;
use crate::constant::*;
use crate::enumeration::HttpMethodType::HttpMethodPost;
use crate::enumeration::StorageType;
use crate::error::FpError;
use crate::http::{HttpBody, HttpRequest, MultipartContent};
use crate::internal::{map_insert, map_insert_bool, set_api_key, set_security_query, upload_file_name, InputDescriptor, InputTranslator};
use crate::security::Security;

pub trait StoreAPI {
    /// Uploads a local file as a new file.
    fn store_from_file(&self, input: &StoreFromFileInput) -> Result<BlobOutput, FpError>;
    fn store_from_buffer(&self, input: &StoreFromBufferInput) -> Result<BlobOutput, FpError>;
    /// Has the service fetch `url` and store the content as a new file.
    fn store_from_url(&self, input: &StoreFromUrlInput) -> Result<BlobOutput, FpError>;
    /// Registers `url` as a file without copying its content. The result behaves like a
    /// symlink and becomes invalid once the target goes away.
    fn pick_url(&self, input: &PickUrlInput) -> Result<BlobOutput, FpError>;
}

/// Where and how a new file is stored.
#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
pub struct StoreOptions {
    pub(crate) filename: String,
    pub(crate) mimetype: String,
    pub(crate) location: Option<StorageType>,
    pub(crate) path: String,
    pub(crate) container: String,
    pub(crate) base64decode: bool,
    pub(crate) access: String,
    pub(crate) security: Option<Security>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }
    pub fn location(&self) -> &Option<StorageType> {
        &self.location
    }
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn container(&self) -> &str {
        &self.container
    }
    pub fn base64decode(&self) -> bool {
        self.base64decode
    }
    pub fn access(&self) -> &str {
        &self.access
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }
    pub fn set_mimetype(&mut self, mimetype: impl Into<String>) {
        self.mimetype = mimetype.into();
    }
    /// Storage backend; the client's default is used when unset.
    pub fn set_location(&mut self, location: impl Into<StorageType>) {
        self.location = Some(location.into());
    }
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
    pub fn set_container(&mut self, container: impl Into<String>) {
        self.container = container.into();
    }
    pub fn set_base64decode(&mut self, base64decode: bool) {
        self.base64decode = base64decode;
    }
    pub fn set_access(&mut self, access: impl Into<String>) {
        self.access = access.into();
    }

    fn trans_store<'a>(&'a self, operation: &'a str, config_holder: &ConfigHolder) -> HttpRequest<'a> {
        let storage = match self.location {
            Some(ref location) => location.as_str(),
            None => config_holder.storage.as_str(),
        };
        let mut request = HttpRequest::default();
        request.operation = operation;
        request.method = HttpMethodPost;
        request.request_url = config_holder.get_endpoint(&format!("{}/{}", PATH_STORE, storage));

        let mut query = HashMap::with_capacity(10);
        map_insert(&mut query, QUERY_FILENAME, &self.filename);
        map_insert(&mut query, QUERY_MIMETYPE, &self.mimetype);
        if let Some(ref location) = self.location {
            map_insert(&mut query, QUERY_LOCATION, location.as_str());
        }
        map_insert(&mut query, QUERY_PATH, &self.path);
        map_insert(&mut query, QUERY_CONTAINER, &self.container);
        map_insert_bool(&mut query, QUERY_BASE64_DECODE, self.base64decode);
        map_insert(&mut query, QUERY_ACCESS, &self.access);
        set_security_query(&mut query, self);
        set_api_key(&mut query, config_holder);
        request.query = Some(query);
        request
    }
}

#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
#[use_inner]
pub struct StoreFromFileInput {
    pub(crate) inner: StoreOptions,
    pub(crate) file_path: String,
}

impl StoreFromFileInput {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            inner: StoreOptions::default(),
            file_path: file_path.into(),
        }
    }

    pub fn new_with_options(file_path: impl Into<String>, options: impl Into<StoreOptions>) -> Self {
        Self {
            inner: options.into(),
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
    pub fn options(&self) -> &StoreOptions {
        &self.inner
    }
    pub fn options_mut(&mut self) -> &mut StoreOptions {
        &mut self.inner
    }

    pub fn set_file_path(&mut self, file_path: impl Into<String>) {
        self.file_path = file_path.into();
    }
    pub fn set_options(&mut self, options: impl Into<StoreOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for StoreFromFileInput {
    fn operation(&self) -> &str {
        STORE_FROM_FILE_OPERATION
    }
}

impl InputTranslator for StoreFromFileInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        if self.file_path == "" {
            return Err(FpError::client_error("empty file path"));
        }
        let mut request = self.inner.trans_store(self.operation(), &config_holder);
        request.body = Some(HttpBody::Multipart {
            file_name: upload_file_name(&self.inner.filename, &self.file_path),
            content: MultipartContent::File(&self.file_path),
        });
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
#[use_inner]
pub struct StoreFromBufferInput {
    pub(crate) inner: StoreOptions,
    pub(crate) content: Vec<u8>,
}

impl StoreFromBufferInput {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: StoreOptions::default(),
            content: content.into(),
        }
    }

    pub fn new_with_options(content: impl Into<Vec<u8>>, options: impl Into<StoreOptions>) -> Self {
        Self {
            inner: options.into(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
    pub fn options(&self) -> &StoreOptions {
        &self.inner
    }
    pub fn options_mut(&mut self) -> &mut StoreOptions {
        &mut self.inner
    }

    pub fn set_content(&mut self, content: impl Into<Vec<u8>>) {
        self.content = content.into();
    }
    pub fn set_options(&mut self, options: impl Into<StoreOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for StoreFromBufferInput {
    fn operation(&self) -> &str {
        STORE_FROM_BUFFER_OPERATION
    }
}

impl InputTranslator for StoreFromBufferInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.inner.trans_store(self.operation(), &config_holder);
        request.body = Some(HttpBody::Multipart {
            file_name: self.inner.filename.clone(),
            content: MultipartContent::Buffer(&self.content),
        });
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
#[use_inner]
pub struct StoreFromUrlInput {
    pub(crate) inner: StoreOptions,
    pub(crate) url: String,
}

impl StoreFromUrlInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: StoreOptions::default(),
            url: url.into(),
        }
    }

    pub fn new_with_options(url: impl Into<String>, options: impl Into<StoreOptions>) -> Self {
        Self {
            inner: options.into(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn options(&self) -> &StoreOptions {
        &self.inner
    }
    pub fn options_mut(&mut self) -> &mut StoreOptions {
        &mut self.inner
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
    pub fn set_options(&mut self, options: impl Into<StoreOptions>) {
        self.inner = options.into();
    }
}

impl InputDescriptor for StoreFromUrlInput {
    fn operation(&self) -> &str {
        STORE_FROM_URL_OPERATION
    }
}

impl InputTranslator for StoreFromUrlInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        if self.url.trim() == "" {
            return Err(FpError::client_error("empty url"));
        }
        let mut request = self.inner.trans_store(self.operation(), &config_holder);
        let mut form = HashMap::with_capacity(1);
        form.insert(FORM_URL, self.url.clone());
        request.body = Some(HttpBody::Form(form));
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Default, SecurityQuery)]
pub struct PickUrlInput {
    pub(crate) url: String,
    pub(crate) security: Option<Security>,
}

impl PickUrlInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            security: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
}

impl InputDescriptor for PickUrlInput {
    fn operation(&self) -> &str {
        PICK_URL_OPERATION
    }
}

impl InputTranslator for PickUrlInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        if self.url.trim() == "" {
            return Err(FpError::client_error("empty url"));
        }
        let mut request = HttpRequest::default();
        request.operation = self.operation();
        request.method = HttpMethodPost;
        request.request_url = config_holder.get_endpoint(PATH_PICK);
        let mut query = HashMap::with_capacity(3);
        set_security_query(&mut query, self);
        set_api_key(&mut query, &config_holder);
        request.query = Some(query);
        let mut form = HashMap::with_capacity(1);
        form.insert(FORM_URL, self.url.clone());
        request.body = Some(HttpBody::Form(form));
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::get_request_url;

    fn config_holder() -> Arc<ConfigHolder> {
        let mut config_holder = ConfigHolder::default();
        config_holder.check("http://127.0.0.1:8080", "0KKK1").unwrap();
        Arc::new(config_holder)
    }

    #[test]
    fn test_store_request_url() {
        let input = StoreFromFileInput::new("/tmp/file.txt");
        let request = input.trans(config_holder()).unwrap();
        assert_eq!(get_request_url(&request), "http://127.0.0.1:8080/api/store/S3?key=0KKK1");

        let mut options = StoreOptions::new();
        options.set_location(StorageType::StorageAzure);
        options.set_filename("file.txt");
        options.set_base64decode(true);
        options.set_security(Security::from_parts("P", "S"));
        let input = StoreFromUrlInput::new_with_options("https://www.filepicker.com/image.png", options);
        let request = input.trans(config_holder()).unwrap();
        assert_eq!(get_request_url(&request),
                   "http://127.0.0.1:8080/api/store/azure?base64decode=true&filename=file.txt&key=0KKK1&location=azure&policy=P&signature=S");
    }

    #[test]
    fn test_multipart_file_name() {
        let input = StoreFromFileInput::new("/tmp/dir/file.txt");
        let request = input.trans(config_holder()).unwrap();
        match request.body {
            Some(HttpBody::Multipart { file_name, .. }) => assert_eq!(file_name, "file.txt"),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_pick_request() {
        let mut input = PickUrlInput::new("https://www.filepicker.com/image.png");
        input.set_security(Security::from_parts("P", "S"));
        let request = input.trans(config_holder()).unwrap();
        assert_eq!(get_request_url(&request), "http://127.0.0.1:8080/api/pick?key=0KKK1&policy=P&signature=S");
        assert!(PickUrlInput::new(" ").trans(config_holder()).is_err());
    }
}
