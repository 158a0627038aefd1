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
use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{redirect, Proxy};

use crate::blob::{Blob, BlobOutput};
use crate::common::{RequestInfo, RequestInfoTrait};
use crate::config::ConfigHolder;
use crate::constant::*;
use crate::convert::{ConvertAPI, ConvertInput};
use crate::enumeration::StorageType;
use crate::error::{FpError, GenericError};
use crate::file::*;
use crate::http::{HttpBody, HttpRequest, HttpResponse, MultipartContent};
use crate::internal::{encode_query, get_request_url, load_file_to_buf, log_result, read_response, trans_header, InputTranslator, OutputParser};
use crate::store::*;

#[derive(Debug, Clone, Default)]
pub struct FilepickerClientBuilder {
    api_key: String,
    endpoint: String,
    config_holder: ConfigHolder,
}

impl FilepickerClientBuilder {
    pub fn build(mut self) -> Result<FilepickerClientImpl, FpError> {
        self.config_holder.check(self.endpoint, self.api_key)?;
        self.config_holder.gen_user_agent();
        let mut client = Client::builder()
            .user_agent(self.config_holder.user_agent.as_str())
            .tcp_nodelay(true)
            .connect_timeout(Duration::from_millis(self.config_holder.connection_timeout as u64))
            .pool_idle_timeout(Duration::from_millis(self.config_holder.idle_connection_time as u64))
            .pool_max_idle_per_host(self.config_holder.max_connections as usize);
        if self.config_holder.request_timeout > 0 {
            client = client.timeout(Duration::from_millis(self.config_holder.request_timeout as u64));
        }

        if self.config_holder.follow_redirect_times > 0 {
            client = client.redirect(redirect::Policy::limited(self.config_holder.follow_redirect_times as usize));
        } else {
            client = client.redirect(redirect::Policy::none());
        }

        match self.config_holder.proxy_url()? {
            Some(proxy_url) => {
                match Proxy::all(proxy_url.as_str()) {
                    Err(e) => return Err(FpError::client_error_with_cause("build proxy error", GenericError::DefaultError(e.to_string()))),
                    Ok(proxy) => {
                        client = client.proxy(proxy);
                    }
                }
            }
            None => {
                client = client.no_proxy();
            }
        }

        #[cfg(any(feature = "use-native-tls", feature = "use-rustls"))]
        if !self.config_holder.enable_verify_ssl {
            client = client.danger_accept_invalid_certs(true);
            #[cfg(feature = "use-native-tls")]
            {
                client = client.danger_accept_invalid_hostnames(true);
            }
        }

        match client.build() {
            Ok(client) => {
                Ok(FilepickerClientImpl {
                    client,
                    config_holder: ArcSwap::from(Arc::new(self.config_holder)),
                })
            }
            Err(e) => {
                Err(FpError::client_error_with_cause("build filepicker client error", GenericError::DefaultError(e.to_string())))
            }
        }
    }

    pub fn build_as_trait(self) -> Result<impl FilepickerClient, FpError> {
        let client = self.build()?;
        Ok(client)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Service root such as `https://www.filepicker.io`; the scheme defaults to https.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Backend used by store calls that do not name a location.
    pub fn storage(mut self, storage: impl Into<StorageType>) -> Self {
        self.config_holder.storage = storage.into();
        self
    }

    pub fn request_timeout(mut self, request_timeout: isize) -> Self {
        if request_timeout > 0 {
            self.config_holder.request_timeout = request_timeout;
        }
        self
    }

    pub fn connection_timeout(mut self, connection_timeout: isize) -> Self {
        if connection_timeout > 0 {
            self.config_holder.connection_timeout = connection_timeout;
        }
        self
    }

    pub fn max_connections(mut self, max_connections: isize) -> Self {
        if max_connections > 0 {
            self.config_holder.max_connections = max_connections;
        }
        self
    }
    pub fn idle_connection_time(mut self, idle_connection_time: isize) -> Self {
        if idle_connection_time > 0 {
            self.config_holder.idle_connection_time = idle_connection_time;
        }
        self
    }

    pub fn enable_verify_ssl(mut self, enable_verify_ssl: bool) -> Self {
        self.config_holder.enable_verify_ssl = enable_verify_ssl;
        self
    }
    pub fn proxy_host(mut self, proxy_host: impl Into<String>) -> Self {
        self.config_holder.proxy_host = proxy_host.into();
        self
    }
    pub fn proxy_port(mut self, proxy_port: isize) -> Self {
        self.config_holder.proxy_port = proxy_port;
        self
    }
    pub fn proxy_username(mut self, proxy_username: impl Into<String>) -> Self {
        self.config_holder.proxy_username = proxy_username.into();
        self
    }
    pub fn proxy_password(mut self, proxy_password: impl Into<String>) -> Self {
        self.config_holder.proxy_password = proxy_password.into();
        self
    }
    pub fn user_agent_product_name(mut self, user_agent_product_name: impl Into<String>) -> Self {
        self.config_holder.user_agent_product_name = user_agent_product_name.into();
        self
    }
    pub fn user_agent_soft_name(mut self, user_agent_soft_name: impl Into<String>) -> Self {
        self.config_holder.user_agent_soft_name = user_agent_soft_name.into();
        self
    }
    pub fn user_agent_soft_version(mut self, user_agent_soft_version: impl Into<String>) -> Self {
        self.config_holder.user_agent_soft_version = user_agent_soft_version.into();
        self
    }

    /// Redirects followed per request, 10 unless set; 0 disables them.
    pub fn follow_redirect_times(mut self, follow_redirect_times: isize) -> Self {
        self.config_holder.follow_redirect_times = follow_redirect_times;
        self
    }
}

pub fn builder() -> FilepickerClientBuilder {
    FilepickerClientBuilder::default()
}

pub trait ConfigAware {
    fn api_key(&self) -> String;
    fn endpoint(&self) -> String;
    fn storage(&self) -> StorageType;
}

pub trait FilepickerClient: StoreAPI + FileAPI + ConvertAPI + ConfigAware + Debug {
    /// A reference to `handle` on the configured endpoint.
    fn new_blob(&self, handle: impl AsRef<str>) -> Blob;
    fn refresh_api_key(&self, api_key: impl Into<String>) -> bool;
    fn refresh_endpoint(&self, endpoint: impl Into<String>) -> bool;
}

#[derive(Debug)]
pub struct FilepickerClientImpl {
    pub(crate) client: Client,
    pub(crate) config_holder: ArcSwap<ConfigHolder>,
}

impl StoreAPI for FilepickerClientImpl {
    fn store_from_file(&self, input: &StoreFromFileInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn store_from_buffer(&self, input: &StoreFromBufferInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn store_from_url(&self, input: &StoreFromUrlInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn pick_url(&self, input: &PickUrlInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }
}

impl FileAPI for FilepickerClientImpl {
    fn write_from_file(&self, input: &WriteFromFileInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn write_from_buffer(&self, input: &WriteFromBufferInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn write_from_url(&self, input: &WriteFromUrlInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }

    fn download_to<W>(&self, input: &DownloadInput, writer: &mut W) -> Result<DownloadOutput, FpError>
    where
        W: Write + ?Sized,
    {
        self.do_request_with(input, |_, mut response, request_info| {
            DownloadOutput::parse_to(&mut response, request_info, writer)
        })
    }

    fn download_to_file(&self, input: &DownloadToFileInput) -> Result<DownloadToFileOutput, FpError> {
        self.do_request(input)
    }

    fn stat(&self, input: &StatInput) -> Result<StatOutput, FpError> {
        self.do_request(input)
    }

    fn remove(&self, input: &RemoveInput) -> Result<RemoveOutput, FpError> {
        self.do_request(input)
    }
}

impl ConvertAPI for FilepickerClientImpl {
    fn convert(&self, input: &ConvertInput) -> Result<BlobOutput, FpError> {
        self.do_request(input)
    }
}

impl ConfigAware for FilepickerClientImpl {
    fn api_key(&self) -> String {
        self.config_holder.load().api_key.clone()
    }

    fn endpoint(&self) -> String {
        self.config_holder.load().get_endpoint("")
    }

    fn storage(&self) -> StorageType {
        self.config_holder.load().storage.clone()
    }
}

impl FilepickerClient for FilepickerClientImpl {
    fn new_blob(&self, handle: impl AsRef<str>) -> Blob {
        Blob::new_with_url(self.config_holder.load().get_file_endpoint(handle.as_ref()))
    }

    fn refresh_api_key(&self, api_key: impl Into<String>) -> bool {
        let api_key = api_key.into().trim().to_string();
        if api_key == "" {
            return false;
        }
        let mut config_holder = ConfigHolder::clone(&self.config_holder.load());
        config_holder.api_key = api_key;
        self.config_holder.store(Arc::new(config_holder));
        true
    }

    fn refresh_endpoint(&self, endpoint: impl Into<String>) -> bool {
        let mut config_holder = ConfigHolder::clone(&self.config_holder.load());
        let api_key = config_holder.api_key.clone();
        if let Err(_) = config_holder.check(endpoint, api_key) {
            return false;
        }
        self.config_holder.store(Arc::new(config_holder));
        true
    }
}

impl FilepickerClientImpl {
    fn do_request<T, K>(&self, input: &T) -> Result<K, FpError>
    where
        T: InputTranslator,
        K: OutputParser + RequestInfoTrait,
    {
        self.do_request_with(input, K::parse)
    }

    fn do_request_with<T, K, F>(&self, input: &T, parser: F) -> Result<K, FpError>
    where
        T: InputTranslator,
        K: RequestInfoTrait,
        F: FnOnce(HttpRequest, HttpResponse, RequestInfo) -> Result<K, FpError>,
    {
        let config_holder = self.config_holder.load_full();
        let operation = input.operation();
        let start = Instant::now();
        let mut request_url = None;
        let result = match self.do_request_once(input, config_holder, &mut request_url) {
            Ok((request, response, request_info)) => parser(request, response, request_info),
            Err(e) => Err(e),
        };
        log_result(operation, start.elapsed().as_millis(), request_url, result)
    }

    fn do_request_once<'a, T>(&self, input: &'a T, config_holder: Arc<ConfigHolder>, request_url: &mut Option<String>)
                              -> Result<(HttpRequest<'a>, HttpResponse, RequestInfo), FpError>
    where
        T: InputTranslator,
    {
        let mut request = input.trans(config_holder)?;
        let url = get_request_url(&request);
        *request_url = Some(url.clone());
        let mut rb = self.client.request(request.method.as_http_method(), url);
        if let Some(body) = request.body.take() {
            rb = self.add_body(rb, body)?;
        }

        let mut response = match rb.build() {
            Ok(req) => {
                match self.client.execute(req) {
                    Ok(resp) => resp,
                    Err(e) => return Err(FpError::transport_error("do request error", GenericError::HttpRequestError(e.to_string()))),
                }
            }
            Err(e) => {
                return Err(FpError::client_error_with_cause("build request error", GenericError::DefaultError(e.to_string())));
            }
        };
        let request_info = self.check_response(&mut response)?;
        Ok((request, response, request_info))
    }

    fn add_body(&self, rb: RequestBuilder, body: HttpBody) -> Result<RequestBuilder, FpError> {
        match body {
            HttpBody::Form(form) => {
                Ok(rb.header(HEADER_CONTENT_TYPE, CONTENT_TYPE_FORM).body(encode_query(&form)))
            }
            HttpBody::Multipart { file_name, content } => {
                let data = match content {
                    MultipartContent::File(file_path) => load_file_to_buf(file_path)?,
                    MultipartContent::Buffer(buf) => buf.to_vec(),
                };
                let mut part = match Part::bytes(data).mime_str(CONTENT_TYPE_OCTET_STREAM) {
                    Ok(part) => part,
                    Err(e) => return Err(FpError::client_error_with_cause("build multipart error", GenericError::DefaultError(e.to_string()))),
                };
                if file_name != "" {
                    part = part.file_name(file_name);
                }
                Ok(rb.multipart(Form::new().part(FORM_FILE_UPLOAD, part)))
            }
        }
    }

    fn check_response(&self, response: &mut HttpResponse) -> Result<RequestInfo, FpError> {
        let status = response.status();
        let request_info = RequestInfo {
            status_code: status.as_u16() as isize,
            header: trans_header(response.headers()),
        };
        if !status.is_success() {
            let body = match read_response(response) {
                Ok(buf) => String::from_utf8_lossy(&buf).to_string(),
                Err(_) => "".to_string(),
            };
            return Err(FpError::service_error(&body, request_info));
        }
        Ok(request_info)
    }
}
