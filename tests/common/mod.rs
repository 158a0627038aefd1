/*
 * Copyright (c) 2025 Beijing Volcano Engine Technology Co., Ltd.
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
#![allow(
    dead_code,
)]

use mockito::{Server, ServerGuard};
use tracing_subscriber::EnvFilter;

use filepicker_rust_sdk::blob::Blob;
use filepicker_rust_sdk::filepicker;
use filepicker_rust_sdk::filepicker::{FilepickerClient, FilepickerClientImpl};
use filepicker_rust_sdk::security::Security;

#[cfg(feature = "asynchronous")]
pub mod asynchronous;

pub const FAKE_API_KEY: &str = "0KKK1";
pub const FAKE_HANDLE: &str = "2HHH3";
pub const FAKE_POLICY: &str = "P";
pub const FAKE_SIGNATURE: &str = "S";

pub fn init_test_log() {
    let _ = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_target(true)
        .with_test_writer()
        .with_env_filter(EnvFilter::new("info"))
        .with_ansi(false).try_init();
}

pub fn fake_security() -> Security {
    Security::from_parts(FAKE_POLICY, FAKE_SIGNATURE)
}

/// A blob response body as the service renders it.
pub fn blob_json(url: &str, filename: &str, size: u64) -> String {
    format!(r#"{{"url":"{}","filename":"{}","type":"text/plain","size":{},"key":"{}_{}","container":"S3","isWriteable":true}}"#,
            url, filename, size, FAKE_HANDLE, filename)
}

/// Path and query of a request against the fake file, e.g. `file_path("/metadata")`.
pub fn file_path(suffix: &str) -> String {
    format!("/api/file/{}{}", FAKE_HANDLE, suffix)
}

pub struct Context {
    server: ServerGuard,
    client: FilepickerClientImpl,
}

impl Context {
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    pub fn client(&self) -> &FilepickerClientImpl {
        &self.client
    }

    pub fn blob(&self) -> Blob {
        self.client.new_blob(FAKE_HANDLE)
    }
}

pub fn create_context() -> Context {
    let server = Server::new();
    let client = filepicker::builder()
        .api_key(FAKE_API_KEY)
        .endpoint(server.url())
        .connection_timeout(3000)
        .request_timeout(10000)
        .build()
        .unwrap();
    Context {
        server,
        client,
    }
}
