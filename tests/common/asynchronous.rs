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
use mockito::{Server, ServerGuard};

use filepicker_rust_sdk::asynchronous::filepicker;
use filepicker_rust_sdk::asynchronous::filepicker::{FilepickerClient, FilepickerClientImpl};
use filepicker_rust_sdk::blob::Blob;

use crate::common::{FAKE_API_KEY, FAKE_HANDLE};

pub struct AsyncContext {
    server: ServerGuard,
    client: FilepickerClientImpl,
}

impl AsyncContext {
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

pub async fn create_async_context() -> AsyncContext {
    let server = Server::new_async().await;
    let client = filepicker::builder()
        .api_key(FAKE_API_KEY)
        .endpoint(server.url())
        .connection_timeout(3000)
        .request_timeout(10000)
        .build()
        .unwrap();
    AsyncContext {
        server,
        client,
    }
}
