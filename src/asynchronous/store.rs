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
use async_trait::async_trait;

use crate::asynchronous::internal::{parse_json, HttpResponse, OutputParser};
use crate::blob::{Blob, BlobOutput};
use crate::common::RequestInfo;
use crate::error::FpError;
use crate::http::HttpRequest;
use crate::store::{PickUrlInput, StoreFromBufferInput, StoreFromFileInput, StoreFromUrlInput};

#[async_trait]
pub trait StoreAPI {
    async fn store_from_file(&self, input: &StoreFromFileInput) -> Result<BlobOutput, FpError>;
    async fn store_from_buffer(&self, input: &StoreFromBufferInput) -> Result<BlobOutput, FpError>;
    async fn store_from_url(&self, input: &StoreFromUrlInput) -> Result<BlobOutput, FpError>;
    async fn pick_url(&self, input: &PickUrlInput) -> Result<BlobOutput, FpError>;
}

#[async_trait]
impl OutputParser for BlobOutput {
    async fn parse(_: HttpRequest<'_>, response: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let blob = parse_json::<Blob>(response).await?;
        Ok(Self {
            request_info,
            blob,
        })
    }
}
