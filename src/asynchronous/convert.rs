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

use crate::blob::BlobOutput;
use crate::convert::ConvertInput;
use crate::error::FpError;

#[async_trait]
pub trait ConvertAPI {
    /// Converts the file and stores the result as a new file.
    async fn convert(&self, input: &ConvertInput) -> Result<BlobOutput, FpError>;
}
