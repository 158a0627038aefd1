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
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWrite;

use crate::asynchronous::internal::{copy_response, parse_json, HttpResponse, OutputParser};
use crate::blob::BlobOutput;
use crate::common::RequestInfo;
use crate::constant::{HEADER_CONTENT_TYPE, HEADER_FILE_NAME};
use crate::error::{FpError, GenericError};
use crate::file::{download_paths, missing_parent, DownloadInput, DownloadOutput, DownloadToFileInput, DownloadToFileOutput, RemoveInput, RemoveOutput, StatInput, StatOutput, WriteFromBufferInput, WriteFromFileInput, WriteFromUrlInput};
use crate::http::HttpRequest;
use crate::internal::get_header_value;
use crate::metadata::Metadata;

#[async_trait]
pub trait FileAPI {
    async fn write_from_file(&self, input: &WriteFromFileInput) -> Result<BlobOutput, FpError>;
    async fn write_from_buffer(&self, input: &WriteFromBufferInput) -> Result<BlobOutput, FpError>;
    async fn write_from_url(&self, input: &WriteFromUrlInput) -> Result<BlobOutput, FpError>;
    async fn download_to<W>(&self, input: &DownloadInput, writer: &mut W) -> Result<DownloadOutput, FpError>
    where
        W: AsyncWrite + Unpin + Send + ?Sized;
    async fn download_to_file(&self, input: &DownloadToFileInput) -> Result<DownloadToFileOutput, FpError>;
    async fn stat(&self, input: &StatInput) -> Result<StatOutput, FpError>;
    async fn remove(&self, input: &RemoveInput) -> Result<RemoveOutput, FpError>;
}

pub(crate) async fn parse_download_to<W>(mut response: HttpResponse, request_info: RequestInfo, writer: &mut W) -> Result<DownloadOutput, FpError>
where
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let file_name = get_header_value(response.headers(), HEADER_FILE_NAME);
    let content_type = get_header_value(response.headers(), HEADER_CONTENT_TYPE);
    let written = copy_response(&mut response, writer).await?;
    Ok(DownloadOutput {
        request_info,
        written,
        file_name,
        content_type,
    })
}

#[async_trait]
impl OutputParser for DownloadToFileOutput {
    async fn parse(request: HttpRequest<'_>, mut response: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let header_file_name = get_header_value(response.headers(), HEADER_FILE_NAME);
        let (final_file_path, temp_file_path) = download_paths(&request, &header_file_name)?;
        if let Some(p) = missing_parent(&final_file_path) {
            if let Err(e) = fs::create_dir_all(p).await {
                return Err(FpError::local_io_error(format!("create dir for parent {} error", p.display()),
                                                   GenericError::IoError(e.to_string())));
            }
        }

        let written = match File::create(&temp_file_path).await {
            Err(e) => {
                return Err(FpError::local_io_error(format!("open file {} to write error", temp_file_path.display()),
                                                   GenericError::IoError(e.to_string())));
            }
            Ok(mut fd) => match copy_response(&mut response, &mut fd).await {
                Ok(written) => written,
                Err(e) => {
                    drop(fd);
                    let _ = fs::remove_file(&temp_file_path).await;
                    return Err(e);
                }
            },
        };
        if let Err(re) = fs::rename(&temp_file_path, &final_file_path).await {
            let _ = fs::remove_file(&temp_file_path).await;
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

#[async_trait]
impl OutputParser for StatOutput {
    async fn parse(_: HttpRequest<'_>, response: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let metadata = parse_json::<Metadata>(response).await?;
        Ok(Self {
            request_info,
            metadata,
        })
    }
}

#[async_trait]
impl OutputParser for RemoveOutput {
    async fn parse(_: HttpRequest<'_>, _: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        Ok(Self {
            request_info,
        })
    }
}
