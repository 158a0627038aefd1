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
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::common::RequestInfo;
use crate::constant::{DEFAULT_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE_FOR_JSON};
use crate::error::{FpError, GenericError};
use crate::http::HttpRequest;
use crate::internal::parse_json_by_buf;

pub(crate) type HttpResponse = reqwest::Response;

#[async_trait]
pub(crate) trait OutputParser: Sized {
    async fn parse(request: HttpRequest<'_>, response: HttpResponse, request_info: RequestInfo) -> Result<Self, FpError>;
}

pub(crate) async fn read_response(response: &mut HttpResponse) -> Result<Vec<u8>, FpError> {
    let mut buf = match response.content_length() {
        Some(x) if (x as usize) <= MAX_READ_BUFFER_SIZE_FOR_JSON => Vec::with_capacity(x as usize),
        _ => Vec::with_capacity(DEFAULT_READ_BUFFER_SIZE),
    };
    loop {
        match response.chunk().await {
            Err(e) => return Err(FpError::transport_error("read response error", GenericError::HttpRequestError(e.to_string()))),
            Ok(None) => break,
            Ok(Some(chunk)) => {
                if buf.len() + chunk.len() > MAX_READ_BUFFER_SIZE_FOR_JSON {
                    return Err(FpError::client_error("response body exceeds the maximum size"));
                }
                buf.extend_from_slice(&chunk);
            }
        }
    }
    Ok(buf)
}

pub(crate) async fn parse_json<T>(mut response: HttpResponse) -> Result<T, FpError>
where
    T: DeserializeOwned,
{
    let buf = read_response(&mut response).await?;
    parse_json_by_buf(buf.as_slice())
}

/// Streams the body into `writer`. Read failures are transport errors, write failures are local.
pub(crate) async fn copy_response<W>(response: &mut HttpResponse, writer: &mut W) -> Result<u64, FpError>
where
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let mut written = 0u64;
    loop {
        match response.chunk().await {
            Err(e) => return Err(FpError::transport_error("read response body error", GenericError::HttpRequestError(e.to_string()))),
            Ok(None) => break,
            Ok(Some(chunk)) => {
                if let Err(we) = writer.write_all(&chunk).await {
                    return Err(FpError::local_io_error("write downloaded data error", GenericError::IoError(we.to_string())));
                }
                written += chunk.len() as u64;
            }
        }
    }
    if let Err(we) = writer.flush().await {
        return Err(FpError::local_io_error("flush downloaded data error", GenericError::IoError(we.to_string())));
    }
    Ok(written)
}
