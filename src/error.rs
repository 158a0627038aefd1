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
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::common::RequestInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum GenericError {
    UrlParseError(url::ParseError),
    HttpRequestError(String),
    IoError(String),
    JsonError(String),
    DefaultError(String),
}

impl Error for GenericError {}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericError::UrlParseError(e) => {
                write!(f, "{}", e)
            }
            GenericError::DefaultError(e) => {
                write!(f, "{}", e)
            }
            GenericError::HttpRequestError(e) => {
                write!(f, "{}", e)
            }
            GenericError::IoError(e) => {
                write!(f, "{}", e)
            }
            GenericError::JsonError(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

/// Every failure surfaced by the SDK.
#[derive(Debug, Clone, PartialEq)]
pub enum FpError {
    /// The policy cannot be encoded, e.g. it has no expiry.
    InvalidPolicy {
        message: String,
    },
    /// The request could not be sent or its response body could not be read.
    TransportError {
        message: String,
        cause: GenericError,
        request_url: String,
    },
    /// The service answered with a non-success status.
    ServiceError {
        code: isize,
        message: String,
        header: HashMap<String, String>,
        request_url: String,
    },
    /// A local file could not be opened, read, created or written.
    LocalIoError {
        message: String,
        cause: GenericError,
    },
    /// No destination file name could be determined for a download.
    NamingError {
        message: String,
    },
    ClientError {
        message: String,
        cause: Option<GenericError>,
        request_url: String,
    },
}

impl Error for FpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FpError::TransportError { cause, .. } => Some(cause),
            FpError::LocalIoError { cause, .. } => Some(cause),
            FpError::ClientError { cause, .. } => {
                if let Some(x) = cause {
                    return Some(x);
                }
                None
            }
            _ => None,
        }
    }
}

impl Display for FpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error())
    }
}

impl FpError {
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidPolicy { message } => message,
            Self::TransportError { message, .. } => message,
            Self::ServiceError { message, .. } => message,
            Self::LocalIoError { message, .. } => message,
            Self::NamingError { message } => message,
            Self::ClientError { message, .. } => message,
        }
    }

    pub fn request_url(&self) -> &str {
        match self {
            Self::TransportError { request_url, .. } => request_url,
            Self::ServiceError { request_url, .. } => request_url,
            Self::ClientError { request_url, .. } => request_url,
            _ => "",
        }
    }

    /// The http status code of a [`FpError::ServiceError`].
    pub fn code(&self) -> Option<isize> {
        match self {
            Self::ServiceError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn service_error_code(&self) -> Option<ServiceErrorCode> {
        self.code().and_then(ServiceErrorCode::from_code)
    }

    pub fn is_service_error(&self) -> bool {
        match self {
            Self::ServiceError { .. } => true,
            _ => false,
        }
    }

    pub fn as_request_info(&self) -> Option<RequestInfo> {
        match self {
            Self::ServiceError { code, header, .. } => Some(RequestInfo {
                status_code: *code,
                header: header.to_owned(),
            }),
            _ => None,
        }
    }

    pub fn error(&self) -> String {
        match self {
            Self::InvalidPolicy { message } => {
                format!("filepicker: invalid policy, {}", message)
            }
            Self::TransportError { message, cause, .. } => {
                format!("filepicker: {}, cause: {}", message, cause)
            }
            Self::ServiceError { code, message, .. } => {
                format!("filepicker: {} - {}", code, message)
            }
            Self::LocalIoError { message, cause } => {
                format!("filepicker: {}, cause: {}", message, cause)
            }
            Self::NamingError { message } => {
                format!("filepicker: {}", message)
            }
            Self::ClientError { message, cause, .. } => {
                if let Some(e) = cause {
                    format!("filepicker: {}, cause: {}", message, e)
                } else {
                    format!("filepicker: {}", message)
                }
            }
        }
    }

    pub(crate) fn set_request_url(&mut self, url: impl Into<String>) {
        match self {
            Self::TransportError { request_url, .. } => {
                *request_url = url.into();
            }
            Self::ServiceError { request_url, .. } => {
                *request_url = url.into();
            }
            Self::ClientError { request_url, .. } => {
                *request_url = url.into();
            }
            _ => {}
        }
    }

    pub(crate) fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    pub(crate) fn naming_error(message: impl Into<String>) -> Self {
        Self::NamingError {
            message: message.into(),
        }
    }

    pub(crate) fn transport_error(message: impl Into<String>, cause: GenericError) -> Self {
        Self::TransportError {
            message: message.into(),
            cause,
            request_url: "".to_string(),
        }
    }

    pub(crate) fn local_io_error(message: impl Into<String>, cause: GenericError) -> Self {
        Self::LocalIoError {
            message: message.into(),
            cause,
        }
    }

    pub(crate) fn client_error(message: impl Into<String>) -> Self {
        Self::ClientError {
            message: message.into(),
            request_url: "".to_string(),
            cause: None,
        }
    }

    pub(crate) fn client_error_with_cause(message: impl Into<String>, cause: GenericError) -> Self {
        Self::ClientError {
            message: message.into(),
            request_url: "".to_string(),
            cause: Some(cause),
        }
    }

    pub(crate) fn client_error_result(message: impl Into<String>) -> Result<(), FpError> {
        Err(Self::client_error(message))
    }

    /// Builds the error for a non-success response. An empty body falls back to the
    /// canonical message of the status code.
    pub(crate) fn service_error(body: &str, request_info: RequestInfo) -> Self {
        let mut message = body.trim().to_string();
        if message == "" {
            message = match ServiceErrorCode::from_code(request_info.status_code) {
                Some(code) => code.message().to_string(),
                None => format!("unexpected status code: {}", request_info.status_code),
            };
        }
        Self::ServiceError {
            code: request_info.status_code,
            message,
            header: request_info.header,
            request_url: "".to_string(),
        }
    }
}

/// Numeric error codes the service reports, each with its canonical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorCode {
    BadParameters,
    InvalidRequest,
    DomFilesUnsupported,
    FileNotFound,
    GeneralRead,
    WriteBlobNotFound,
    WriteUrlUnreachable,
    StoreFileUnreachable,
    StoreUrlUnreachable,
    StatFileNotFound,
    StatMetadataUnavailable,
    RemoveFileNotFound,
    RemoveStoreUnreachable,
}

impl ServiceErrorCode {
    pub fn from_code(code: isize) -> Option<Self> {
        match code {
            400 => Some(Self::BadParameters),
            403 => Some(Self::InvalidRequest),
            111 => Some(Self::DomFilesUnsupported),
            115 => Some(Self::FileNotFound),
            118 => Some(Self::GeneralRead),
            121 => Some(Self::WriteBlobNotFound),
            122 => Some(Self::WriteUrlUnreachable),
            151 => Some(Self::StoreFileUnreachable),
            152 => Some(Self::StoreUrlUnreachable),
            161 => Some(Self::StatFileNotFound),
            162 => Some(Self::StatMetadataUnavailable),
            171 => Some(Self::RemoveFileNotFound),
            172 => Some(Self::RemoveStoreUnreachable),
            _ => None,
        }
    }

    pub fn code(&self) -> isize {
        match self {
            Self::BadParameters => 400,
            Self::InvalidRequest => 403,
            Self::DomFilesUnsupported => 111,
            Self::FileNotFound => 115,
            Self::GeneralRead => 118,
            Self::WriteBlobNotFound => 121,
            Self::WriteUrlUnreachable => 122,
            Self::StoreFileUnreachable => 151,
            Self::StoreUrlUnreachable => 152,
            Self::StatFileNotFound => 161,
            Self::StatMetadataUnavailable => 162,
            Self::RemoveFileNotFound => 171,
            Self::RemoveStoreUnreachable => 172,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadParameters => "bad parameters",
            Self::InvalidRequest => "invalid request",
            Self::DomFilesUnsupported => "DOM file objects are not supported",
            Self::FileNotFound => "file not found",
            Self::GeneralRead => "general read error",
            Self::WriteBlobNotFound => "the file to write to could not be found",
            Self::WriteUrlUnreachable => "the remote URL could not be reached",
            Self::StoreFileUnreachable => "the file store could not be reached",
            Self::StoreUrlUnreachable => "the remote URL could not be reached",
            Self::StatFileNotFound => "the file cannot be found",
            Self::StatMetadataUnavailable => "the file metadata cannot be fetched",
            Self::RemoveFileNotFound => "the file cannot be found, and may have already been deleted",
            Self::RemoveStoreUnreachable => "the underlying content store could not be reached",
        }
    }
}

impl Display for ServiceErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}
