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
use crate::enumeration::HttpMethodType;
use crate::enumeration::HttpMethodType::HttpMethodGet;
use reqwest::blocking::Response;
use std::collections::HashMap;

/// Source of a multipart upload. Files are read by the client right before sending.
#[derive(Debug, Clone)]
pub(crate) enum MultipartContent<'a> {
    File(&'a str),
    Buffer(&'a [u8]),
}

#[derive(Debug, Clone)]
pub(crate) enum HttpBody<'a> {
    Multipart {
        file_name: String,
        content: MultipartContent<'a>,
    },
    Form(HashMap<&'a str, String>),
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest<'a> {
    pub(crate) operation: &'a str,
    pub(crate) method: HttpMethodType,
    pub(crate) request_url: String,
    pub(crate) query: Option<HashMap<&'a str, String>>,
    pub(crate) body: Option<HttpBody<'a>>,
    pub(crate) file_path: &'a str,
}

impl<'a> Default for HttpRequest<'a> {
    fn default() -> Self {
        HttpRequest {
            operation: "Default",
            method: HttpMethodGet,
            request_url: "".to_string(),
            query: None,
            body: None,
            file_path: "",
        }
    }
}

pub(crate) type HttpResponse = Response;
