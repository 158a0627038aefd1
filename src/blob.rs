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
use serde::{Deserialize, Serialize};
use url::Url;

use filepicker_generic::RequestInfo;

use crate::common::RequestInfo;
use crate::constant::{DEFAULT_ENDPOINT, PATH_FILE};
use crate::enumeration::StorageType;
use crate::error::FpError;
use crate::http::{HttpRequest, HttpResponse};
use crate::internal::{parse_json, url_encode, OutputParser};

/// Reference to a file hosted by the service, as returned by store, write, convert and pick.
///
/// Every attribute but the url is optional so that a missing field can be told apart from
/// an empty or zero one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Blob {
    #[serde(default)]
    pub(crate) url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) filename: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) container: Option<String>,
    #[serde(default, rename = "isWriteable", skip_serializing_if = "Option::is_none")]
    pub(crate) writeable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
}

impl Blob {
    /// A reference to `handle` on the production service.
    pub fn new(handle: impl AsRef<str>) -> Self {
        Self::new_with_url(format!("{}/{}/{}", DEFAULT_ENDPOINT, PATH_FILE, url_encode(handle.as_ref())))
    }

    pub fn new_with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// The last path segment of the url, or an empty string when the url is unusable.
    pub fn handle(&self) -> String {
        match Url::parse(&self.url) {
            Ok(u) => match u.path_segments() {
                Some(segments) => match segments.filter(|s| *s != "").last() {
                    Some(x) => x.to_string(),
                    None => "".to_string(),
                },
                None => "".to_string(),
            },
            Err(_) => "".to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }
    pub fn size(&self) -> Option<u64> {
        self.size
    }
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }
    /// The container attribute read as a storage backend, when it names one.
    pub fn storage(&self) -> Option<StorageType> {
        self.container.as_deref().and_then(StorageType::from)
    }
    pub fn writeable(&self) -> Option<bool> {
        self.writeable
    }
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl From<&Blob> for Blob {
    fn from(value: &Blob) -> Self {
        value.to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Default, RequestInfo)]
pub struct BlobOutput {
    pub(crate) request_info: RequestInfo,
    pub(crate) blob: Blob,
}

impl BlobOutput {
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn into_blob(self) -> Blob {
        self.blob
    }
}

impl OutputParser for BlobOutput {
    fn parse_by_ref(_: &HttpRequest, response: &mut HttpResponse, request_info: RequestInfo) -> Result<Self, FpError> {
        let blob = parse_json::<Blob>(response)?;
        Ok(Self {
            request_info,
            blob,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blob() {
        let blob = Blob::new("2HHH3");
        assert_eq!(blob.url(), "https://www.filepicker.io/api/file/2HHH3");
        assert_eq!(blob.handle(), "2HHH3");
        assert_eq!(blob.size(), None);
    }

    #[test]
    fn test_handle() {
        assert_eq!(Blob::new_with_url("https://cdn.example.com/api/file/KW9EJhYtS6y48Whm2S6D/").handle(), "KW9EJhYtS6y48Whm2S6D");
        assert_eq!(Blob::new_with_url("not a url").handle(), "");
    }

    #[test]
    fn test_decode_blob() {
        let blob: Blob = serde_json::from_str(r#"{
            "url": "https://www.filepicker.io/api/file/2HHH3",
            "filename": "image.png",
            "type": "image/png",
            "size": 0,
            "isWriteable": false,
            "container": "azure"
        }"#).unwrap();
        assert_eq!(blob.filename(), Some("image.png"));
        assert_eq!(blob.mimetype(), Some("image/png"));
        assert_eq!(blob.size(), Some(0));
        assert_eq!(blob.writeable(), Some(false));
        assert_eq!(blob.storage(), Some(StorageType::StorageAzure));
        assert_eq!(blob.key(), None);
        assert_eq!(blob.path(), None);
    }
}
