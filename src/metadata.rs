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
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::enumeration::{MetaTagType, StorageType};

/// Attributes returned by a stat call. Only the requested tags are present, and a
/// JSON `null` reads as absent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    pub(crate) inner: Map<String, Value>,
}

impl Metadata {
    pub fn get(&self, tag: &MetaTagType) -> Option<&Value> {
        self.get_raw(tag.as_str())
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        match self.inner.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn contains(&self, tag: &MetaTagType) -> bool {
        self.get(tag).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn size(&self) -> Option<u64> {
        self.get(&MetaTagType::MetaTagSize).and_then(value_as_u64)
    }
    pub fn mimetype(&self) -> Option<&str> {
        self.get(&MetaTagType::MetaTagMimetype).and_then(Value::as_str)
    }
    pub fn filename(&self) -> Option<&str> {
        self.get(&MetaTagType::MetaTagFilename).and_then(Value::as_str)
    }
    pub fn width(&self) -> Option<u64> {
        self.get(&MetaTagType::MetaTagWidth).and_then(value_as_u64)
    }
    pub fn height(&self) -> Option<u64> {
        self.get(&MetaTagType::MetaTagHeight).and_then(value_as_u64)
    }
    /// Upload time; the service reports it in milliseconds since the epoch.
    pub fn uploaded(&self) -> Option<DateTime<Utc>> {
        self.get(&MetaTagType::MetaTagUploaded)
            .and_then(value_as_u64)
            .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
    }
    pub fn writeable(&self) -> Option<bool> {
        self.get(&MetaTagType::MetaTagWriteable).and_then(Value::as_bool)
    }
    pub fn md5(&self) -> Option<&str> {
        self.get(&MetaTagType::MetaTagMd5).and_then(Value::as_str)
    }
    pub fn location(&self) -> Option<StorageType> {
        self.get(&MetaTagType::MetaTagLocation).and_then(Value::as_str).and_then(StorageType::from)
    }
    pub fn path(&self) -> Option<&str> {
        self.get(&MetaTagType::MetaTagPath).and_then(Value::as_str)
    }
    pub fn container(&self) -> Option<&str> {
        self.get(&MetaTagType::MetaTagContainer).and_then(Value::as_str)
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value.as_u64() {
        Some(x) => Some(x),
        None => value.as_f64().filter(|x| *x >= 0.0).map(|x| x as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let metadata: Metadata = serde_json::from_str(r#"{
            "size": 1024,
            "mimetype": "image/png",
            "filename": "image.png",
            "width": null,
            "height": 200.0,
            "uploaded": 1257894000000,
            "writeable": true,
            "md5": "d41d8cd98f00b204e9800998ecf8427e",
            "location": "S3",
            "path": "/photos/image.png",
            "container": "bucket"
        }"#).unwrap();
        assert_eq!(metadata.size(), Some(1024));
        assert_eq!(metadata.mimetype(), Some("image/png"));
        assert_eq!(metadata.filename(), Some("image.png"));
        assert_eq!(metadata.width(), None);
        assert_eq!(metadata.height(), Some(200));
        assert_eq!(metadata.uploaded().unwrap().timestamp(), 1257894000);
        assert_eq!(metadata.writeable(), Some(true));
        assert_eq!(metadata.md5(), Some("d41d8cd98f00b204e9800998ecf8427e"));
        assert_eq!(metadata.location(), Some(StorageType::StorageS3));
        assert_eq!(metadata.path(), Some("/photos/image.png"));
        assert_eq!(metadata.container(), Some("bucket"));
        assert!(!metadata.contains(&MetaTagType::MetaTagWidth));
    }

    #[test]
    fn test_absent_tags() {
        let metadata: Metadata = serde_json::from_str(r#"{"size": 0}"#).unwrap();
        assert_eq!(metadata.size(), Some(0));
        assert_eq!(metadata.mimetype(), None);
        assert_eq!(metadata.uploaded(), None);
        assert_eq!(metadata.len(), 1);
    }
}
