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
use reqwest::Method;
use serde::{Deserialize, Serialize};

use filepicker_generic::FromRefAndDisplay;

/// Storage backend a file lives on.
#[derive(Debug, Clone, PartialEq, Eq, Default, FromRefAndDisplay, Serialize, Deserialize)]
pub enum StorageType {
    #[default]
    #[serde(rename = "S3")]
    StorageS3,
    #[serde(rename = "azure")]
    StorageAzure,
    #[serde(rename = "dropbox")]
    StorageDropbox,
    #[serde(rename = "rackspace")]
    StorageRackspace,
}

impl StorageType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StorageS3 => "S3",
            Self::StorageAzure => "azure",
            Self::StorageDropbox => "dropbox",
            Self::StorageRackspace => "rackspace",
        }
    }
    pub(crate) fn from(value: &str) -> Option<Self> {
        match value {
            "S3" => Some(Self::StorageS3),
            "azure" => Some(Self::StorageAzure),
            "dropbox" => Some(Self::StorageDropbox),
            "rackspace" => Some(Self::StorageRackspace),
            _ => None,
        }
    }
}

/// Operation a policy grants.
#[derive(Debug, Clone, PartialEq, Eq, FromRefAndDisplay, Serialize, Deserialize)]
pub enum CallType {
    #[serde(rename = "pick")]
    CallPick,
    #[serde(rename = "read")]
    CallRead,
    #[serde(rename = "stat")]
    CallStat,
    #[serde(rename = "write")]
    CallWrite,
    #[serde(rename = "writeUrl")]
    CallWriteUrl,
    #[serde(rename = "store")]
    CallStore,
    #[serde(rename = "convert")]
    CallConvert,
    #[serde(rename = "remove")]
    CallRemove,
}

impl CallType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CallPick => "pick",
            Self::CallRead => "read",
            Self::CallStat => "stat",
            Self::CallWrite => "write",
            Self::CallWriteUrl => "writeUrl",
            Self::CallStore => "store",
            Self::CallConvert => "convert",
            Self::CallRemove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, FromRefAndDisplay)]
pub enum FitType {
    #[default]
    FitClip,
    FitCrop,
    FitScale,
    FitMax,
}

impl FitType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FitClip => "clip",
            Self::FitCrop => "crop",
            Self::FitScale => "scale",
            Self::FitMax => "max",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, FromRefAndDisplay)]
pub enum AlignType {
    #[default]
    AlignTop,
    AlignBottom,
    AlignLeft,
    AlignRight,
    AlignFaces,
}

impl AlignType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AlignTop => "top",
            Self::AlignBottom => "bottom",
            Self::AlignLeft => "left",
            Self::AlignRight => "right",
            Self::AlignFaces => "faces",
        }
    }
}

/// Metadata attribute requested by a stat call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRefAndDisplay)]
pub enum MetaTagType {
    MetaTagSize,
    MetaTagMimetype,
    MetaTagFilename,
    MetaTagWidth,
    MetaTagHeight,
    MetaTagUploaded,
    MetaTagWriteable,
    MetaTagMd5,
    MetaTagLocation,
    MetaTagPath,
    MetaTagContainer,
}

impl MetaTagType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MetaTagSize => "size",
            Self::MetaTagMimetype => "mimetype",
            Self::MetaTagFilename => "filename",
            Self::MetaTagWidth => "width",
            Self::MetaTagHeight => "height",
            Self::MetaTagUploaded => "uploaded",
            Self::MetaTagWriteable => "writeable",
            Self::MetaTagMd5 => "md5",
            Self::MetaTagLocation => "location",
            Self::MetaTagPath => "path",
            Self::MetaTagContainer => "container",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, FromRefAndDisplay)]
pub enum HttpMethodType {
    #[default]
    HttpMethodGet,
    HttpMethodPost,
    HttpMethodDelete,
}

impl HttpMethodType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::HttpMethodGet => "GET",
            Self::HttpMethodPost => "POST",
            Self::HttpMethodDelete => "DELETE",
        }
    }

    pub fn as_http_method(&self) -> Method {
        match self {
            Self::HttpMethodGet => Method::GET,
            Self::HttpMethodPost => Method::POST,
            Self::HttpMethodDelete => Method::DELETE,
        }
    }
}
