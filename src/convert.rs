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
use std::sync::Arc;

use filepicker_generic::{BlobSetter, SecurityQuery};

use crate::blob::{Blob, BlobOutput};
use crate::config::ConfigHolder;
use crate::constant::*;
use crate::enumeration::HttpMethodType::HttpMethodPost;
use crate::enumeration::{AlignType, FitType, StorageType};
use crate::error::FpError;
use crate::http::{HttpBody, HttpRequest};
use crate::internal::{map_insert, map_insert_bool, map_insert_number, set_api_key, set_security_query, InputDescriptor, InputTranslator};
use crate::security::Security;

pub trait ConvertAPI {
    /// Converts the file and stores the result as a new file, leaving the source untouched.
    fn convert(&self, input: &ConvertInput) -> Result<BlobOutput, FpError>;
}

/// Conversion parameters. Image options are ignored by the service for other file types,
/// and unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Default, BlobSetter, SecurityQuery)]
pub struct ConvertInput {
    pub(crate) blob: Blob,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) fit: Option<FitType>,
    pub(crate) align: Option<AlignType>,
    pub(crate) format: String,
    pub(crate) compress: bool,
    pub(crate) quality: u8,
    pub(crate) rotate: i32,
    pub(crate) filename: String,
    pub(crate) location: Option<StorageType>,
    pub(crate) path: String,
    pub(crate) container: String,
    pub(crate) access: String,
    pub(crate) security: Option<Security>,
}

impl ConvertInput {
    pub fn new(blob: impl Into<Blob>) -> Self {
        Self {
            blob: blob.into(),
            ..Default::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn fit(&self) -> &Option<FitType> {
        &self.fit
    }
    pub fn align(&self) -> &Option<AlignType> {
        &self.align
    }
    pub fn format(&self) -> &str {
        &self.format
    }
    pub fn compress(&self) -> bool {
        self.compress
    }
    pub fn quality(&self) -> u8 {
        self.quality
    }
    pub fn rotate(&self) -> i32 {
        self.rotate
    }
    pub fn filename(&self) -> &str {
        &self.filename
    }
    pub fn location(&self) -> &Option<StorageType> {
        &self.location
    }
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn container(&self) -> &str {
        &self.container
    }
    pub fn access(&self) -> &str {
        &self.access
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }
    pub fn set_fit(&mut self, fit: impl Into<FitType>) {
        self.fit = Some(fit.into());
    }
    pub fn set_align(&mut self, align: impl Into<AlignType>) {
        self.align = Some(align.into());
    }
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }
    /// Only honoured for jpeg and png output.
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }
    pub fn set_quality(&mut self, quality: u8) {
        self.quality = quality;
    }
    pub fn set_rotate(&mut self, rotate: i32) {
        self.rotate = rotate;
    }
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }
    pub fn set_location(&mut self, location: impl Into<StorageType>) {
        self.location = Some(location.into());
    }
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
    pub fn set_container(&mut self, container: impl Into<String>) {
        self.container = container.into();
    }
    pub fn set_access(&mut self, access: impl Into<String>) {
        self.access = access.into();
    }
}

impl InputDescriptor for ConvertInput {
    fn operation(&self) -> &str {
        CONVERT_OPERATION
    }
}

impl InputTranslator for ConvertInput {
    fn trans(&self, config_holder: Arc<ConfigHolder>) -> Result<HttpRequest<'_>, FpError> {
        let mut request = self.trans_blob(PATH_CONVERT)?;
        request.method = HttpMethodPost;

        let mut form = HashMap::with_capacity(16);
        map_insert_number(&mut form, QUERY_WIDTH, self.width);
        map_insert_number(&mut form, QUERY_HEIGHT, self.height);
        if let Some(ref fit) = self.fit {
            map_insert(&mut form, QUERY_FIT, fit.as_str());
        }
        if let Some(ref align) = self.align {
            map_insert(&mut form, QUERY_ALIGN, align.as_str());
        }
        map_insert(&mut form, QUERY_FORMAT, &self.format);
        map_insert_bool(&mut form, QUERY_COMPRESS, self.compress);
        map_insert_number(&mut form, QUERY_QUALITY, self.quality);
        map_insert_number(&mut form, QUERY_ROTATE, self.rotate);
        map_insert(&mut form, QUERY_FILENAME, &self.filename);
        if let Some(ref location) = self.location {
            map_insert(&mut form, QUERY_STORE_LOCATION, location.as_str());
        }
        map_insert(&mut form, QUERY_STORE_PATH, &self.path);
        map_insert(&mut form, QUERY_STORE_CONTAINER, &self.container);
        map_insert(&mut form, QUERY_STORE_ACCESS, &self.access);
        set_security_query(&mut form, self);
        set_api_key(&mut form, &config_holder);
        request.body = Some(HttpBody::Form(form));
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::AlignType::AlignTop;
    use crate::enumeration::FitType::FitScale;
    use crate::enumeration::StorageType::StorageAzure;
    use crate::internal::{encode_query, get_request_url};

    fn form_of(input: &ConvertInput) -> String {
        let mut config_holder = ConfigHolder::default();
        config_holder.check("", "0KKK1").unwrap();
        let request = input.trans(Arc::new(config_holder)).unwrap();
        assert_eq!(get_request_url(&request), "https://www.filepicker.io/api/file/2HHH3/convert");
        match request.body {
            Some(HttpBody::Form(ref form)) => encode_query(form),
            ref other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_convert_form() {
        let mut input = ConvertInput::new(Blob::new("2HHH3"));
        input.set_width(100);
        input.set_location(StorageAzure);
        assert_eq!(form_of(&input), "key=0KKK1&storeLocation=azure&width=100");

        let mut input = ConvertInput::new(Blob::new("2HHH3"));
        input.set_width(150);
        input.set_height(200);
        input.set_fit(FitScale);
        assert_eq!(form_of(&input), "fit=scale&height=200&key=0KKK1&width=150");

        let mut input = ConvertInput::new(Blob::new("2HHH3"));
        input.set_align(AlignTop);
        input.set_quality(34);
        assert_eq!(form_of(&input), "align=top&key=0KKK1&quality=34");

        let mut input = ConvertInput::new(Blob::new("2HHH3"));
        input.set_width(100);
        input.set_security(Security::from_parts("P", "S"));
        assert_eq!(form_of(&input), "key=0KKK1&policy=P&signature=S&width=100");
    }
}
