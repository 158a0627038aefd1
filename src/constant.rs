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
pub(crate) const DEFAULT_ENDPOINT: &str = "https://www.filepicker.io";
pub(crate) const DEFAULT_CONNECTION_TIMEOUT: isize = 10000;
pub(crate) const DEFAULT_REQUEST_TIMEOUT: isize = 120000;
pub(crate) const DEFAULT_MAX_CONNECTIONS: isize = 1024;
pub(crate) const DEFAULT_IDLE_CONNECTION_TIME: isize = 60000;
pub(crate) const DEFAULT_FOLLOW_REDIRECT_TIMES: isize = 10;
pub(crate) const DEFAULT_READ_BUFFER_SIZE: usize = 65536;
pub(crate) const MAX_READ_BUFFER_SIZE_FOR_JSON: usize = 20 * 1024 * 1024;

pub(crate) const SCHEMA_HTTP: &str = "http://";
pub(crate) const SCHEMA_HTTPS: &str = "https://";
pub(crate) const ALLOWED_IN_URL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
pub(crate) const UNDEFINED: &str = "undefined";
pub(crate) const SDK_NAME: &str = "filepicker-rust-sdk";
pub(crate) const TRUE: &str = "true";

// paths
pub(crate) const PATH_STORE: &str = "api/store";
pub(crate) const PATH_FILE: &str = "api/file";
pub(crate) const PATH_PICK: &str = "api/pick";
pub(crate) const PATH_METADATA: &str = "metadata";
pub(crate) const PATH_CONVERT: &str = "convert";

// headers
pub(crate) const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub(crate) const HEADER_FILE_NAME: &str = "X-File-Name";

pub(crate) const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub(crate) const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

// query and form keys
pub(crate) const QUERY_KEY: &str = "key";
pub(crate) const QUERY_POLICY: &str = "policy";
pub(crate) const QUERY_SIGNATURE: &str = "signature";
pub(crate) const QUERY_FILENAME: &str = "filename";
pub(crate) const QUERY_MIMETYPE: &str = "mimetype";
pub(crate) const QUERY_LOCATION: &str = "location";
pub(crate) const QUERY_PATH: &str = "path";
pub(crate) const QUERY_CONTAINER: &str = "container";
pub(crate) const QUERY_BASE64_DECODE: &str = "base64decode";
pub(crate) const QUERY_ACCESS: &str = "access";
pub(crate) const QUERY_WIDTH: &str = "width";
pub(crate) const QUERY_HEIGHT: &str = "height";
pub(crate) const QUERY_FIT: &str = "fit";
pub(crate) const QUERY_ALIGN: &str = "align";
pub(crate) const QUERY_FORMAT: &str = "format";
pub(crate) const QUERY_COMPRESS: &str = "compress";
pub(crate) const QUERY_QUALITY: &str = "quality";
pub(crate) const QUERY_ROTATE: &str = "rotate";
pub(crate) const QUERY_STORE_LOCATION: &str = "storeLocation";
pub(crate) const QUERY_STORE_PATH: &str = "storePath";
pub(crate) const QUERY_STORE_CONTAINER: &str = "storeContainer";
pub(crate) const QUERY_STORE_ACCESS: &str = "storeAccess";

pub(crate) const FORM_URL: &str = "url";
pub(crate) const FORM_FILE_UPLOAD: &str = "fileUpload";

// operations
pub(crate) const STORE_FROM_FILE_OPERATION: &str = "StoreFromFile";
pub(crate) const STORE_FROM_BUFFER_OPERATION: &str = "StoreFromBuffer";
pub(crate) const STORE_FROM_URL_OPERATION: &str = "StoreFromUrl";
pub(crate) const PICK_URL_OPERATION: &str = "PickUrl";
pub(crate) const WRITE_FROM_FILE_OPERATION: &str = "WriteFromFile";
pub(crate) const WRITE_FROM_BUFFER_OPERATION: &str = "WriteFromBuffer";
pub(crate) const WRITE_FROM_URL_OPERATION: &str = "WriteFromUrl";
pub(crate) const DOWNLOAD_OPERATION: &str = "Download";
pub(crate) const DOWNLOAD_TO_FILE_OPERATION: &str = "DownloadToFile";
pub(crate) const STAT_OPERATION: &str = "Stat";
pub(crate) const CONVERT_OPERATION: &str = "Convert";
pub(crate) const REMOVE_OPERATION: &str = "Remove";
