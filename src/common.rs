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
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{FpError, GenericError};

/// Installs a global subscriber writing to a daily rolling file under `directory`.
/// Keep the returned guard alive for as long as logs should be flushed. Fails when a
/// global subscriber is already installed.
pub fn init_tracing_log(directives: impl AsRef<str>, directory: impl AsRef<Path>,
                        file_name_prefix: impl AsRef<Path>) -> Result<WorkerGuard, FpError> {
    let file_appender = tracing_appender::rolling::daily(directory, file_name_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::new(directives))
        .with_ansi(false).try_init();
    match result {
        Ok(_) => Ok(guard),
        Err(e) => Err(FpError::client_error_with_cause("init tracing log error", GenericError::DefaultError(e.to_string()))),
    }
}

pub trait RequestInfoTrait {
    fn status_code(&self) -> isize;
    fn header(&self) -> &HashMap<String, String>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestInfo {
    pub(crate) status_code: isize,
    pub(crate) header: HashMap<String, String>,
}

impl RequestInfo {
    pub fn status_code(&self) -> isize {
        self.status_code
    }

    pub fn header(&self) -> &HashMap<String, String> {
        &self.header
    }
}

impl RequestInfoTrait for RequestInfo {
    fn status_code(&self) -> isize {
        self.status_code
    }

    fn header(&self) -> &HashMap<String, String> {
        &self.header
    }
}
