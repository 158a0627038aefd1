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
//! Client library for the Filepicker file storage and conversion service.
//!
//! Build a client with [`filepicker::builder`] (or [`asynchronous::filepicker::builder`]), sign
//! capabilities with [`security::Security`], and call the store, file and convert APIs.

pub mod filepicker;
pub mod store;
pub mod file;
pub mod convert;
pub mod blob;
pub mod metadata;
pub mod policy;
pub mod security;
pub mod common;
pub mod enumeration;
pub mod error;
#[cfg(feature = "asynchronous")]
pub mod asynchronous;
mod config;
mod constant;
mod http;
mod internal;
