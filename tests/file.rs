/*
 * Copyright (c) 2025 Beijing Volcano Engine Technology Co., Ltd.
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
use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use mockito::Matcher;

use crate::common::{blob_json, create_context, file_path, fake_security, init_test_log, Context, FAKE_HANDLE};
use filepicker_rust_sdk::enumeration::MetaTagType::{MetaTagMd5, MetaTagSize, MetaTagUploaded};
use filepicker_rust_sdk::enumeration::StorageType::StorageS3;
use filepicker_rust_sdk::error::{FpError, ServiceErrorCode};
use filepicker_rust_sdk::file::{DownloadInput, DownloadToFileInput, FileAPI, RemoveInput, StatInput, WriteFromBufferInput, WriteFromFileInput, WriteFromUrlInput};
use filepicker_rust_sdk::filepicker::{ConfigAware, FilepickerClient};

mod common;

#[test]
fn test_main() {
    init_test_log();
    let mut context = create_context();
    test_write(&mut context);
    test_download_to(&mut context);
    test_download_redirect(&mut context);
    test_download_to_file(&mut context);
    test_stat(&mut context);
    test_remove(&mut context);
}

fn test_write(context: &mut Context) {
    let blob_url = format!("{}{}", context.server().url(), file_path(""));
    let mock = context.server()
        .mock("POST", file_path("").as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="fileUpload"; filename="notes.txt""#.to_string()),
            Matcher::Regex("second draft".to_string()),
        ]))
        .with_status(200)
        .with_body(blob_json(&blob_url, "notes.txt", 12))
        .create();
    let mut input = WriteFromBufferInput::new(context.blob(), "second draft");
    input.set_file_name("notes.txt");
    let output = context.client().write_from_buffer(&input).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(output.blob().size(), Some(12));

    let dir = tempfile::tempdir().unwrap();
    let local_path = dir.path().join("draft.txt");
    fs::write(&local_path, "aGVsbG8=").unwrap();
    let mock = context.server()
        .mock("POST", file_path("?base64decode=true&policy=P&signature=S").as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="fileUpload"; filename="draft.txt""#.to_string()),
            Matcher::Regex("aGVsbG8=".to_string()),
        ]))
        .with_status(200)
        .with_body(blob_json(&blob_url, "draft.txt", 5))
        .create();
    let mut input = WriteFromFileInput::new(context.blob(), local_path.to_string_lossy());
    input.set_base64decode(true);
    input.set_security(fake_security());
    let output = context.client().write_from_file(&input).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(output.blob().filename(), Some("draft.txt"));

    let mock = context.server()
        .mock("POST", file_path("").as_str())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Exact("url=https%3A%2F%2Fwww.filepicker.com%2Fimage.png".to_string()))
        .with_status(200)
        .with_body(blob_json(&blob_url, "image.png", 2048))
        .create();
    let input = WriteFromUrlInput::new(context.blob(), "https://www.filepicker.com/image.png");
    let output = context.client().write_from_url(&input).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(output.blob().handle(), FAKE_HANDLE);

}

fn test_download_to(context: &mut Context) {
    let mock = context.server()
        .mock("GET", file_path("").as_str())
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_header("x-file-name", "hello.txt")
        .with_body("hello filepicker")
        .create();

    let mut buf = Vec::new();
    let output = context.client().download_to(&DownloadInput::new(context.blob()), &mut buf).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(buf, b"hello filepicker");
    assert_eq!(output.written(), 16);
    assert_eq!(output.file_name(), "hello.txt");
    assert_eq!(output.content_type(), "text/plain");
    assert_eq!(output.status_code(), 200);

    let mock = context.server()
        .mock("GET", file_path("?base64decode=true&policy=P&signature=S").as_str())
        .with_status(200)
        .with_body("hi")
        .create();
    let mut input = DownloadInput::new(context.blob());
    input.set_base64decode(true);
    input.set_security(fake_security());
    let mut buf = Vec::new();
    let output = context.client().download_to(&input, &mut buf).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(output.written(), 2);
    assert_eq!(output.file_name(), "");
}

fn test_download_redirect(context: &mut Context) {
    let location = format!("{}/cdn/{}", context.server().url(), FAKE_HANDLE);
    let mock = context.server()
        .mock("GET", file_path("").as_str())
        .with_status(302)
        .with_header("location", &location)
        .create();
    let cdn_mock = context.server()
        .mock("GET", format!("/cdn/{}", FAKE_HANDLE).as_str())
        .with_status(200)
        .with_header("x-file-name", "payload.bin")
        .with_body("payload")
        .create();

    let mut buf = Vec::new();
    let output = context.client().download_to(&DownloadInput::new(context.blob()), &mut buf).unwrap();
    mock.assert();
    cdn_mock.assert();
    drop(mock);
    drop(cdn_mock);
    assert_eq!(buf, b"payload");
    assert_eq!(output.status_code(), 200);
    assert_eq!(output.file_name(), "payload.bin");
}

fn test_download_to_file(context: &mut Context) {
    let dir = tempfile::tempdir().unwrap();
    let mock = context.server()
        .mock("GET", file_path("").as_str())
        .with_status(200)
        .with_header("x-file-name", "../hello.txt")
        .with_body("hello filepicker")
        .expect(2)
        .create();

    // a directory target takes the last component of the reported name
    let target = format!("{}/", dir.path().display());
    let output = context.client().download_to_file(&DownloadToFileInput::new(context.blob(), target)).unwrap();
    assert_eq!(output.file_path(), dir.path().join("hello.txt").as_path());
    assert_eq!(output.written(), 16);
    assert_eq!(fs::read_to_string(dir.path().join("hello.txt")).unwrap(), "hello filepicker");

    // an explicit file name wins and missing parents are created
    let target = dir.path().join("nested").join("deeper").join("copy.txt");
    let output = context.client().download_to_file(&DownloadToFileInput::new(context.blob(), target.to_string_lossy())).unwrap();
    assert_eq!(output.file_path(), target.as_path());
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello filepicker");
    mock.assert();
    drop(mock);

    let empty_dir = tempfile::tempdir().unwrap();
    let mock = context.server()
        .mock("GET", file_path("?policy=P&signature=S").as_str())
        .with_status(200)
        .with_body("nameless")
        .create();
    let mut input = DownloadToFileInput::new(context.blob(), empty_dir.path().to_string_lossy());
    input.set_security(fake_security());
    match context.client().download_to_file(&input) {
        Err(FpError::NamingError { message }) => assert!(message.contains(FAKE_HANDLE)),
        other => panic!("unexpected result {:?}", other),
    }
    mock.assert();
    drop(mock);
    assert_eq!(fs::read_dir(empty_dir.path()).unwrap().count(), 0);

    let mock = context.server()
        .mock("GET", file_path("?base64decode=true").as_str())
        .with_status(404)
        .with_body("File not found")
        .create();
    let target = dir.path().join("missing.txt");
    let mut input = DownloadToFileInput::new(context.blob(), target.to_string_lossy());
    input.set_base64decode(true);
    let error = context.client().download_to_file(&input).unwrap_err();
    mock.assert();
    drop(mock);
    assert_eq!(error.code(), Some(404));
    assert_eq!(error.message(), "File not found");
    assert!(!Path::new(&target).exists());
}

fn test_stat(context: &mut Context) {
    let mock = context.server()
        .mock("GET", file_path("/metadata?md5=true&policy=P&signature=S&size=true&uploaded=true").as_str())
        .with_status(200)
        .with_body(r#"{"size":16,"md5":"f0b2b6d8f4d7a4a1d0b2f7b8c9d0e1f2","uploaded":1508141504000.0,"location":"S3"}"#)
        .create();

    let mut input = StatInput::new_with_tags(context.blob(), vec![MetaTagSize, MetaTagMd5]);
    input.add_tag(MetaTagUploaded);
    input.set_security(fake_security());
    let output = context.client().stat(&input).unwrap();
    mock.assert();
    drop(mock);
    let metadata = output.metadata();
    assert_eq!(metadata.size(), Some(16));
    assert_eq!(metadata.md5(), Some("f0b2b6d8f4d7a4a1d0b2f7b8c9d0e1f2"));
    assert_eq!(metadata.uploaded(), Some(Utc.timestamp_opt(1508141504, 0).unwrap()));
    assert_eq!(metadata.location(), Some(StorageS3));
    assert!(metadata.contains(&MetaTagSize));
    assert_eq!(metadata.width(), None);

    let mock = context.server()
        .mock("GET", file_path("/metadata").as_str())
        .with_status(200)
        .with_body(r#"{"filename":"hello.txt","mimetype":"text/plain","width":null}"#)
        .create();
    let output = context.client().stat(&StatInput::new(context.blob())).unwrap();
    mock.assert();
    drop(mock);
    let metadata = output.into_metadata();
    assert_eq!(metadata.filename(), Some("hello.txt"));
    assert_eq!(metadata.mimetype(), Some("text/plain"));
    assert_eq!(metadata.width(), None);
    assert_eq!(metadata.len(), 3);
}

fn test_remove(context: &mut Context) {
    let mock = context.server()
        .mock("DELETE", file_path("?key=0KKK1").as_str())
        .with_status(200)
        .with_body("success")
        .create();
    let output = context.client().remove(&RemoveInput::new(context.blob())).unwrap();
    mock.assert();
    drop(mock);
    assert_eq!(output.status_code(), 200);

    assert!(!context.client().refresh_api_key("  "));
    assert!(context.client().refresh_api_key("9NNN9"));
    assert_eq!(context.client().api_key(), "9NNN9");
    let mock = context.server()
        .mock("DELETE", file_path("?key=9NNN9&policy=P&signature=S").as_str())
        .with_status(403)
        .with_body("Invalid signature")
        .create();
    let mut input = RemoveInput::new(context.blob());
    input.set_security(fake_security());
    let error = context.client().remove(&input).unwrap_err();
    mock.assert();
    drop(mock);
    assert_eq!(error.code(), Some(403));
    assert_eq!(error.service_error_code(), Some(ServiceErrorCode::InvalidRequest));
    assert_eq!(error.message(), "Invalid signature");
    assert!(error.request_url().ends_with("/api/file/2HHH3?key=9NNN9&policy=P&signature=S"));
}
