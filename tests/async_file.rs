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
use mockito::Matcher;
use tokio::{fs, runtime};

use crate::common::asynchronous::{create_async_context, AsyncContext};
use crate::common::{blob_json, fake_security, file_path, init_test_log, FAKE_HANDLE};
use filepicker_rust_sdk::asynchronous::convert::ConvertAPI;
use filepicker_rust_sdk::asynchronous::file::FileAPI;
use filepicker_rust_sdk::asynchronous::filepicker::FilepickerClient;
use filepicker_rust_sdk::asynchronous::store::StoreAPI;
use filepicker_rust_sdk::convert::ConvertInput;
use filepicker_rust_sdk::enumeration::MetaTagType::{MetaTagFilename, MetaTagSize};
use filepicker_rust_sdk::error::FpError;
use filepicker_rust_sdk::file::{DownloadInput, DownloadToFileInput, RemoveInput, StatInput, WriteFromUrlInput};
use filepicker_rust_sdk::filepicker::ConfigAware;
use filepicker_rust_sdk::store::{PickUrlInput, StoreFromBufferInput, StoreOptions};

mod common;

#[test]
fn test_main() {
    let rt = runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    init_test_log();

    rt.block_on(async {
        let mut context = create_async_context().await;
        test_store(&mut context).await;
        test_write(&mut context).await;
        test_download(&mut context).await;
        test_stat(&mut context).await;
        test_convert(&mut context).await;
        test_remove(&mut context).await;
    });
}

async fn test_store(context: &mut AsyncContext) {
    let blob_url = format!("{}{}", context.server().url(), file_path(""));
    let mock = context.server()
        .mock("POST", "/api/store/S3?filename=hello.txt&key=0KKK1")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="fileUpload"; filename="hello.txt""#.to_string()),
            Matcher::Regex("hello filepicker".to_string()),
        ]))
        .with_status(200)
        .with_body(blob_json(&blob_url, "hello.txt", 16))
        .create_async()
        .await;

    let mut options = StoreOptions::new();
    options.set_filename("hello.txt");
    let input = StoreFromBufferInput::new_with_options("hello filepicker", options);
    let output = context.client().store_from_buffer(&input).await.unwrap();
    mock.assert_async().await;
    drop(mock);
    assert_eq!(output.blob().handle(), FAKE_HANDLE);
    assert_eq!(output.blob().size(), Some(16));

    let mock = context.server()
        .mock("POST", "/api/pick?key=0KKK1&policy=P&signature=S")
        .match_body(Matcher::Exact("url=https%3A%2F%2Fwww.filepicker.com%2Fimage.png".to_string()))
        .with_status(200)
        .with_body(blob_json(&blob_url, "image.png", 2048))
        .create_async()
        .await;
    let mut input = PickUrlInput::new("https://www.filepicker.com/image.png");
    input.set_security(fake_security());
    let output = context.client().pick_url(&input).await.unwrap();
    mock.assert_async().await;
    assert_eq!(output.blob().filename(), Some("image.png"));
}

async fn test_write(context: &mut AsyncContext) {
    let blob_url = format!("{}{}", context.server().url(), file_path(""));
    let path = file_path("?base64decode=true");
    let mock = context.server()
        .mock("POST", path.as_str())
        .match_body(Matcher::Exact("url=https%3A%2F%2Fwww.filepicker.com%2Fencoded.txt".to_string()))
        .with_status(200)
        .with_body(blob_json(&blob_url, "encoded.txt", 5))
        .create_async()
        .await;
    let mut input = WriteFromUrlInput::new(context.blob(), "https://www.filepicker.com/encoded.txt");
    input.set_base64decode(true);
    let output = context.client().write_from_url(&input).await.unwrap();
    mock.assert_async().await;
    assert_eq!(output.blob().size(), Some(5));
}

async fn test_download(context: &mut AsyncContext) {
    let path = file_path("");
    let mock = context.server()
        .mock("GET", path.as_str())
        .with_status(200)
        .with_header("x-file-name", "hello.txt")
        .with_body("hello filepicker")
        .expect(2)
        .create_async()
        .await;

    let mut buf = Vec::new();
    let output = context.client().download_to(&DownloadInput::new(context.blob()), &mut buf).await.unwrap();
    assert_eq!(buf, b"hello filepicker");
    assert_eq!(output.written(), 16);
    assert_eq!(output.file_name(), "hello.txt");

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("sub").to_string_lossy().to_string() + "/";
    let output = context.client().download_to_file(&DownloadToFileInput::new(context.blob(), target)).await.unwrap();
    mock.assert_async().await;
    drop(mock);
    assert_eq!(output.file_path(), dir.path().join("sub").join("hello.txt").as_path());
    assert_eq!(fs::read_to_string(output.file_path()).await.unwrap(), "hello filepicker");

    let path = file_path("?policy=P&signature=S");
    let mock = context.server()
        .mock("GET", path.as_str())
        .with_status(200)
        .with_body("nameless")
        .create_async()
        .await;
    let mut input = DownloadToFileInput::new(context.blob(), dir.path().to_string_lossy());
    input.set_security(fake_security());
    match context.client().download_to_file(&input).await {
        Err(FpError::NamingError { .. }) => {}
        other => panic!("unexpected result {:?}", other),
    }
    mock.assert_async().await;
    drop(mock);
    let mut entries = fs::read_dir(dir.path()).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["sub".to_string()]);

    let location = format!("{}/cdn/{}", context.server().url(), FAKE_HANDLE);
    let path = file_path("?base64decode=true");
    let redirect_mock = context.server()
        .mock("GET", path.as_str())
        .with_status(302)
        .with_header("location", &location)
        .create_async()
        .await;
    let cdn_mock = context.server()
        .mock("GET", format!("/cdn/{}", FAKE_HANDLE).as_str())
        .with_status(200)
        .with_body("payload")
        .create_async()
        .await;
    let mut input = DownloadInput::new(context.blob());
    input.set_base64decode(true);
    let mut buf = Vec::new();
    context.client().download_to(&input, &mut buf).await.unwrap();
    redirect_mock.assert_async().await;
    cdn_mock.assert_async().await;
    drop(redirect_mock);
    drop(cdn_mock);
    assert_eq!(buf, b"payload");
}

async fn test_stat(context: &mut AsyncContext) {
    let path = file_path("/metadata?filename=true&size=true");
    let mock = context.server()
        .mock("GET", path.as_str())
        .with_status(200)
        .with_body(r#"{"filename":"hello.txt","size":16}"#)
        .create_async()
        .await;
    let input = StatInput::new_with_tags(context.blob(), vec![MetaTagSize, MetaTagFilename]);
    let output = context.client().stat(&input).await.unwrap();
    mock.assert_async().await;
    assert_eq!(output.metadata().size(), Some(16));
    assert_eq!(output.metadata().filename(), Some("hello.txt"));
}

async fn test_convert(context: &mut AsyncContext) {
    let converted_url = format!("{}{}", context.server().url(), "/api/file/5CCC5");
    let path = file_path("/convert");
    let mock = context.server()
        .mock("POST", path.as_str())
        .match_body(Matcher::Exact("format=pdf&key=0KKK1".to_string()))
        .with_status(200)
        .with_body(blob_json(&converted_url, "hello.pdf", 1024))
        .create_async()
        .await;
    let mut input = ConvertInput::new(context.blob());
    input.set_format("pdf");
    let output = context.client().convert(&input).await.unwrap();
    mock.assert_async().await;
    assert_eq!(output.blob().handle(), "5CCC5");
}

async fn test_remove(context: &mut AsyncContext) {
    let endpoint = context.client().endpoint();
    assert!(context.client().refresh_endpoint(format!("{}/", endpoint)));
    assert_eq!(context.client().endpoint(), endpoint);

    let path = file_path("?key=0KKK1");
    let mock = context.server()
        .mock("DELETE", path.as_str())
        .with_status(403)
        .with_body("Invalid security")
        .create_async()
        .await;
    let error = context.client().remove(&RemoveInput::new(context.blob())).await.unwrap_err();
    mock.assert_async().await;
    drop(mock);
    assert_eq!(error.code(), Some(403));
    assert_eq!(error.message(), "Invalid security");

    let mock = context.server()
        .mock("DELETE", path.as_str())
        .with_status(200)
        .create_async()
        .await;
    let output = context.client().remove(&RemoveInput::new(context.blob())).await.unwrap();
    mock.assert_async().await;
    assert_eq!(output.status_code(), 200);
}
