//! アップロード読み込みの統合テスト

use std::path::Path;
use style_ai_rust::error::StyleAiError;
use style_ai_rust::upload;
use tempfile::tempdir;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(path).expect("PNG作成失敗");
}

#[test]
fn test_read_png_upload() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let path = dir.path().join("look.png");
    write_png(&path, 4, 3);

    let upload = upload::read_upload(&path, false).expect("読み込み失敗");
    assert_eq!(upload.file_name, "look.png");
    assert_eq!((upload.width, upload.height), (4, 3));
    assert_eq!(upload.fingerprint.len(), 16);
    assert!(upload.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(Path::new(&upload.image_ref).is_absolute());
    assert!(!upload.date.is_empty(), "EXIFなしでも日時が入る");
}

#[test]
fn test_embedded_upload_is_data_url() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let path = dir.path().join("look.png");
    write_png(&path, 2, 2);

    let upload = upload::read_upload(&path, true).expect("読み込み失敗");
    assert!(upload.image_ref.starts_with("data:image/png;base64,"));
}

#[test]
fn test_same_content_same_fingerprint() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&a, 5, 5);
    std::fs::copy(&a, &b).expect("コピー失敗");

    let ua = upload::read_upload(&a, false).expect("読み込み失敗");
    let ub = upload::read_upload(&b, false).expect("読み込み失敗");
    assert_eq!(ua.fingerprint, ub.fingerprint);
    assert_eq!(ua.seed(), ub.seed());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let path = dir.path().join("anim.gif");
    std::fs::write(&path, b"GIF89a").expect("書き込み失敗");

    let result = upload::read_upload(&path, false);
    assert!(matches!(result, Err(StyleAiError::UnsupportedImage(_))));
}

#[test]
fn test_broken_image() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"not an image").expect("書き込み失敗");

    let result = upload::read_upload(&path, false);
    assert!(matches!(result, Err(StyleAiError::ImageLoad(_))));
}

#[test]
fn test_scan_folder_skips_unreadable() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    write_png(&dir.path().join("b.png"), 3, 3);
    write_png(&dir.path().join("a.png"), 3, 3);
    std::fs::write(dir.path().join("broken.jpg"), b"dummy").expect("書き込み失敗");
    std::fs::write(dir.path().join("readme.txt"), b"text").expect("書き込み失敗");

    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).expect("ディレクトリ作成失敗");
    write_png(&sub.join("nested.png"), 3, 3);

    let uploads = upload::scan_folder(dir.path(), false).expect("スキャン失敗");
    let names: Vec<&str> = uploads.iter().map(|u| u.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
}
