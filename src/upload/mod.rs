//! 画像アップロード読み込み
//!
//! 単一ファイルとフォルダ一括の両方に対応する。読み込んだ画像は
//! 絶対パスかData URLとして `image_ref` に入り、解析タブで表示される。

mod exif;

use crate::error::{Result, StyleAiError};
use base64::Engine;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// 読み込み済みアップロード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub path: PathBuf,
    pub file_name: String,
    pub image_ref: String,
    /// 内容のSHA-256先頭16桁（モック解析のシード）
    pub fingerprint: String,
    pub date: String,
    pub width: u32,
    pub height: u32,
}

impl Upload {
    /// 指紋からモック解析用のシード値を作る
    pub fn seed(&self) -> u64 {
        u64::from_str_radix(&self.fingerprint, 16).unwrap_or_default()
    }
}

fn is_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// 画像ファイルを1枚読み込む
pub fn read_upload(path: &Path, embed: bool) -> Result<Upload> {
    if !path.is_file() {
        return Err(StyleAiError::FileNotFound(path.display().to_string()));
    }
    if !is_image_extension(path) {
        return Err(StyleAiError::UnsupportedImage(path.display().to_string()));
    }

    let (width, height) = image::image_dimensions(path)
        .map_err(|e| StyleAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    let fingerprint = hex::encode(digest)[..16].to_string();

    let absolute = std::fs::canonicalize(path)?;
    let image_ref = if embed {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        format!("data:{};base64,{}", mime_type(path), encoded)
    } else {
        absolute.display().to_string()
    };

    let date = match exif::extract_date(path) {
        Ok(date) => date,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no exif date");
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(file = %file_name, width, height, %fingerprint, "upload read");

    Ok(Upload {
        path: absolute,
        file_name,
        image_ref,
        fingerprint,
        date,
        width,
        height,
    })
}

/// フォルダ直下の画像をまとめて読み込む
///
/// 読めなかったファイルは警告だけ出して飛ばす。結果はファイル名順。
pub fn scan_folder(folder: &Path, embed: bool) -> Result<Vec<Upload>> {
    if !folder.is_dir() {
        return Err(StyleAiError::FolderNotFound(folder.display().to_string()));
    }

    let paths: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image_extension(p))
        .collect();

    let mut uploads: Vec<Upload> = paths
        .par_iter()
        .filter_map(|path| match read_upload(path, embed) {
            Ok(upload) => Some(upload),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable image");
                None
            }
        })
        .collect();

    uploads.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(uploads)
}
