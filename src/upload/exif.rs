use anyhow::{anyhow, Context};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIFの撮影日時を取得（DateTimeOriginal → DateTime の順）
pub fn extract_date(path: &Path) -> anyhow::Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut bufreader = BufReader::new(file);
    let exif = exif::Reader::new()
        .read_from_container(&mut bufreader)
        .context("EXIF読み込み")?;

    for tag in [exif::Tag::DateTimeOriginal, exif::Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, exif::In::PRIMARY) {
            return Ok(field.display_value().to_string());
        }
    }

    Err(anyhow!("No date found in EXIF"))
}
