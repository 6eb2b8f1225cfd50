pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::session::Session;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

/// 履歴・お気に入り・比較をファイルに出力する
pub fn export_session(session: &Session, format: &ExportFormat, output: &Path, title: &str) -> Result<PathBuf> {
    match format {
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, title, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(session, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
            Ok(output_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().expect("一時ディレクトリ作成失敗");
        let path = output_path_for_format(dir.path(), "looks", "xlsx");
        assert_eq!(path, dir.path().join("looks.xlsx"));
    }

    #[test]
    fn test_output_path_keeps_file_name() {
        let path = output_path_for_format(Path::new("/tmp/out/report.xlsx"), "looks", "xlsx");
        assert_eq!(path, PathBuf::from("/tmp/out/report.xlsx"));
    }
}
