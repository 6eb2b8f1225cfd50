//! Excel生成（CLI版）

use crate::error::{Result, StyleAiError};
use crate::session::Session;
use std::path::Path;
use style_ai_common::export::excel_core::{generate_excel_buffer, WorkbookContent};

/// セッションの内容をxlsxに書き出す
///
/// 比較シートは2件選択済みのときだけ作られる。
pub fn generate_excel(session: &Session, output_path: &Path) -> Result<()> {
    let comparison = if session.comparison.can_compare() {
        match session.comparison.compare(&session.looks) {
            Ok(comparison) => Some(comparison),
            Err(e) => {
                tracing::debug!(error = %e, "comparison sheet skipped");
                None
            }
        }
    } else {
        None
    };

    let content = WorkbookContent {
        history: session.looks.records(),
        favorites: session.favorites.records(),
        comparison: comparison.as_ref(),
    };
    let buffer = generate_excel_buffer(&content).map_err(StyleAiError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    tracing::info!(path = %output_path.display(), "excel written");
    Ok(())
}
