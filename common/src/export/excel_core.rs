//! Excel生成（共通ライブラリ）
//!
//! 履歴・お気に入り・比較結果を1ブックにまとめる

use crate::comparison::Comparison;
use crate::types::{FavoriteRecord, LookRecord};
use rust_xlsxwriter::*;

/// 表の列（ラベル, キー, 幅）
const LOOK_COLUMNS: &[(&str, &str, f64)] = &[
    ("ID", "id", 6.0),
    ("日時", "date", 18.0),
    ("スコア", "score", 8.0),
    ("スタイル", "style", 14.0),
    ("画像", "imageRef", 48.0),
    ("メモ", "notes", 24.0),
    ("タグ", "tags", 28.0),
];

/// ルック行のトレイト（履歴とお気に入りの両方に対応）
pub trait LookData {
    fn look(&self) -> &LookRecord;
    fn notes(&self) -> &str {
        ""
    }
    fn tags(&self) -> String {
        String::new()
    }
}

impl LookData for LookRecord {
    fn look(&self) -> &LookRecord { self }
}

impl LookData for FavoriteRecord {
    fn look(&self) -> &LookRecord { &self.look }
    fn notes(&self) -> &str { self.notes.as_deref().unwrap_or("") }
    fn tags(&self) -> String {
        self.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")
    }
}

/// フィールド値を取得
fn get_field_value<T: LookData>(data: &T, key: &str) -> String {
    let look = data.look();
    match key {
        "id" => look.id.to_string(),
        "date" => {
            if look.date.is_empty() { "-".to_string() } else { look.date.clone() }
        }
        "score" => look.score.to_string(),
        "style" => look.style.clone(),
        // Data URLは長すぎるので種別だけ
        "imageRef" if look.image_ref.starts_with("data:") => "(埋め込み画像)".to_string(),
        "imageRef" => look.image_ref.clone(),
        "notes" => data.notes().to_string(),
        "tags" => data.tags(),
        _ => "-".to_string(),
    }
}

/// 出力対象
pub struct WorkbookContent<'a> {
    pub history: &'a [LookRecord],
    pub favorites: &'a [FavoriteRecord],
    pub comparison: Option<&'a Comparison>,
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(content: &WorkbookContent<'_>) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    write_look_sheet(&mut workbook, "履歴", content.history, 5, &header_format, &value_format)?;
    write_look_sheet(&mut workbook, "お気に入り", content.favorites, LOOK_COLUMNS.len(), &header_format, &value_format)?;

    if let Some(comparison) = content.comparison {
        write_comparison_sheet(&mut workbook, comparison, &header_format, &value_format)?;
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_look_sheet<T: LookData>(
    workbook: &mut Workbook,
    name: &str,
    rows: &[T],
    column_count: usize,
    header_format: &Format,
    value_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (label, _, width)) in LOOK_COLUMNS.iter().take(column_count).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, col, *label, header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = idx as u32 + 1;
        for (col, (_, key, _)) in LOOK_COLUMNS.iter().take(column_count).enumerate() {
            let value = get_field_value(row, key);
            worksheet.write_string_with_format(excel_row, col as u16, &value, value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    Ok(())
}

fn write_comparison_sheet(
    workbook: &mut Workbook,
    comparison: &Comparison,
    header_format: &Format,
    value_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("比較")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    worksheet.set_column_width(0, 22.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    for col in 1..=3u16 {
        worksheet.set_column_width(col, 14.0)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    let headers = [
        "項目".to_string(),
        format!("ルック{}", comparison.look1.id),
        format!("ルック{}", comparison.look2.id),
        "差".to_string(),
    ];
    for (col, label) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    let mut rows: Vec<(String, i16, i16)> = vec![(
        "総合スコア".to_string(),
        comparison.look1.score as i16,
        comparison.look2.score as i16,
    )];
    rows.extend(
        comparison
            .criteria
            .iter()
            .map(|c| (c.name.clone(), c.score1 as i16, c.score2 as i16)),
    );

    for (idx, (label, score1, score2)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string_with_format(row, 0, label, value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(row, 1, *score1 as f64, value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(row, 2, *score2 as f64, value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(row, 3, (*score2 - *score1) as f64, value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    let note_row = rows.len() as u32 + 2;
    worksheet.write_string_with_format(note_row, 0, comparison.recommendation(), value_format)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;

    Ok(())
}
