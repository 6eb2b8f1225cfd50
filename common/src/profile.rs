//! プロフィール解析・スタイル嗜好の型
//!
//! プロフィールAPIとやり取りするペイロード。フィールド名はAPI側（snake_case）に合わせ、
//! 取得時のDB列名（ai_ 接頭辞）も受け付ける。

use crate::error::{Error, Result};
use crate::types::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};

/// 予算の初期値（API側のデフォルトと同じ）
pub const DEFAULT_BUDGET_MIN: u32 = 5_000;
pub const DEFAULT_BUDGET_MAX: u32 = 200_000;

/// プロフィール写真のAI解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub profile_photo_url: String,
    #[serde(alias = "ai_color_type", deserialize_with = "null_as_default")]
    pub color_type: String,
    #[serde(alias = "ai_body_type", deserialize_with = "null_as_default")]
    pub body_type: String,
    #[serde(alias = "ai_recommended_styles", deserialize_with = "null_as_default")]
    pub recommended_styles: Vec<String>,
    #[serde(alias = "ai_recommended_colors", deserialize_with = "null_as_default")]
    pub recommended_colors: Vec<String>,
    #[serde(alias = "ai_avoid_colors", deserialize_with = "null_as_default")]
    pub avoid_colors: Vec<String>,
    #[serde(alias = "ai_similar_celebrities", deserialize_with = "null_as_default")]
    pub similar_celebrities: Vec<String>,
}

/// 推奨の種類ごとの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    ColorType(String),
    BodyType(String),
    Styles(Vec<String>),
    Colors { recommended: Vec<String>, avoid: Vec<String> },
    Celebrities(Vec<String>),
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::ColorType(_) => "カラータイプ",
            Recommendation::BodyType(_) => "体型",
            Recommendation::Styles(_) => "おすすめスタイル",
            Recommendation::Colors { .. } => "カラー",
            Recommendation::Celebrities(_) => "似ている有名人",
        }
    }
}

impl AppearanceAnalysis {
    /// 空でない項目だけを推奨リストにする
    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut out = Vec::new();
        if !self.color_type.is_empty() {
            out.push(Recommendation::ColorType(self.color_type.clone()));
        }
        if !self.body_type.is_empty() {
            out.push(Recommendation::BodyType(self.body_type.clone()));
        }
        if !self.recommended_styles.is_empty() {
            out.push(Recommendation::Styles(self.recommended_styles.clone()));
        }
        if !self.recommended_colors.is_empty() || !self.avoid_colors.is_empty() {
            out.push(Recommendation::Colors {
                recommended: self.recommended_colors.clone(),
                avoid: self.avoid_colors.clone(),
            });
        }
        if !self.similar_celebrities.is_empty() {
            out.push(Recommendation::Celebrities(self.similar_celebrities.clone()));
        }
        out
    }
}

/// スタイル嗜好アンケート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePreferences {
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_styles: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_occasions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_celebrities: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fashion_icons: String,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_brands: String,
    #[serde(deserialize_with = "budget_min_or_default")]
    pub budget_min: u32,
    #[serde(deserialize_with = "budget_max_or_default")]
    pub budget_max: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_notes: String,
}

fn budget_min_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_BUDGET_MIN))
}

fn budget_max_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_BUDGET_MAX))
}

impl Default for StylePreferences {
    fn default() -> Self {
        Self {
            favorite_styles: Vec::new(),
            favorite_occasions: Vec::new(),
            favorite_colors: Vec::new(),
            favorite_celebrities: String::new(),
            fashion_icons: String::new(),
            favorite_brands: String::new(),
            budget_min: DEFAULT_BUDGET_MIN,
            budget_max: DEFAULT_BUDGET_MAX,
            additional_notes: String::new(),
        }
    }
}

impl StylePreferences {
    pub fn validate(&self) -> Result<()> {
        if self.budget_min > self.budget_max {
            return Err(Error::Validation(format!(
                "予算の下限({})が上限({})を超えています",
                self.budget_min, self.budget_max
            )));
        }
        Ok(())
    }
}
