//! ルック・認識結果の型定義
//!
//! CLIとセッションファイルで共有される型:
//! - LookRecord: 解析済みのルック（履歴の1件）
//! - FavoriteRecord: お気に入り（LookRecord + メモ・タグ）
//! - RecognizedItem / SimilarProduct: 画像認識オーバーレイのデータ
//! - LookAnalysis: モック解析の出力

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// スコアの上限
pub const MAX_SCORE: u8 = 100;

/// 解析済みのルック
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookRecord {
    pub id: u32,

    /// 表示用の日時文字列
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub score: u8,

    /// スタイルタグ（Business / Evening / Casual / Sport ...）
    #[serde(default)]
    pub style: String,

    /// 画像参照（URL、ファイルパス、Data URL）
    #[serde(default, alias = "imageUrl")]
    pub image_ref: String,
}

impl LookRecord {
    pub fn new(
        id: u32,
        date: impl Into<String>,
        score: u8,
        style: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            score: score.min(MAX_SCORE),
            style: style.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// ストアへの追加用（IDは省略可能）
#[derive(Debug, Clone, Default)]
pub struct NewLook {
    pub id: Option<u32>,
    pub date: String,
    pub score: u8,
    pub style: String,
    pub image_ref: String,
}

/// お気に入りのルック
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    #[serde(flatten)]
    pub look: LookRecord,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// 重複なし・初出順
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FavoriteRecord {
    pub fn id(&self) -> u32 {
        self.look.id
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// タグの重複を除去（大文字小文字は区別、初出順を維持）
pub fn dedup_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(Into::into)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// `null` を既定値として読む（DBの未設定列は `null` で返る）
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 画像内の矩形（すべて0〜100のパーセント）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// 類似商品
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarProduct {
    pub id: u32,
    pub name: String,
    pub brand: String,
    /// 表示用価格（"2 999 ₽" など）
    pub price: String,
    pub similarity: u8,
    pub in_stock: bool,
    pub sizes: Vec<String>,
    pub image_url: String,
    pub store_url: String,
}

/// 認識されたアイテム
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognizedItem {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub confidence: u8,
    pub bounding_box: BoundingBox,
    pub similar_products: Vec<SimilarProduct>,
}

/// モック解析の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookAnalysis {
    pub overall_score: u8,
    pub style: String,
    pub occasion: String,
    pub colors: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_record_clamps_score() {
        let look = LookRecord::new(1, "10月31日 14:30", 150, "Business", "a.jpg");
        assert_eq!(look.score, 100);
    }

    #[test]
    fn test_look_record_serialize() {
        let look = LookRecord::new(3, "10月29日 10:20", 87, "Casual", "https://cdn.example/c.jpg");
        let json = serde_json::to_string(&look).expect("シリアライズ失敗");
        assert!(json.contains("\"imageRef\":\"https://cdn.example/c.jpg\""));
        assert!(json.contains("\"score\":87"));
    }

    #[test]
    fn test_look_record_accepts_image_url_alias() {
        let json = r#"{"id": 2, "score": 95, "style": "Evening", "imageUrl": "b.jpg"}"#;
        let look: LookRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(look.image_ref, "b.jpg");
        assert_eq!(look.date, ""); // デフォルト値
    }

    #[test]
    fn test_favorite_record_flattened() {
        let fav = FavoriteRecord {
            look: LookRecord::new(5, "", 90, "Evening", "e.jpg"),
            notes: Some("デート用".to_string()),
            tags: vec!["夜".to_string()],
        };

        let json = serde_json::to_string(&fav).expect("シリアライズ失敗");
        assert!(json.contains("\"id\":5"));
        assert!(json.contains("\"notes\":\"デート用\""));

        let restored: FavoriteRecord = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored, fav);
    }

    #[test]
    fn test_favorite_record_missing_tags() {
        let json = r#"{"id": 1, "score": 70, "style": "Sport", "imageRef": "s.jpg"}"#;
        let fav: FavoriteRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(fav.tags.is_empty());
        assert!(fav.notes.is_none());
    }

    #[test]
    fn test_dedup_tags_keeps_first_seen_order() {
        let tags = dedup_tags(["work", "Work", "work", "office"]);
        assert_eq!(tags, vec!["work", "Work", "office"]);
    }

    #[test]
    fn test_bounding_box_contains() {
        let bbox = BoundingBox { x: 30.0, y: 20.0, width: 40.0, height: 30.0 };
        assert!(bbox.contains(50.0, 35.0));
        assert!(bbox.contains(30.0, 20.0));
        assert!(!bbox.contains(10.0, 35.0));
        assert!(!bbox.contains(50.0, 60.0));
    }

    #[test]
    fn test_recognized_item_deserialize_defaults() {
        let json = r#"{"id": 7, "name": "スカーフ"}"#;
        let item: RecognizedItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item.id, 7);
        assert!(item.similar_products.is_empty());
        assert_eq!(item.bounding_box, BoundingBox::default());
    }
}
