//! 画像認識オーバーレイ
//!
//! 画像ごとの認識結果（事前計算済みのモックデータ）に対する読み取り専用ビュー。
//! 選択中アイテムのハイライトと類似商品の並び替えだけを扱う。

use crate::types::{RecognizedItem, SimilarProduct};
use std::cmp::Reverse;

#[derive(Debug, Clone, Default)]
pub struct RecognitionOverlay {
    items: Vec<RecognizedItem>,
    selected: Option<u32>,
}

impl RecognitionOverlay {
    pub fn new(items: Vec<RecognizedItem>) -> Self {
        Self { items, selected: None }
    }

    /// ハイライトするアイテムを設定（Noneで解除）
    pub fn select_item(&mut self, item_id: Option<u32>) {
        self.selected = item_id;
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&RecognizedItem> {
        self.selected.and_then(|id| self.item(id))
    }

    pub fn item(&self, item_id: u32) -> Option<&RecognizedItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn items(&self) -> &[RecognizedItem] {
        &self.items
    }

    /// 類似度の降順、同値はID昇順
    pub fn products_for(&self, item_id: u32) -> Vec<&SimilarProduct> {
        let mut products: Vec<&SimilarProduct> = self
            .item(item_id)
            .map(|item| item.similar_products.iter().collect())
            .unwrap_or_default();

        products.sort_by_key(|p| (Reverse(p.similarity), p.id));
        products
    }

    pub fn in_stock_count(&self, item_id: u32) -> usize {
        self.item(item_id)
            .map(|item| item.similar_products.iter().filter(|p| p.in_stock).count())
            .unwrap_or(0)
    }

    /// 座標（パーセント）にあるアイテム。重なっている場合は小さい矩形を優先
    pub fn item_at(&self, x: f32, y: f32) -> Option<&RecognizedItem> {
        self.items
            .iter()
            .filter(|item| item.bounding_box.contains(x, y))
            .min_by(|a, b| a.bounding_box.area().total_cmp(&b.bounding_box.area()))
    }
}
