//! カプセルワードローブ
//!
//! ユーザーが選んだワードローブアイテムの名前付きセット。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardrobeCategory {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
}

impl WardrobeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            WardrobeCategory::Tops => "トップス",
            WardrobeCategory::Bottoms => "ボトムス",
            WardrobeCategory::Dresses => "ワンピース",
            WardrobeCategory::Outerwear => "アウター",
            WardrobeCategory::Shoes => "シューズ",
            WardrobeCategory::Accessories => "アクセサリー",
        }
    }
}

impl std::str::FromStr for WardrobeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tops" | "top" => Ok(WardrobeCategory::Tops),
            "bottoms" | "bottom" => Ok(WardrobeCategory::Bottoms),
            "dresses" | "dress" => Ok(WardrobeCategory::Dresses),
            "outerwear" => Ok(WardrobeCategory::Outerwear),
            "shoes" => Ok(WardrobeCategory::Shoes),
            "accessories" | "accessory" => Ok(WardrobeCategory::Accessories),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: u32,
    pub name: String,
    pub category: WardrobeCategory,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub items: Vec<WardrobeItem>,
    #[serde(default)]
    pub combinations: u32,
    #[serde(default)]
    pub created_at: String,
}

impl Capsule {
    fn count(&self, category: WardrobeCategory) -> u32 {
        self.items.iter().filter(|i| i.category == category).count() as u32
    }

    /// 組み合わせ数の見積もり: (トップス×ボトムス + ワンピース) × max(シューズ, 1)
    pub fn estimate_combinations(&self) -> u32 {
        let base = self.count(WardrobeCategory::Tops) * self.count(WardrobeCategory::Bottoms)
            + self.count(WardrobeCategory::Dresses);
        if base == 0 {
            return 0;
        }
        base * self.count(WardrobeCategory::Shoes).max(1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapsuleWardrobe {
    capsules: Vec<Capsule>,
    next_id: u32,
}

impl CapsuleWardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, capsules: Vec<Capsule>) {
        self.next_id = capsules.iter().map(|c| c.id).max().map_or(1, |max| max + 1);
        self.capsules = capsules;
    }

    /// カプセルを作成。名前は必須
    pub fn create(
        &mut self,
        name: &str,
        season: &str,
        occasion: &str,
        created_at: &str,
    ) -> Result<u32> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("カプセル名を入力してください".into()));
        }

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.capsules.push(Capsule {
            id,
            name: name.to_string(),
            season: season.trim().to_string(),
            occasion: occasion.trim().to_string(),
            items: Vec::new(),
            combinations: 0,
            created_at: created_at.to_string(),
        });
        Ok(id)
    }

    /// 削除。存在しなければ何もしない
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.capsules.len();
        self.capsules.retain(|c| c.id != id);
        self.capsules.len() != before
    }

    /// アイテムを追加（同じIDは一度だけ）。追加されたらtrue
    pub fn add_item(&mut self, capsule_id: u32, item: WardrobeItem) -> Result<bool> {
        let capsule = self.get_mut(capsule_id)?;
        if capsule.items.iter().any(|i| i.id == item.id) {
            return Ok(false);
        }
        capsule.items.push(item);
        capsule.combinations = capsule.estimate_combinations();
        Ok(true)
    }

    pub fn remove_item(&mut self, capsule_id: u32, item_id: u32) -> Result<bool> {
        let capsule = self.get_mut(capsule_id)?;
        let before = capsule.items.len();
        capsule.items.retain(|i| i.id != item_id);
        capsule.combinations = capsule.estimate_combinations();
        Ok(capsule.items.len() != before)
    }

    pub fn get(&self, id: u32) -> Option<&Capsule> {
        self.capsules.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capsule> {
        self.capsules.iter()
    }

    pub fn len(&self) -> usize {
        self.capsules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capsules.is_empty()
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Capsule> {
        self.capsules
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("capsule {}", id)))
    }
}
