//! お気に入り管理
//!
//! ルックの部分集合にメモとタグを付けて保持する。
//! 同じルックIDは一度しか登録されない。

use crate::types::{dedup_tags, FavoriteRecord, LookRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesManager {
    favorites: Vec<FavoriteRecord>,
}

impl FavoritesManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// お気に入りに追加。登録済みのIDなら何もせずfalseを返す
    pub fn add<I, S>(&mut self, look: &LookRecord, notes: Option<String>, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.contains(look.id) {
            return false;
        }

        self.favorites.push(FavoriteRecord {
            look: look.clone(),
            notes,
            tags: dedup_tags(tags),
        });
        true
    }

    /// 削除。未登録なら何もしない
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id() != id);
        self.favorites.len() != before
    }

    /// タグで絞り込み（Noneなら全件、登録順）
    pub fn filter_by_tag(&self, tag: Option<&str>) -> Vec<&FavoriteRecord> {
        match tag {
            None => self.favorites.iter().collect(),
            Some(tag) => self.favorites.iter().filter(|f| f.has_tag(tag)).collect(),
        }
    }

    /// 全タグ（初出順）
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.favorites
            .iter()
            .flat_map(|f| f.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.favorites.iter().any(|f| f.id() == id)
    }

    pub fn get(&self, id: u32) -> Option<&FavoriteRecord> {
        self.favorites.iter().find(|f| f.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteRecord> {
        self.favorites.iter()
    }

    pub fn records(&self) -> &[FavoriteRecord] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look(id: u32) -> LookRecord {
        LookRecord::new(id, "10月30日 18:45", 90, "Evening", format!("{}.jpg", id))
    }

    fn sample() -> FavoritesManager {
        let mut favs = FavoritesManager::new();
        favs.add(&look(1), Some("デート用".into()), ["romance", "evening", "restaurant"]);
        favs.add(&look(2), Some("商談".into()), ["office", "meeting"]);
        favs.add(&look(3), None, ["evening", "office"]);
        favs
    }

    #[test]
    fn test_add_dedups_tags() {
        let mut favs = FavoritesManager::new();
        assert!(favs.add(&look(5), Some("x".into()), ["work", "work"]));

        let fav = favs.get(5).expect("お気に入りが見つからない");
        assert_eq!(fav.tags, vec!["work"]);
        assert_eq!(fav.notes.as_deref(), Some("x"));
    }

    #[test]
    fn test_add_same_id_is_noop() {
        let mut favs = FavoritesManager::new();
        assert!(favs.add(&look(1), Some("first".into()), ["a"]));
        assert!(!favs.add(&look(1), Some("second".into()), ["b"]));

        assert_eq!(favs.len(), 1);
        assert_eq!(favs.get(1).and_then(|f| f.notes.as_deref()), Some("first"));
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut favs = sample();
        let before = favs.clone();

        favs.add(&look(9), Some("tmp".into()), ["tmp"]);
        assert!(favs.remove(9));

        assert_eq!(favs, before);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut favs = sample();
        assert!(!favs.remove(42));
        assert_eq!(favs.len(), 3);
    }

    #[test]
    fn test_filter_by_tag_none_returns_all_in_order() {
        let favs = sample();
        let ids: Vec<u32> = favs.filter_by_tag(None).iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_by_tag_exact_match() {
        let favs = sample();
        let ids: Vec<u32> = favs.filter_by_tag(Some("evening")).iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(favs.filter_by_tag(Some("Evening")).is_empty());
    }

    #[test]
    fn test_filter_by_unknown_tag_is_empty() {
        let favs = sample();
        assert!(favs.filter_by_tag(Some("nonexistent")).is_empty());
    }

    #[test]
    fn test_filter_all_is_superset_of_every_tag() {
        let favs = sample();
        let all: Vec<u32> = favs.filter_by_tag(None).iter().map(|f| f.id()).collect();

        for tag in favs.all_tags() {
            for fav in favs.filter_by_tag(Some(&tag)) {
                assert!(all.contains(&fav.id()), "tag {} の結果が全件に含まれない", tag);
            }
        }
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let favs = sample();
        assert_eq!(
            favs.all_tags(),
            vec!["romance", "evening", "restaurant", "office", "meeting"]
        );
    }

    #[test]
    fn test_serialize_as_list() {
        let favs = sample();
        let json = serde_json::to_string(&favs).expect("シリアライズ失敗");
        assert!(json.starts_with('['));

        let restored: FavoritesManager = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored, favs);
    }
}
