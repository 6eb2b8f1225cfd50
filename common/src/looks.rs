//! ルック履歴ストア
//!
//! 解析済みルックの作業セット。IDは単調増加カウンタで採番する。

use crate::types::{LookRecord, NewLook};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookStore {
    records: Vec<LookRecord>,
    next_id: u32,
}

impl LookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 作業セットを置き換える（デモデータや外部から読み込んだデータ）
    pub fn seed(&mut self, records: Vec<LookRecord>) {
        self.next_id = records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        self.records = records;
    }

    /// ルックを追加して採番されたIDを返す
    ///
    /// IDの指定がない、または既存IDと衝突する場合は新しいIDを割り当てる。
    pub fn append(&mut self, look: NewLook) -> u32 {
        let id = match look.id {
            Some(id) if self.find_by_id(id).is_none() => id,
            _ => self.fresh_id(),
        };
        self.next_id = self.next_id.max(id.saturating_add(1));

        self.records.push(LookRecord::new(id, look.date, look.score, look.style, look.image_ref));
        id
    }

    pub fn find_by_id(&self, id: u32) -> Option<&LookRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// 削除したレコードを返す（存在しなければNone）
    pub fn remove(&mut self, id: u32) -> Option<LookRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// 最後に追加されたルック
    pub fn latest(&self) -> Option<&LookRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LookRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[LookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn fresh_id(&self) -> u32 {
        let mut id = self.next_id.max(1);
        while self.find_by_id(id).is_some() {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_look(id: Option<u32>, score: u8) -> NewLook {
        NewLook {
            id,
            date: "10月31日".to_string(),
            score,
            style: "Casual".to_string(),
            image_ref: format!("look_{}.jpg", score),
        }
    }

    #[test]
    fn test_append_assigns_monotonic_ids() {
        let mut store = LookStore::new();
        let a = store.append(new_look(None, 80));
        let b = store.append(new_look(None, 85));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_append_keeps_supplied_id() {
        let mut store = LookStore::new();
        let id = store.append(new_look(Some(10), 90));
        assert_eq!(id, 10);

        // 次の自動採番は指定IDより後
        let next = store.append(new_look(None, 91));
        assert_eq!(next, 11);
    }

    #[test]
    fn test_append_replaces_colliding_id() {
        let mut store = LookStore::new();
        store.append(new_look(Some(3), 70));
        let id = store.append(new_look(Some(3), 75));
        assert_ne!(id, 3);
        assert_eq!(store.find_by_id(3).map(|r| r.score), Some(70));
    }

    #[test]
    fn test_seed_replaces_working_set() {
        let mut store = LookStore::new();
        store.append(new_look(None, 50));

        store.seed(vec![
            LookRecord::new(4, "", 92, "Business", "a.jpg"),
            LookRecord::new(7, "", 95, "Evening", "b.jpg"),
        ]);

        assert_eq!(store.len(), 2);
        assert!(store.find_by_id(1).is_none());
        assert_eq!(store.append(new_look(None, 60)), 8);
    }

    #[test]
    fn test_find_by_id_missing() {
        let store = LookStore::new();
        assert!(store.find_by_id(999).is_none());
    }

    #[test]
    fn test_remove() {
        let mut store = LookStore::new();
        let id = store.append(new_look(None, 88));
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_latest() {
        let mut store = LookStore::new();
        assert!(store.latest().is_none());
        store.append(new_look(None, 70));
        let id = store.append(new_look(None, 71));
        assert_eq!(store.latest().map(|r| r.id), Some(id));
    }
}
