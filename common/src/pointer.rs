//! 表示中画像ポインタ
//!
//! 「いま解析タブで見ている画像」を保持する単一の値。
//! 書き込みごとに世代番号が進み、古い非同期結果の判定に使う。

use serde::{Deserialize, Serialize};

/// どの画面から画像が選ばれたか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSource {
    Upload,
    History,
    Favorites,
    Recognition,
}

impl ViewSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewSource::Upload => "upload",
            ViewSource::History => "history",
            ViewSource::Favorites => "favorites",
            ViewSource::Recognition => "recognition",
        }
    }
}

/// 解析タブへの切り替え要求（実際の画面遷移は呼び出し側が行う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSwitch {
    pub image_ref: String,
    pub source: ViewSource,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePointer {
    current: Option<String>,
    generation: u64,
}

impl ImagePointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 上書きして世代を進める
    pub fn set(&mut self, image_ref: impl Into<String>) -> u64 {
        self.current = Some(image_ref.into());
        self.generation += 1;
        self.generation
    }

    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// ログアウト・セッションリセット時
    pub fn clear(&mut self) {
        self.current = None;
        self.generation += 1;
    }

    /// 画像を「見る」操作。ポインタを更新して切り替え要求を返す
    pub fn view(&mut self, image_ref: impl Into<String>, source: ViewSource) -> ViewSwitch {
        let image_ref = image_ref.into();
        let generation = self.set(image_ref.clone());
        ViewSwitch { image_ref, source, generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_by_default() {
        let pointer = ImagePointer::new();
        assert!(pointer.get().is_none());
        assert_eq!(pointer.generation(), 0);
    }

    #[test]
    fn test_set_overwrites() {
        let mut pointer = ImagePointer::new();
        pointer.set("a.jpg");
        pointer.set("b.jpg");
        assert_eq!(pointer.get(), Some("b.jpg"));
        assert_eq!(pointer.generation(), 2);
    }

    #[test]
    fn test_view_returns_switch() {
        let mut pointer = ImagePointer::new();
        let switch = pointer.view("fav.jpg", ViewSource::Favorites);
        assert_eq!(switch.image_ref, "fav.jpg");
        assert_eq!(switch.source, ViewSource::Favorites);
        assert_eq!(switch.generation, pointer.generation());
        assert_eq!(pointer.get(), Some("fav.jpg"));
    }

    #[test]
    fn test_clear_bumps_generation() {
        let mut pointer = ImagePointer::new();
        let gen = pointer.set("a.jpg");
        pointer.clear();
        assert!(pointer.get().is_none());
        assert!(pointer.generation() > gen);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut pointer = ImagePointer::new();
        pointer.set("x.png");
        let json = serde_json::to_string(&pointer).expect("シリアライズ失敗");
        let restored: ImagePointer = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored, pointer);
    }
}
