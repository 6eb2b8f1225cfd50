//! セッション状態モジュール
//!
//! 履歴・お気に入り・比較選択・表示中画像をひとつのコンテキストにまとめ、
//! CLI呼び出しの間はJSONファイルに保存する。

use crate::error::{Result, StyleAiError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use style_ai_common::{
    demo, Booking, CapsuleWardrobe, ComparisonSelector, FavoritesManager, ImagePointer,
    LookAnalysis, LookStore, NewLook, RecognitionOverlay, ViewSource, ViewSwitch,
};

const SESSION_FILE_NAME: &str = "session.json";

/// 直近のモック解析結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    pub look_id: u32,
    pub image_ref: String,
    pub analysis: LookAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// バージョン（互換性チェック用）
    version: u32,
    #[serde(default)]
    pub looks: LookStore,
    #[serde(default)]
    pub favorites: FavoritesManager,
    #[serde(default)]
    pub comparison: ComparisonSelector,
    #[serde(default)]
    pub pointer: ImagePointer,
    #[serde(default)]
    pub capsules: CapsuleWardrobe,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub recognition_selected: Option<u32>,
    #[serde(default)]
    pub latest_analysis: Option<StoredAnalysis>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            looks: LookStore::new(),
            favorites: FavoritesManager::new(),
            comparison: ComparisonSelector::new(),
            pointer: ImagePointer::new(),
            capsules: CapsuleWardrobe::new(),
            bookings: Vec::new(),
            recognition_selected: None,
            latest_analysis: None,
        }
    }
}

impl Session {
    const CURRENT_VERSION: u32 = 1;

    /// デモデータ入りのセッション
    pub fn demo() -> Self {
        let mut session = Self::default();
        session.looks.seed(demo::history());
        session.capsules.seed(demo::capsules());

        for (id, notes, tags) in demo::favorites() {
            if let Some(look) = session.looks.find_by_id(id) {
                session.favorites.add(look, Some(notes.to_string()), tags);
            }
        }
        session
    }

    /// 既定の保存先（データディレクトリ/style-ai/session.json）
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StyleAiError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data_dir.join("style-ai").join(SESSION_FILE_NAME))
    }

    /// セッションファイルを読み込み
    ///
    /// ファイルがない・壊れている・バージョン不一致ならデモセッションから始める。
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::demo();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session open failed");
                return Self::demo();
            }
        };

        match serde_json::from_reader::<_, Session>(BufReader::new(file)) {
            Ok(session) if session.version == Self::CURRENT_VERSION => session,
            Ok(session) => {
                eprintln!("セッションのバージョン不一致、初期化します");
                tracing::warn!(found = session.version, "session version mismatch");
                Self::demo()
            }
            Err(e) => {
                eprintln!("セッションファイルを読み込めません、初期化します");
                tracing::warn!(path = %path.display(), error = %e, "session parse failed");
                Self::demo()
            }
        }
    }

    /// セッションファイルを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::debug!(path = %path.display(), looks = self.looks.len(), "session saved");
        Ok(())
    }

    /// 現在の画像の認識オーバーレイ（選択状態を反映）
    pub fn recognition_overlay(&self) -> RecognitionOverlay {
        let mut overlay = RecognitionOverlay::new(demo::recognized_items());
        overlay.select_item(self.recognition_selected);
        overlay
    }

    /// 解析タブに表示中の画像
    pub fn displayed_image(&self) -> Result<&str> {
        self.pointer
            .get()
            .ok_or_else(|| StyleAiError::InvalidState("解析タブに画像が表示されていません".into()))
    }

    /// 履歴のルックを解析タブで表示する
    pub fn view_look(&mut self, look_id: u32, source: ViewSource) -> Result<ViewSwitch> {
        let image_ref = match source {
            ViewSource::Favorites => self.favorites.get(look_id).map(|f| f.look.image_ref.clone()),
            _ => self.looks.find_by_id(look_id).map(|l| l.image_ref.clone()),
        }
        .ok_or_else(|| StyleAiError::NotFound(format!("ルック {}", look_id)))?;

        Ok(self.pointer.view(image_ref, source))
    }

    /// ルックをお気に入りに追加。登録済みならfalse
    pub fn favorite_look(&mut self, look_id: u32, notes: Option<String>, tags: Vec<String>) -> Result<bool> {
        let look = self
            .looks
            .find_by_id(look_id)
            .ok_or_else(|| StyleAiError::NotFound(format!("ルック {}", look_id)))?;
        Ok(self.favorites.add(look, notes, tags))
    }

    /// 解析結果を履歴に反映する
    ///
    /// 解析開始時の世代が現在のポインタ世代と一致する場合だけ適用し、
    /// 新しいアップロードに追い越された結果は捨てる。
    pub fn apply_analysis(
        &mut self,
        generation: u64,
        image_ref: &str,
        date: &str,
        analysis: LookAnalysis,
    ) -> Option<u32> {
        if generation != self.pointer.generation() || self.pointer.get() != Some(image_ref) {
            tracing::debug!(generation, current = self.pointer.generation(), "stale analysis dropped");
            return None;
        }

        let look_id = self.looks.append(NewLook {
            id: None,
            date: date.to_string(),
            score: analysis.overall_score,
            style: analysis.style.clone(),
            image_ref: image_ref.to_string(),
        });
        self.latest_analysis = Some(StoredAnalysis {
            look_id,
            image_ref: image_ref.to_string(),
            analysis,
        });
        Some(look_id)
    }

    /// ログアウト相当。デモデータに戻す
    pub fn reset(&mut self) {
        let generation = self.pointer.generation();
        *self = Self::demo();
        // 進行中の解析が戻ってきても適用されないよう世代は引き継ぐ
        self.pointer = ImagePointer::new();
        while self.pointer.generation() <= generation {
            self.pointer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_session() {
        let session = Session::demo();
        assert_eq!(session.looks.len(), 4);
        assert_eq!(session.favorites.len(), 2);
        assert!(session.pointer.get().is_none());
    }

    #[test]
    fn test_view_look_sets_pointer() {
        let mut session = Session::demo();
        let switch = session.view_look(3, ViewSource::History).expect("表示に失敗");
        assert_eq!(session.pointer.get(), Some(switch.image_ref.as_str()));
        assert_eq!(switch.source, ViewSource::History);
    }

    #[test]
    fn test_view_missing_look() {
        let mut session = Session::demo();
        assert!(matches!(
            session.view_look(99, ViewSource::History),
            Err(StyleAiError::NotFound(_))
        ));
        assert!(session.pointer.get().is_none());
    }

    #[test]
    fn test_displayed_image_requires_view() {
        let mut session = Session::demo();
        assert!(matches!(session.displayed_image(), Err(StyleAiError::InvalidState(_))));

        session.view_look(1, ViewSource::History).expect("表示に失敗");
        assert!(session.displayed_image().is_ok());
    }

    #[test]
    fn test_apply_analysis_current_generation() {
        let mut session = Session::demo();
        let gen = session.pointer.set("new.jpg");
        let id = session.apply_analysis(gen, "new.jpg", "11月1日", demo::look_analysis(0));
        assert!(id.is_some());
        assert_eq!(session.looks.len(), 5);
        assert_eq!(session.latest_analysis.as_ref().map(|a| a.look_id), id);
    }

    #[test]
    fn test_apply_analysis_stale_generation() {
        let mut session = Session::demo();
        let old = session.pointer.set("first.jpg");
        session.pointer.set("second.jpg");

        assert!(session.apply_analysis(old, "first.jpg", "", demo::look_analysis(1)).is_none());
        assert_eq!(session.looks.len(), 4);
    }

    #[test]
    fn test_reset_invalidates_generation() {
        let mut session = Session::demo();
        let gen = session.pointer.set("a.jpg");
        session.comparison.toggle(1);
        session.reset();

        assert!(session.comparison.selected().is_empty());
        assert!(session.pointer.generation() > gen);
        assert!(session.apply_analysis(gen, "a.jpg", "", demo::look_analysis(0)).is_none());
    }
}
