use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("見つかりません: {0}")]
    NotFound(String),

    #[error("この操作は現在の状態では実行できません: {0}")]
    InvalidState(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("通信エラー: {0}")]
    Network(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiResponse(String),

    #[error("入力の取得に失敗: {0}")]
    Prompt(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<style_ai_common::Error> for StyleAiError {
    fn from(err: style_ai_common::Error) -> Self {
        use style_ai_common::Error as E;
        match err {
            E::Validation(msg) => StyleAiError::Validation(msg),
            E::NotFound(msg) => StyleAiError::NotFound(msg),
            E::InvalidState(msg) => StyleAiError::InvalidState(msg),
            E::Config(msg) => StyleAiError::Config(msg),
            E::Io(e) => StyleAiError::Io(e),
            E::Json(e) => StyleAiError::JsonParse(e),
        }
    }
}

impl From<reqwest::Error> for StyleAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StyleAiError::ApiResponse(err.to_string())
        } else {
            StyleAiError::Network(err.to_string())
        }
    }
}

impl From<dialoguer::Error> for StyleAiError {
    fn from(err: dialoguer::Error) -> Self {
        StyleAiError::Prompt(err.to_string())
    }
}

impl StyleAiError {
    /// 外部API由来で、セッションを止めずに通知だけすべきエラーか
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, StyleAiError::Network(_) | StyleAiError::ApiResponse(_))
    }
}

pub type Result<T> = std::result::Result<T, StyleAiError>;
