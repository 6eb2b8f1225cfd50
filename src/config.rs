use crate::error::{Result, StyleAiError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_id: Option<String>,
    pub profile_url: String,
    pub ads_url: String,
    pub admin_url: String,
    /// モック解析の擬似待ち時間
    pub analysis_delay_ms: u64,
    pub timeout_seconds: u64,
    /// trueならアップロード画像をData URLとして埋め込む
    pub embed_uploads: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 設定ファイル + 環境変数
    pub fn load() -> Result<Self> {
        Ok(Self::load_file()?.with_env_overrides())
    }

    /// 設定ファイルの値だけを読む（保存用）
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StyleAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("style-ai").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            user_id: None,
            profile_url: "http://localhost:8080/user-data".into(),
            ads_url: "http://localhost:8080/partner-tracking".into(),
            admin_url: "http://localhost:8080/admin".into(),
            analysis_delay_ms: 2000,
            timeout_seconds: 30,
            embed_uploads: false,
        }
    }

    /// 環境変数を優先
    pub fn with_env_overrides(self) -> Self {
        self.overridden_by(|key| std::env::var(key).ok())
    }

    fn overridden_by(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(user_id) = lookup("STYLE_AI_USER_ID") {
            self.user_id = Some(user_id);
        }
        if let Some(url) = lookup("STYLE_AI_PROFILE_URL") {
            self.profile_url = url;
        }
        if let Some(url) = lookup("STYLE_AI_ADS_URL") {
            self.ads_url = url;
        }
        if let Some(url) = lookup("STYLE_AI_ADMIN_URL") {
            self.admin_url = url;
        }
        self
    }

    pub fn get_user_id(&self) -> Result<String> {
        self.user_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                StyleAiError::Config(
                    "ユーザーIDが未設定です。`style-ai config --set-user-id ID` で設定してください".into(),
                )
            })
    }
}
