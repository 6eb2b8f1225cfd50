//! プロフィールAPI（外見解析とスタイル嗜好の保存・取得）

use super::check_status;
use crate::error::{Result, StyleAiError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use style_ai_common::{AppearanceAnalysis, StylePreferences};

/// 保存系APIの応答。欠けていても失敗扱いにはしない
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaveResponse {
    pub success: bool,
    pub profile_id: Option<u64>,
    pub preferences_id: Option<u64>,
}

/// 取得系APIの応答
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub profile: Option<AppearanceAnalysis>,
    pub preferences: Option<StylePreferences>,
}

#[derive(Serialize)]
struct SaveAnalysisRequest<'a> {
    action: &'static str,
    user_id: &'a str,
    #[serde(flatten)]
    analysis: &'a AppearanceAnalysis,
}

#[derive(Serialize)]
struct SavePreferencesRequest<'a> {
    action: &'static str,
    user_id: &'a str,
    #[serde(flatten)]
    preferences: &'a StylePreferences,
}

pub struct ProfileClient {
    client: Client,
    base_url: String,
}

impl ProfileClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    /// 外見解析・嗜好を取得（kind: profile / preferences / all）
    pub async fn fetch(&self, user_id: &str, kind: &str) -> Result<ProfileData> {
        tracing::info!(user_id, kind, "fetching profile data");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("user_id", user_id), ("type", kind)])
            .send()
            .await?;
        let body: Value = check_status(response).await?.json().await?;

        Ok(ProfileData {
            profile: typed_field(&body, "profile")?,
            preferences: typed_field(&body, "preferences")?,
        })
    }

    pub async fn save_analysis(&self, user_id: &str, analysis: &AppearanceAnalysis) -> Result<SaveResponse> {
        let request = SaveAnalysisRequest {
            action: "save_ai_analysis",
            user_id,
            analysis,
        };
        self.post(&request).await
    }

    pub async fn save_preferences(&self, user_id: &str, preferences: &StylePreferences) -> Result<SaveResponse> {
        preferences.validate()?;
        let request = SavePreferencesRequest {
            action: "save_preferences",
            user_id,
            preferences,
        };
        self.post(&request).await
    }

    async fn post<T: Serialize>(&self, request: &T) -> Result<SaveResponse> {
        tracing::info!(url = %self.base_url, "saving profile data");
        let response = self.client.post(&self.base_url).json(request).send().await?;
        let text = check_status(response).await?.text().await?;
        // 応答本文は参考情報。読めなくても保存自体は成功とみなす
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "unparsed save response");
            SaveResponse { success: true, ..SaveResponse::default() }
        }))
    }
}

/// nullや欠落はNone、型が合わなければApiResponseエラー
fn typed_field<T: serde::de::DeserializeOwned>(body: &Value, key: &str) -> Result<Option<T>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| StyleAiError::ApiResponse(format!("{}: {}", key, e))),
    }
}
