//! 外部API（プロフィール・広告・管理）のクライアント
//!
//! どのAPIも補助的な扱い。呼び出し側は失敗を `notify_failure` で通知して続行する。

pub mod admin;
pub mod ads;
pub mod profile;

pub use admin::{AdminClient, AdminRecord, Banner, PlatformStats, SalonRecord, Setting};
pub use ads::{AdClick, AdsClient};
pub use profile::{ProfileClient, ProfileData, SaveResponse};

use crate::config::Config;
use crate::error::{Result, StyleAiError};
use reqwest::{Client, Response};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// タイムアウト付きHTTPクライアントを作成
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| StyleAiError::Config(format!("HTTPクライアント作成に失敗: {}", e)))
}

/// ステータスが成功でなければ本文付きのエラーにする
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StyleAiError::Network(format!("HTTP {}: {}", status, body)))
}

/// 外部API失敗を通知する。セッションは継続
pub fn notify_failure(context: &str, err: &StyleAiError) {
    tracing::warn!(context, error = %err, "collaborator call failed");
    eprintln!("⚠ {}に失敗しました（処理は続行します）: {}", context, err);
}

/// 数値・数値文字列・nullのいずれも受け付ける（DBのDECIMALは文字列で返る）
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or_default(),
        Some(Raw::Null) | None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Price {
        #[serde(deserialize_with = "lenient_f64", default)]
        value: f64,
    }

    #[test]
    fn test_lenient_f64() {
        let cases = [
            (r#"{"value": 12.5}"#, 12.5),
            (r#"{"value": "10.00"}"#, 10.0),
            (r#"{"value": null}"#, 0.0),
            (r#"{"value": "abc"}"#, 0.0),
            (r#"{}"#, 0.0),
        ];
        for (json, expected) in cases {
            let price: Price = serde_json::from_str(json).expect("パース失敗");
            assert_eq!(price.value, expected, "{}", json);
        }
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&Config::default()).is_ok());
    }
}
