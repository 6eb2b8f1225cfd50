//! 管理API（統計・バナー・サロン・設定）

use super::{check_status, lenient_f64};
use crate::error::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use style_ai_common::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub advertiser: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cta_text: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub click_cost: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_partner: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub reviews_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_partner: bool,
    pub image_url: Option<String>,
    #[serde(skip_serializing, deserialize_with = "null_as_default")]
    pub services_count: u32,
    #[serde(skip_serializing, deserialize_with = "null_as_default")]
    pub bookings_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Setting {
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub setting_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlatformStats {
    #[serde(deserialize_with = "null_as_default")]
    pub total_ad_clicks: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_ad_revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_bookings: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completed_bookings: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub users_with_profile: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub users_with_preferences: u64,
}

/// 作成/更新できる管理レコード
pub trait AdminRecord: Serialize {
    /// 書き込み時の `resource` 値
    const RESOURCE: &'static str;

    fn record_id(&self) -> Option<u64>;
}

impl AdminRecord for Banner {
    const RESOURCE: &'static str = "banner";

    fn record_id(&self) -> Option<u64> {
        self.id
    }
}

impl AdminRecord for SalonRecord {
    const RESOURCE: &'static str = "salon";

    fn record_id(&self) -> Option<u64> {
        self.id
    }
}

pub struct AdminClient {
    client: Client,
    base_url: String,
}

impl AdminClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub async fn stats(&self) -> Result<PlatformStats> {
        let body = self.get("stats", None).await?;
        Ok(field_or_default(body, "stats"))
    }

    pub async fn banners(&self) -> Result<Vec<Banner>> {
        let body = self.get("banners", None).await?;
        Ok(rows_or_empty(body, "banners"))
    }

    pub async fn salons(&self) -> Result<Vec<SalonRecord>> {
        let body = self.get("salons", None).await?;
        Ok(rows_or_empty(body, "salons"))
    }

    pub async fn settings(&self, category: Option<&str>) -> Result<Vec<Setting>> {
        let body = self.get("settings", category).await?;
        Ok(rows_or_empty(body, "settings"))
    }

    /// idがあれば更新（PUT）、なければ作成（POST）
    pub async fn save<R: AdminRecord>(&self, record: &R) -> Result<Value> {
        let mut payload = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        payload.insert("resource".into(), Value::from(R::RESOURCE));

        let request = match record.record_id() {
            Some(_) => self.client.put(&self.base_url),
            None => self.client.post(&self.base_url),
        };
        tracing::info!(resource = R::RESOURCE, id = ?record.record_id(), "saving admin record");
        let response = request.json(&payload).send().await?;
        Ok(check_status(response).await?.json().await.unwrap_or(Value::Null))
    }

    /// 設定値の更新は常にPUT
    pub async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        tracing::info!(key, "updating setting");
        let payload = serde_json::json!({
            "resource": "setting",
            "key": key,
            "value": value,
        });
        let response = self.client.put(&self.base_url).json(&payload).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn get(&self, resource: &str, category: Option<&str>) -> Result<Value> {
        let mut query = vec![("resource", resource)];
        if let Some(category) = category {
            query.push(("category", category));
        }
        tracing::info!(resource, "fetching admin resource");
        let response = self.client.get(&self.base_url).query(&query).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// 一覧を行ごとに読む。読めない行だけ飛ばす
fn rows_or_empty<T: DeserializeOwned>(mut body: Value, key: &str) -> Vec<T> {
    let rows = match body.get_mut(key).map(Value::take) {
        Some(Value::Array(rows)) => rows,
        Some(Value::Null) | None => return Vec::new(),
        Some(_) => {
            tracing::warn!(key, "admin response field is not a list");
            return Vec::new();
        }
    };

    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "admin row skipped");
                None
            }
        })
        .collect()
}

/// 欠けている/読めないフィールドは既定値
fn field_or_default<T: DeserializeOwned + Default>(mut body: Value, key: &str) -> T {
    match body.get_mut(key).map(Value::take) {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "admin response field unreadable");
            T::default()
        }),
        None => T::default(),
    }
}
