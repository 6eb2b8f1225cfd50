//! 広告クリック計測

use super::check_status;
use crate::error::Result;
use reqwest::Client;
use serde::Serialize;

/// クリック1件
#[derive(Debug, Clone, Serialize)]
pub struct AdClick {
    pub ad_id: String,
    pub advertiser: String,
    pub click_cost: f64,
}

#[derive(Serialize)]
struct TrackRequest<'a> {
    action: &'static str,
    #[serde(flatten)]
    click: &'a AdClick,
}

pub struct AdsClient {
    client: Client,
    base_url: String,
}

impl AdsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub async fn track_click(&self, click: &AdClick) -> Result<()> {
        tracing::info!(ad_id = %click.ad_id, advertiser = %click.advertiser, "tracking ad click");
        let request = TrackRequest { action: "track_ad_click", click };
        let response = self.client.post(&self.base_url).json(&request).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// 投げっぱなし。失敗はログに残すだけ
    pub async fn track_click_quietly(&self, click: &AdClick) {
        if let Err(e) = self.track_click(click).await {
            tracing::warn!(ad_id = %click.ad_id, error = %e, "ad click tracking failed");
        }
    }
}
