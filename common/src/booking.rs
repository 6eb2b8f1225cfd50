//! ビューティーサロン予約フォーム
//!
//! 予約の確定前に必須項目をチェックする。サロン一覧の絞り込みと並び替えもここで行う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// サービス別の料金と所要時間
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffer {
    pub price: u32,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub partner: bool,
    /// サービスID（makeup / hair / manicure / pedicure）→ 料金
    #[serde(default)]
    pub services: BTreeMap<String, ServiceOffer>,
    #[serde(default)]
    pub available_times: Vec<String>,
}

impl Salon {
    pub fn price_for(&self, service: &str) -> Option<u32> {
        self.services.get(service).map(|o| o.price)
    }
}

/// サービスと上限価格で絞り込み、パートナー優先・評価の高い順に並べる
///
/// サービス未指定なら全サロンが対象。
pub fn filter_salons<'a>(salons: &'a [Salon], service: Option<&str>, max_price: u32) -> Vec<&'a Salon> {
    let mut filtered: Vec<&Salon> = salons
        .iter()
        .filter(|salon| match service {
            None => true,
            Some(service) => salon.price_for(service).is_some_and(|price| price <= max_price),
        })
        .collect();

    filtered.sort_by(|a, b| {
        b.partner
            .cmp(&a.partner)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
    filtered
}

/// 入力途中の予約フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub service: Option<String>,
    pub salon_id: Option<u32>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// 確定した予約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub salon_id: u32,
    pub salon_name: String,
    pub service: String,
    pub price: u32,
    pub date: String,
    pub time: String,
}

impl BookingForm {
    /// 必須項目を確認して予約を確定する
    pub fn submit(&self, salons: &[Salon]) -> Result<Booking> {
        let service = required(self.service.as_deref(), "サービス")?;
        let salon_id = self
            .salon_id
            .ok_or_else(|| Error::Validation("サロンを選択してください".into()))?;
        let date = required(self.date.as_deref(), "日付")?;
        let time = required(self.time.as_deref(), "時間")?;

        let salon = salons
            .iter()
            .find(|s| s.id == salon_id)
            .ok_or_else(|| Error::Validation(format!("サロン {} は存在しません", salon_id)))?;

        let price = salon.price_for(service).ok_or_else(|| {
            Error::Validation(format!("{} では「{}」を予約できません", salon.name, service))
        })?;

        if !salon.available_times.iter().any(|t| t == time) {
            return Err(Error::Validation(format!(
                "{} の {} は空いていません",
                salon.name, time
            )));
        }

        Ok(Booking {
            salon_id,
            salon_name: salon.name.clone(),
            service: service.to_string(),
            price,
            date: date.to_string(),
            time: time.to_string(),
        })
    }
}

fn required<'a>(value: Option<&'a str>, label: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(format!("{}を選択してください", label))),
    }
}
