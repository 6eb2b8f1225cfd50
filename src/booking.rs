//! 対話式のサロン予約
//!
//! 入力が足りない・不正なときは中断せずに聞き直す。

use crate::error::{Result, StyleAiError};
use dialoguer::{Input, Select};
use regex::Regex;
use style_ai_common::{demo, filter_salons, Booking, BookingForm, Salon};

lazy_static::lazy_static! {
    static ref TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

/// 既定の上限価格
pub const DEFAULT_MAX_PRICE: u32 = 10_000;

/// HH:MM 形式か
pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time.trim())
}

/// サービスIDの表示名
pub fn service_label(service: &str) -> &str {
    demo::SERVICES
        .iter()
        .find(|(id, _)| *id == service)
        .map(|(_, label)| *label)
        .unwrap_or(service)
}

/// フォームを確定する。時刻の形式は先にここで確認する
pub fn submit(form: &BookingForm, salons: &[Salon]) -> Result<Booking> {
    if let Some(time) = form.time.as_deref() {
        if !is_valid_time(time) {
            return Err(StyleAiError::Validation(format!(
                "時間は HH:MM 形式で入力してください: {}",
                time
            )));
        }
    }
    Ok(form.submit(salons)?)
}

/// 却下されたフォームでどこから聞き直すか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// 上限価格内に候補サロンがない。サービスと上限価格から
    Service,
    /// サロンと時間から
    Salon,
}

/// 却下後に聞き直す項目を空に戻す
pub fn reset_rejected(form: &mut BookingForm, salons: &[Salon], max_price: u32) -> Retry {
    if form.date.as_deref().is_some_and(|d| d.trim().is_empty()) {
        form.date = None;
    }
    form.salon_id = None;
    form.time = None;

    if filter_salons(salons, form.service.as_deref(), max_price).is_empty() {
        form.service = None;
        Retry::Service
    } else {
        Retry::Salon
    }
}

/// 足りない項目を対話で埋めて予約を確定する
pub fn run_interactive(mut form: BookingForm, salons: &[Salon], mut max_price: u32) -> Result<Booking> {
    loop {
        if form.service.is_none() {
            form.service = Some(prompt_service()?);
        }
        if form.salon_id.is_none() {
            form.salon_id = prompt_salon(salons, form.service.as_deref(), max_price)?;
        }
        if form.salon_id.is_some() {
            if form.date.is_none() {
                let date: String = Input::new().with_prompt("日付 (YYYY-MM-DD)").interact_text()?;
                form.date = Some(date);
            }
            if form.time.is_none() {
                form.time = Some(prompt_time(salons, form.salon_id)?);
            }
        }

        match submit(&form, salons) {
            Ok(booking) => return Ok(booking),
            Err(StyleAiError::Validation(msg)) => {
                println!("✘ {}", msg);
                tracing::debug!(?form, max_price, "booking form rejected");
                if reset_rejected(&mut form, salons, max_price) == Retry::Service {
                    max_price = Input::new()
                        .with_prompt("上限価格")
                        .default(max_price)
                        .interact_text()?;
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn prompt_service() -> Result<String> {
    let labels: Vec<&str> = demo::SERVICES.iter().map(|(_, label)| *label).collect();
    let idx = Select::new()
        .with_prompt("サービス")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(demo::SERVICES[idx].0.to_string())
}

fn prompt_salon(salons: &[Salon], service: Option<&str>, max_price: u32) -> Result<Option<u32>> {
    let candidates = filter_salons(salons, service, max_price);
    if candidates.is_empty() {
        println!("条件に合うサロンがありません（上限 ¥{}）", max_price);
        return Ok(None);
    }

    let labels: Vec<String> = candidates
        .iter()
        .map(|salon| {
            let price = service
                .and_then(|s| salon.price_for(s))
                .map(|p| format!(" ¥{}", p))
                .unwrap_or_default();
            let partner = if salon.partner { " [パートナー]" } else { "" };
            format!("{} ★{:.1}{}{}", salon.name, salon.rating, price, partner)
        })
        .collect();

    let idx = Select::new()
        .with_prompt("サロン")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(candidates[idx].id))
}

fn prompt_time(salons: &[Salon], salon_id: Option<u32>) -> Result<String> {
    let times = salon_id
        .and_then(|id| salons.iter().find(|s| s.id == id))
        .map(|s| s.available_times.join(" / "))
        .unwrap_or_default();
    let prompt = if times.is_empty() {
        "時間 (HH:MM)".to_string()
    } else {
        format!("時間 (HH:MM) 空き: {}", times)
    };

    let time: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if is_valid_time(input) {
                Ok(())
            } else {
                Err("HH:MM 形式で入力してください")
            }
        })
        .interact_text()?;
    Ok(time.trim().to_string())
}
