//! 外部APIクライアントの統合テスト（mockitoでHTTPを差し替え）

use mockito::{Matcher, Server};
use serde_json::json;
use style_ai_common::{demo, StylePreferences};
use style_ai_rust::collaborator::{self, AdClick, AdminClient, AdsClient, Banner, ProfileClient, SalonRecord};
use style_ai_rust::config::Config;
use style_ai_rust::error::StyleAiError;

fn http() -> reqwest::Client {
    collaborator::build_client(&Config::default()).expect("HTTPクライアント作成失敗")
}

#[tokio::test]
async fn test_fetch_profile_and_preferences() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/user-data")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "u-1".into()),
            Matcher::UrlEncoded("type".into(), "all".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "profile": {"user_id": "u-1", "ai_color_type": "ウォーム", "ai_recommended_styles": ["Classic"]},
                "preferences": {"favorite_styles": ["Casual"], "budget_min": 1000, "budget_max": 9000}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ProfileClient::new(http(), format!("{}/user-data", server.url()));
    let data = client.fetch("u-1", "all").await.expect("取得失敗");

    let profile = data.profile.expect("プロフィールがない");
    assert_eq!(profile.color_type, "ウォーム");
    assert_eq!(profile.recommended_styles, vec!["Classic"]);
    let prefs = data.preferences.expect("嗜好がない");
    assert_eq!(prefs.budget_max, 9000);
    assert!(prefs.favorite_colors.is_empty());
}

#[tokio::test]
async fn test_fetch_null_profile() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/user-data")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"profile": null}"#)
        .create_async()
        .await;

    let client = ProfileClient::new(http(), format!("{}/user-data", server.url()));
    let data = client.fetch("u-1", "profile").await.expect("取得失敗");
    assert!(data.profile.is_none());
    assert!(data.preferences.is_none());
}

#[tokio::test]
async fn test_save_analysis_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/user-data")
        .match_body(Matcher::PartialJson(json!({
            "action": "save_ai_analysis",
            "user_id": "u-1",
            "profile_photo_url": "me.jpg",
        })))
        .with_status(200)
        .with_body(r#"{"success": true, "profile_id": 7}"#)
        .create_async()
        .await;

    let client = ProfileClient::new(http(), format!("{}/user-data", server.url()));
    let response = client
        .save_analysis("u-1", &demo::appearance_analysis("me.jpg"))
        .await
        .expect("保存失敗");

    assert!(response.success);
    assert_eq!(response.profile_id, Some(7));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_preferences_unparsed_response_is_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/user-data")
        .match_body(Matcher::PartialJson(json!({
            "action": "save_preferences",
            "budget_min": 5000,
            "budget_max": 200000,
        })))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = ProfileClient::new(http(), format!("{}/user-data", server.url()));
    let response = client
        .save_preferences("u-1", &StylePreferences::default())
        .await
        .expect("保存失敗");
    assert!(response.success);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_preferences_rejects_inverted_budget() {
    let client = ProfileClient::new(http(), "http://127.0.0.1:9/user-data");
    let prefs = StylePreferences { budget_min: 10, budget_max: 1, ..StylePreferences::default() };

    let result = client.save_preferences("u-1", &prefs).await;
    assert!(matches!(result, Err(StyleAiError::Validation(_))));
}

#[tokio::test]
async fn test_server_error_is_collaborator_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let err = client.stats().await.expect_err("500なのに成功した");
    assert!(err.is_collaborator_failure());
}

#[tokio::test]
async fn test_admin_salons_lenient() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin")
        .match_query(Matcher::UrlEncoded("resource".into(), "salons".into()))
        .with_status(200)
        .with_body(
            json!({"salons": [
                {"id": 1, "name": "Beauty Point", "rating": "4.90", "is_partner": true, "services_count": 4},
                {"id": 2, "name": "Glamour"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let salons = client.salons().await.expect("取得失敗");
    assert_eq!(salons.len(), 2);
    assert_eq!(salons[0].rating, 4.9);
    assert_eq!(salons[0].services_count, 4);
    assert_eq!(salons[1].rating, 0.0);
}

#[tokio::test]
async fn test_fetch_profile_with_null_columns() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/user-data")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "profile": {"user_id": "u-1", "profile_photo_url": null, "ai_color_type": "warm",
                            "ai_body_type": null, "ai_avoid_colors": null},
                "preferences": {"favorite_styles": null, "budget_min": null, "budget_max": null,
                                "additional_notes": null}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ProfileClient::new(http(), format!("{}/user-data", server.url()));
    let data = client.fetch("u-1", "all").await.expect("取得失敗");

    let profile = data.profile.expect("プロフィールがない");
    assert_eq!(profile.color_type, "warm");
    assert!(profile.body_type.is_empty());
    assert!(profile.avoid_colors.is_empty());
    let prefs = data.preferences.expect("嗜好がない");
    assert!(prefs.favorite_styles.is_empty());
    assert_eq!(prefs.budget_min, StylePreferences::default().budget_min);
}

#[tokio::test]
async fn test_admin_banners_with_null_description() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin")
        .match_query(Matcher::UrlEncoded("resource".into(), "banners".into()))
        .with_status(200)
        .with_body(
            json!({"banners": [
                {"id": 1, "advertiser": "ZARA", "title": "Sale", "description": "ok"},
                {"id": 2, "advertiser": "H&M", "title": "New", "description": null, "cta_text": null},
                {"id": 3, "advertiser": 42}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let banners = client.banners().await.expect("取得失敗");
    let ids: Vec<Option<u64>> = banners.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
    assert!(banners[1].description.is_empty());
}

#[tokio::test]
async fn test_admin_missing_field_defaults() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    assert!(client.banners().await.expect("取得失敗").is_empty());
}

#[tokio::test]
async fn test_admin_settings_with_category() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("resource".into(), "settings".into()),
            Matcher::UrlEncoded("category".into(), "ads".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"settings": [{"setting_key": "click_cost", "setting_value": "10", "category": "ads"}]}"#)
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let settings = client.settings(Some("ads")).await.expect("取得失敗");
    assert_eq!(settings[0].setting_key, "click_cost");
}

#[tokio::test]
async fn test_new_banner_uses_post() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/admin")
        .match_body(Matcher::PartialJson(json!({"resource": "banner", "title": "新作"})))
        .with_status(200)
        .with_body(r#"{"success": true, "banner_id": 11}"#)
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let banner = Banner { title: "新作".into(), ..Banner::default() };
    let response = client.save(&banner).await.expect("保存失敗");
    assert_eq!(response["banner_id"], 11);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_existing_salon_uses_put() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/admin")
        .match_body(Matcher::PartialJson(json!({"resource": "salon", "id": 5, "name": "Studio"})))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    let salon = SalonRecord { id: Some(5), name: "Studio".into(), ..SalonRecord::default() };
    client.save(&salon).await.expect("保存失敗");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_setting_update_uses_put() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/admin")
        .match_body(Matcher::Json(json!({"resource": "setting", "key": "fee", "value": "12"})))
        .with_status(200)
        .create_async()
        .await;

    let client = AdminClient::new(http(), format!("{}/admin", server.url()));
    client.update_setting("fee", "12").await.expect("更新失敗");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ad_click_tracking() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/ads")
        .match_body(Matcher::PartialJson(json!({
            "action": "track_ad_click",
            "ad_id": "banner-1",
            "advertiser": "ZARA",
        })))
        .with_status(200)
        .with_body(r#"{"success": true, "click_id": 1}"#)
        .create_async()
        .await;

    let client = AdsClient::new(http(), format!("{}/ads", server.url()));
    let click = AdClick { ad_id: "banner-1".into(), advertiser: "ZARA".into(), click_cost: 10.0 };
    client.track_click(&click).await.expect("記録失敗");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ad_click_quiet_on_failure() {
    let client = AdsClient::new(http(), "http://127.0.0.1:9/ads");
    let click = AdClick { ad_id: "x".into(), advertiser: "Unknown".into(), click_cost: 10.0 };
    // 接続できなくてもパニックせずに戻る
    client.track_click_quietly(&click).await;
}
