//! デモ用のサンプルデータ
//!
//! 初回起動・セッションリセット時の履歴/お気に入り/カプセル、
//! 画像認識とAI解析のモック結果。

use crate::booking::{Salon, ServiceOffer};
use crate::capsule::{Capsule, WardrobeCategory, WardrobeItem};
use crate::profile::AppearanceAnalysis;
use crate::types::{BoundingBox, LookAnalysis, LookRecord, RecognizedItem, SimilarProduct};
use std::collections::BTreeMap;

const IMAGE_BASE: &str = "https://cdn.styleai.example/looks";

fn image(name: &str) -> String {
    format!("{}/{}.jpg", IMAGE_BASE, name)
}

/// 解析履歴
pub fn history() -> Vec<LookRecord> {
    vec![
        LookRecord::new(1, "10月31日 14:30", 92, "Business", image("business")),
        LookRecord::new(2, "10月30日 18:45", 95, "Evening", image("evening")),
        LookRecord::new(3, "10月29日 10:20", 87, "Casual", image("casual")),
        LookRecord::new(4, "10月28日 16:00", 89, "Sport", image("sport")),
    ]
}

/// お気に入り（ルックID, メモ, タグ）
pub fn favorites() -> Vec<(u32, &'static str, Vec<&'static str>)> {
    vec![
        (2, "デートにぴったり", vec!["ロマンチック", "夜", "レストラン"]),
        (1, "商談の日に", vec!["オフィス", "商談"]),
    ]
}

fn product(
    id: u32,
    name: &str,
    brand: &str,
    price: &str,
    similarity: u8,
    in_stock: bool,
    sizes: &[&str],
) -> SimilarProduct {
    SimilarProduct {
        id,
        name: name.to_string(),
        brand: brand.to_string(),
        price: price.to_string(),
        similarity,
        in_stock,
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        image_url: image(&format!("product-{}", id)),
        store_url: format!("https://{}.example", brand.to_lowercase().replace(' ', "")),
    }
}

/// 画像認識のモック結果
pub fn recognized_items() -> Vec<RecognizedItem> {
    vec![
        RecognizedItem {
            id: 1,
            name: "白いブラウス".to_string(),
            category: "トップス".to_string(),
            confidence: 95,
            bounding_box: BoundingBox { x: 30.0, y: 20.0, width: 40.0, height: 30.0 },
            similar_products: vec![
                product(1, "オーバーサイズ白シャツ", "ZARA", "2 999 ₽", 98, true, &["XS", "S", "M", "L"]),
                product(2, "クラシック白ブラウス", "Mango", "3 499 ₽", 95, true, &["S", "M", "L", "XL"]),
                product(3, "コットンシャツ", "H&M", "1 999 ₽", 92, false, &["XS", "S", "M"]),
            ],
        },
        RecognizedItem {
            id: 2,
            name: "黒いパンツ".to_string(),
            category: "ボトムス".to_string(),
            confidence: 92,
            bounding_box: BoundingBox { x: 25.0, y: 50.0, width: 50.0, height: 45.0 },
            similar_products: vec![
                product(4, "センタープレスのストレートパンツ", "ZARA", "3 999 ₽", 96, true, &["36", "38", "40", "42", "44"]),
                product(5, "クラシックパンツ", "Massimo Dutti", "6 990 ₽", 94, true, &["38", "40", "42", "44"]),
            ],
        },
        RecognizedItem {
            id: 3,
            name: "パンプス".to_string(),
            category: "シューズ".to_string(),
            confidence: 89,
            bounding_box: BoundingBox { x: 35.0, y: 85.0, width: 30.0, height: 10.0 },
            similar_products: vec![
                product(6, "クラシックヒールパンプス", "ZARA", "4 999 ₽", 91, true, &["36", "37", "38", "39", "40"]),
            ],
        },
    ]
}

/// カプセルに追加できるワードローブアイテム
pub fn wardrobe_items() -> Vec<WardrobeItem> {
    let item = |id: u32, name: &str, category: WardrobeCategory, color: &str, brand: &str, price: &str| {
        WardrobeItem {
            id,
            name: name.to_string(),
            category,
            color: color.to_string(),
            brand: brand.to_string(),
            price: price.to_string(),
            image_url: image(&format!("wardrobe-{}", id)),
        }
    };

    vec![
        item(1, "白いブラウス", WardrobeCategory::Tops, "ホワイト", "ZARA", "2 999 ₽"),
        item(2, "黒いパンツ", WardrobeCategory::Bottoms, "ブラック", "Mango", "3 999 ₽"),
        item(3, "ベージュのトレンチ", WardrobeCategory::Outerwear, "ベージュ", "Massimo Dutti", "12 990 ₽"),
        item(4, "ブラックドレス", WardrobeCategory::Dresses, "ブラック", "H&M", "4 499 ₽"),
        item(5, "パンプス", WardrobeCategory::Shoes, "ブラック", "ZARA", "4 999 ₽"),
        item(6, "レザーバッグ", WardrobeCategory::Accessories, "ブラウン", "Mango", "5 999 ₽"),
    ]
}

pub fn capsules() -> Vec<Capsule> {
    vec![
        Capsule {
            id: 1,
            name: "ビジネススタイル".to_string(),
            season: "春/秋".to_string(),
            occasion: "仕事".to_string(),
            items: Vec::new(),
            combinations: 0,
            created_at: "2024-10-15".to_string(),
        },
        Capsule {
            id: 2,
            name: "週末カジュアル".to_string(),
            season: "夏".to_string(),
            occasion: "散歩".to_string(),
            items: Vec::new(),
            combinations: 0,
            created_at: "2024-10-20".to_string(),
        },
    ]
}

pub fn salons() -> Vec<Salon> {
    let offers = |prices: [(&str, u32, &str); 4]| -> BTreeMap<String, ServiceOffer> {
        prices
            .into_iter()
            .map(|(service, price, duration)| {
                (service.to_string(), ServiceOffer { price, duration: duration.to_string() })
            })
            .collect()
    };

    vec![
        Salon {
            id: 1,
            name: "Beauty Point Premium".to_string(),
            rating: 4.9,
            reviews: 342,
            address: "トヴェルスカヤ通り15".to_string(),
            partner: true,
            services: offers([
                ("makeup", 3500, "60分"),
                ("hair", 2500, "90分"),
                ("manicure", 1800, "60分"),
                ("pedicure", 2200, "75分"),
            ]),
            available_times: ["10:00", "12:00", "14:00", "16:00", "18:00"].map(String::from).to_vec(),
        },
        Salon {
            id: 2,
            name: "Glamour Studio".to_string(),
            rating: 4.8,
            reviews: 256,
            address: "アルバート通り28".to_string(),
            partner: true,
            services: offers([
                ("makeup", 3000, "50分"),
                ("hair", 2000, "80分"),
                ("manicure", 1500, "50分"),
                ("pedicure", 1900, "70分"),
            ]),
            available_times: ["09:00", "11:00", "13:00", "15:00", "17:00", "19:00"].map(String::from).to_vec(),
        },
        Salon {
            id: 3,
            name: "Studio Nails & Hair".to_string(),
            rating: 4.6,
            reviews: 128,
            address: "ノヴィ・アルバート12".to_string(),
            partner: false,
            services: offers([
                ("makeup", 2500, "45分"),
                ("hair", 1500, "60分"),
                ("manicure", 1200, "45分"),
                ("pedicure", 1500, "60分"),
            ]),
            available_times: ["10:00", "13:00", "16:00"].map(String::from).to_vec(),
        },
    ]
}

/// サービスIDと表示名
pub const SERVICES: &[(&str, &str)] = &[
    ("makeup", "メイク"),
    ("hair", "ヘア"),
    ("manicure", "マニキュア"),
    ("pedicure", "ペディキュア"),
];

/// ルック解析のモック結果。同じシードには常に同じ結果を返す
pub fn look_analysis(seed: u64) -> LookAnalysis {
    const POOL: &[(u8, &str, &str, &[&str])] = &[
        (87, "Casual Chic", "普段使い", &["ブラック", "ホワイト", "ベージュ"]),
        (92, "Business", "仕事", &["ネイビー", "ホワイト", "グレー"]),
        (95, "Evening", "パーティー", &["ブラック", "ゴールド"]),
        (84, "Sport", "ジム", &["グレー", "ライム"]),
        (90, "Romantic", "デート", &["ピンク", "アイボリー"]),
    ];

    let (score, style, occasion, colors) = POOL[(seed % POOL.len() as u64) as usize];
    LookAnalysis {
        overall_score: score,
        style: style.to_string(),
        occasion: occasion.to_string(),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        strengths: vec![
            "色の組み合わせが調和している".to_string(),
            "シルエットが体型に合っている".to_string(),
            "トレンドを押さえている".to_string(),
        ],
        improvements: vec![
            "アクセントになるアクセサリーを足してみましょう".to_string(),
            "もう少し明るい色の靴を試してみましょう".to_string(),
        ],
    }
}

/// プロフィール写真解析のモック結果
pub fn appearance_analysis(profile_photo_url: &str) -> AppearanceAnalysis {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    AppearanceAnalysis {
        profile_photo_url: profile_photo_url.to_string(),
        color_type: "ウォームタイプ".to_string(),
        body_type: "長方形".to_string(),
        recommended_styles: list(&["Casual chic", "Romantic", "Classic"]),
        recommended_colors: list(&["ベージュ", "コーラル", "オリーブ", "テラコッタ"]),
        avoid_colors: list(&["寒色のブルー", "ビビッドパープル"]),
        similar_celebrities: list(&["ジェニファー・アニストン", "ジゼル・ブンチェン"]),
    }
}
