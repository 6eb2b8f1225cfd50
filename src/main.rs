use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use style_ai_common::{
    demo, BookingForm, Comparison, LookAnalysis, RecognitionOverlay, Recommendation, StylePreferences,
    ViewSource,
};
use style_ai_rust::analyzer::{AnalysisOutcome, Analyzer};
use style_ai_rust::cli::{
    AdminAction, CapsuleAction, Cli, Commands, CompareAction, FavoriteAction, ProfileAction, SessionAction,
};
use style_ai_rust::collaborator::{
    self, AdClick, AdminClient, AdsClient, Banner, ProfileClient, SalonRecord,
};
use style_ai_rust::config::Config;
use style_ai_rust::error::{Result, StyleAiError};
use style_ai_rust::session::Session;
use style_ai_rust::upload::{self, Upload};
use style_ai_rust::{booking, export};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let session_path = match cli.session.clone() {
        Some(path) => path,
        None => Session::default_path()?,
    };
    let mut session = Session::load(&session_path);

    let read_only = matches!(
        cli.command,
        Commands::History
            | Commands::Export { .. }
            | Commands::Config { .. }
            | Commands::Profile { .. }
            | Commands::AdClick { .. }
            | Commands::Admin { .. }
    );

    match cli.command {
        Commands::Upload { image, embed } => {
            println!("📸 style-ai - 写真解析\n");
            let upload = upload::read_upload(&image, embed || config.embed_uploads)?;
            println!("✔ {} ({}x{})", upload.file_name, upload.width, upload.height);

            let mut analyzer = Analyzer::new(Duration::from_millis(config.analysis_delay_ms));
            let pb = spinner("AI解析中...");
            let result = analyze_upload(&mut session, &mut analyzer, &upload).await;
            pb.finish_and_clear();

            match result {
                Some((look_id, analysis)) => print_analysis(look_id, &analysis),
                None => println!("解析結果は新しい画像に置き換えられました"),
            }
        }

        Commands::Import { folder, embed } => {
            println!("📸 style-ai - 一括解析\n");
            println!("[1/2] 写真をスキャン中...");
            let uploads = upload::scan_folder(&folder, embed || config.embed_uploads)?;
            println!("✔ {}枚の写真を検出\n", uploads.len());

            if uploads.is_empty() {
                return Err(StyleAiError::FolderNotFound(format!(
                    "{}（画像がありません）",
                    folder.display()
                )));
            }

            println!("[2/2] AI解析中...");
            let mut analyzer = Analyzer::new(Duration::from_millis(config.analysis_delay_ms));
            let pb = ProgressBar::new(uploads.len() as u64);
            for upload in &uploads {
                pb.set_message(upload.file_name.clone());
                if let Some((look_id, analysis)) = analyze_upload(&mut session, &mut analyzer, upload).await {
                    pb.println(format!(
                        "✔ #{} {} {}点 {}",
                        look_id, upload.file_name, analysis.overall_score, analysis.style
                    ));
                }
                pb.inc(1);
            }
            pb.finish_and_clear();
            println!("\n✅ 解析完了");
        }

        Commands::History => {
            println!("解析履歴 ({}件):", session.looks.len());
            for look in session.looks.iter() {
                let favorite = if session.favorites.contains(look.id) { "★" } else { " " };
                let selected = if session.comparison.is_selected(look.id) { "◆" } else { " " };
                let showing = if session.pointer.get() == Some(look.image_ref.as_str()) { " ← 表示中" } else { "" };
                println!(
                    "  {}{} #{} {} {:>3}点 {}{}",
                    favorite, selected, look.id, look.date, look.score, look.style, showing
                );
            }
        }

        Commands::View { look_id, url, favorites } => {
            if let Some(url) = url {
                let switch = session.pointer.view(url, ViewSource::Upload);
                println!("✔ 解析タブに表示: {}", switch.image_ref);
            } else if let Some(look_id) = look_id {
                let source = if favorites { ViewSource::Favorites } else { ViewSource::History };
                if let Some(switch) = lookup(session.view_look(look_id, source))? {
                    println!("✔ 解析タブに表示 ({}): {}", switch.source.as_str(), switch.image_ref);
                }
            } else {
                match session.pointer.get() {
                    Some(current) => println!("表示中: {}", current),
                    None => println!("表示中の画像はありません"),
                }
            }
        }

        Commands::Favorite { action } => match action {
            FavoriteAction::Add { look_id, notes, tags } => {
                match lookup(session.favorite_look(look_id, notes, tags))? {
                    Some(true) => println!("✔ お気に入りに追加しました: #{}", look_id),
                    Some(false) => println!("#{} は登録済みです", look_id),
                    None => {}
                }
            }
            FavoriteAction::Remove { look_id } => {
                if session.favorites.remove(look_id) {
                    println!("✔ お気に入りから削除しました: #{}", look_id);
                } else {
                    println!("#{} はお気に入りにありません", look_id);
                }
            }
            FavoriteAction::List { tag } => {
                let favorites = session.favorites.filter_by_tag(tag.as_deref());
                println!("お気に入り ({}件):", favorites.len());
                for favorite in favorites {
                    println!(
                        "  #{} {} {}点 {} [{}]",
                        favorite.id(),
                        favorite.look.date,
                        favorite.look.score,
                        favorite.look.style,
                        favorite.tags.join(", ")
                    );
                    if let Some(notes) = &favorite.notes {
                        println!("      {}", notes);
                    }
                }
            }
            FavoriteAction::Tags => {
                let tags = session.favorites.all_tags();
                if tags.is_empty() {
                    println!("タグはありません");
                } else {
                    println!("タグ: {}", tags.join(", "));
                }
            }
        },

        Commands::Compare { action } => match action {
            CompareAction::Toggle { look_id } => {
                if session.looks.find_by_id(look_id).is_none() {
                    println!("ℹ ルック #{} は見つかりません", look_id);
                } else {
                    session.comparison.toggle(look_id);
                    let selected: Vec<String> =
                        session.comparison.selected().iter().map(|id| format!("#{}", id)).collect();
                    println!("比較対象: {}", selected.join(", "));
                    if session.comparison.can_compare() {
                        println!("→ `style-ai compare show` で比較できます");
                    }
                }
            }
            CompareAction::Clear => {
                session.comparison.clear();
                println!("✔ 比較対象をクリアしました");
            }
            CompareAction::Show => match session.comparison.compare(&session.looks) {
                Ok(comparison) => print_comparison(&comparison),
                Err(style_ai_common::Error::InvalidState(msg)) => println!("ℹ {}", msg),
                Err(e) => return Err(e.into()),
            },
        },

        Commands::Recognize { select, at, clear, open } => {
            if lookup(session.displayed_image())?.is_some() {
                let mut overlay = session.recognition_overlay();
                if clear {
                    overlay.select_item(None);
                } else if let Some(id) = select {
                    if overlay.item(id).is_some() {
                        overlay.select_item(Some(id));
                    } else {
                        println!("ℹ アイテム #{} は見つかりません", id);
                    }
                } else if let Some(point) = at {
                    let hit = overlay.item_at(point[0], point[1]).map(|item| item.id);
                    match hit {
                        Some(id) => overlay.select_item(Some(id)),
                        None => println!("ℹ ({}, {}) にアイテムはありません", point[0], point[1]),
                    }
                }
                session.recognition_selected = overlay.selected_id();

                if let Some(product_id) = open {
                    let image = overlay.selected_id().and_then(|item_id| {
                        overlay
                            .products_for(item_id)
                            .into_iter()
                            .find(|p| p.id == product_id)
                            .map(|p| p.image_url.clone())
                    });
                    match image {
                        Some(image) => {
                            let switch = session.pointer.view(image, ViewSource::Recognition);
                            session.recognition_selected = None;
                            println!("✔ 解析タブに表示: {}", switch.image_ref);
                        }
                        None => println!("ℹ 選択中のアイテムに商品 #{} はありません", product_id),
                    }
                } else {
                    print_overlay(&overlay);
                }
            }
        }

        Commands::Capsule { action } => match action {
            CapsuleAction::Create { name, season, occasion } => {
                let created_at = chrono::Local::now().format("%Y-%m-%d").to_string();
                let id = session.capsules.create(&name, &season, &occasion, &created_at)?;
                println!("✔ カプセルを作成しました: #{} {}", id, name.trim());
            }
            CapsuleAction::Delete { id } => {
                if session.capsules.delete(id) {
                    println!("✔ カプセルを削除しました: #{}", id);
                } else {
                    println!("ℹ カプセル #{} は見つかりません", id);
                }
            }
            CapsuleAction::List => {
                println!("カプセル ({}件):", session.capsules.len());
                for capsule in session.capsules.iter() {
                    println!(
                        "  #{} {} [{} / {}] アイテム{}点 組み合わせ{}通り ({})",
                        capsule.id,
                        capsule.name,
                        capsule.season,
                        capsule.occasion,
                        capsule.items.len(),
                        capsule.combinations,
                        capsule.created_at
                    );
                    for item in &capsule.items {
                        println!("      - {} ({})", item.name, item.category.label());
                    }
                }
            }
            CapsuleAction::Items => {
                println!("ワードローブ:");
                for item in demo::wardrobe_items() {
                    println!(
                        "  #{} {} {} {} {}",
                        item.id,
                        item.category.label(),
                        item.name,
                        item.brand,
                        item.price
                    );
                }
            }
            CapsuleAction::AddItem { capsule_id, item_id } => {
                let item = demo::wardrobe_items()
                    .into_iter()
                    .find(|i| i.id == item_id);
                match item {
                    Some(item) => match lookup(session.capsules.add_item(capsule_id, item).map_err(Into::into))? {
                        Some(true) => println!("✔ アイテム #{} を追加しました", item_id),
                        Some(false) => println!("アイテム #{} は追加済みです", item_id),
                        None => {}
                    },
                    None => println!("ℹ アイテム #{} は見つかりません", item_id),
                }
            }
            CapsuleAction::RemoveItem { capsule_id, item_id } => {
                match lookup(session.capsules.remove_item(capsule_id, item_id).map_err(Into::into))? {
                    Some(true) => println!("✔ アイテム #{} を外しました", item_id),
                    Some(false) => println!("アイテム #{} は入っていません", item_id),
                    None => {}
                }
            }
        },

        Commands::Book { service, salon, date, time, max_price } => {
            println!("💄 style-ai - サロン予約\n");
            let salons = demo::salons();
            let form = BookingForm { service, salon_id: salon, date, time };
            let complete = form.service.is_some()
                && form.salon_id.is_some()
                && form.date.is_some()
                && form.time.is_some();

            let booking = if complete {
                booking::submit(&form, &salons)?
            } else {
                booking::run_interactive(form, &salons, max_price)?
            };

            println!(
                "✔ 予約しました: {} {} {} {} ¥{}",
                booking.salon_name,
                booking::service_label(&booking.service),
                booking.date,
                booking.time,
                booking.price
            );
            session.bookings.push(booking);
        }

        Commands::Profile { action } => {
            let client = ProfileClient::new(collaborator::build_client(&config)?, config.profile_url.clone());
            let user_id = config.get_user_id()?;

            match action {
                ProfileAction::Show { kind } => {
                    if let Some(data) = collaborate("プロフィールの取得", client.fetch(&user_id, &kind).await)? {
                        match data.profile {
                            Some(profile) => print_recommendations(&profile.recommendations()),
                            None if kind != "preferences" => println!("外見解析はまだありません"),
                            None => {}
                        }
                        match data.preferences {
                            Some(prefs) => print_preferences(&prefs),
                            None if kind != "profile" => println!("スタイル嗜好はまだ登録されていません"),
                            None => {}
                        }
                    }
                }
                ProfileAction::SaveAnalysis { photo } => {
                    let upload = upload::read_upload(&photo, config.embed_uploads)?;
                    let pb = spinner("プロフィール写真を解析中...");
                    tokio::time::sleep(Duration::from_millis(config.analysis_delay_ms)).await;
                    pb.finish_and_clear();

                    let analysis = demo::appearance_analysis(&upload.image_ref);
                    print_recommendations(&analysis.recommendations());

                    if collaborate("解析結果の保存", client.save_analysis(&user_id, &analysis).await)?.is_some() {
                        println!("✔ 解析結果を保存しました");
                    }
                }
                ProfileAction::SavePreferences {
                    styles,
                    occasions,
                    colors,
                    celebrities,
                    icons,
                    brands,
                    budget_min,
                    budget_max,
                    notes,
                } => {
                    let preferences = StylePreferences {
                        favorite_styles: styles,
                        favorite_occasions: occasions,
                        favorite_colors: colors,
                        favorite_celebrities: celebrities,
                        fashion_icons: icons,
                        favorite_brands: brands,
                        budget_min,
                        budget_max,
                        additional_notes: notes,
                    };
                    if collaborate("スタイル嗜好の保存", client.save_preferences(&user_id, &preferences).await)?
                        .is_some()
                    {
                        println!("✔ スタイル嗜好を保存しました");
                    }
                }
            }
        }

        Commands::AdClick { ad_id, advertiser, cost } => {
            let client = AdsClient::new(collaborator::build_client(&config)?, config.ads_url.clone());
            let click = AdClick { ad_id, advertiser, click_cost: cost };
            client.track_click_quietly(&click).await;
            println!("→ 広告 {} ({})", click.ad_id, click.advertiser);
        }

        Commands::Admin { action } => {
            let client = AdminClient::new(collaborator::build_client(&config)?, config.admin_url.clone());
            run_admin(&client, action).await?;
        }

        Commands::Export { format, output, title } => {
            println!("📄 style-ai - エクスポート\n");
            export::export_session(&session, &format, &output, &title)?;
        }

        Commands::Config {
            show,
            set_user_id,
            set_profile_url,
            set_ads_url,
            set_admin_url,
        } => {
            // 環境変数の値は保存しない
            let mut file_config = Config::load_file()?;
            let mut changed = false;

            if let Some(user_id) = set_user_id {
                file_config.user_id = Some(user_id);
                changed = true;
            }
            if let Some(url) = set_profile_url {
                file_config.profile_url = url;
                changed = true;
            }
            if let Some(url) = set_ads_url {
                file_config.ads_url = url;
                changed = true;
            }
            if let Some(url) = set_admin_url {
                file_config.admin_url = url;
                changed = true;
            }
            if changed {
                file_config.save()?;
                println!("✔ 設定を保存しました");
            }
            let config = file_config.with_env_overrides();

            if show || !changed {
                println!("設定:");
                println!("  ユーザーID: {}", config.user_id.as_deref().unwrap_or("未設定"));
                println!("  プロフィールAPI: {}", config.profile_url);
                println!("  広告API: {}", config.ads_url);
                println!("  管理API: {}", config.admin_url);
                println!("  解析待ち時間: {}ms", config.analysis_delay_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  画像の埋め込み: {}", if config.embed_uploads { "有効" } else { "無効" });
            }
        }

        Commands::Session { action } => match action {
            SessionAction::Reset => {
                session.reset();
                println!("✔ セッションを初期化しました");
            }
            SessionAction::Info => {
                println!("セッション情報:");
                println!("  パス: {}", session_path.display());
                println!("  履歴: {}件", session.looks.len());
                println!("  お気に入り: {}件", session.favorites.len());
                println!("  比較選択: {}件", session.comparison.selected().len());
                println!("  カプセル: {}件", session.capsules.len());
                println!("  予約: {}件", session.bookings.len());
                println!("  表示中: {}", session.pointer.get().unwrap_or("なし"));
            }
        },
    }

    if !read_only {
        session.save(&session_path)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "style_ai_rust=debug" } else { "style_ai_rust=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// NotFound・InvalidState はメッセージだけ出して続行
fn lookup<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StyleAiError::NotFound(msg)) => {
            println!("ℹ 見つかりません: {}", msg);
            Ok(None)
        }
        Err(StyleAiError::InvalidState(msg)) => {
            println!("ℹ {}", msg);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 外部APIの失敗は通知して続行
fn collaborate<T>(context: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_collaborator_failure() => {
            collaborator::notify_failure(context, &e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 画像を表示してモック解析し、最新なら履歴に追加
async fn analyze_upload(
    session: &mut Session,
    analyzer: &mut Analyzer,
    upload: &Upload,
) -> Option<(u32, LookAnalysis)> {
    let switch = session.pointer.view(upload.image_ref.clone(), ViewSource::Upload);
    session.recognition_selected = None;

    match analyzer.start(upload.seed()).wait().await {
        AnalysisOutcome::Completed(analysis) => session
            .apply_analysis(switch.generation, &switch.image_ref, &upload.date, analysis.clone())
            .map(|look_id| (look_id, analysis)),
        AnalysisOutcome::Superseded => None,
    }
}

async fn run_admin(client: &AdminClient, action: AdminAction) -> Result<()> {
    match action {
        AdminAction::Stats => {
            if let Some(stats) = collaborate("統計の取得", client.stats().await)? {
                println!("統計:");
                println!("  広告クリック: {}回 (¥{:.0})", stats.total_ad_clicks, stats.total_ad_revenue);
                println!("  予約: {}件 (完了 {}件)", stats.total_bookings, stats.completed_bookings);
                println!("  プロフィール登録: {}人", stats.users_with_profile);
                println!("  嗜好登録: {}人", stats.users_with_preferences);
            }
        }
        AdminAction::Banners => {
            if let Some(banners) = collaborate("バナーの取得", client.banners().await)? {
                println!("バナー ({}件):", banners.len());
                for b in banners {
                    let active = if b.is_active { "公開" } else { "停止" };
                    println!(
                        "  #{} [{}] {} - {} ¥{:.2} 優先度{}",
                        b.id.unwrap_or_default(),
                        active,
                        b.advertiser,
                        b.title,
                        b.click_cost,
                        b.priority
                    );
                }
            }
        }
        AdminAction::Salons => {
            if let Some(salons) = collaborate("サロンの取得", client.salons().await)? {
                println!("サロン ({}件):", salons.len());
                for s in salons {
                    let partner = if s.is_partner { " [パートナー]" } else { "" };
                    println!(
                        "  #{} {} ★{:.1} ({}件) サービス{} 予約{}{}",
                        s.id.unwrap_or_default(),
                        s.name,
                        s.rating,
                        s.reviews_count,
                        s.services_count,
                        s.bookings_count,
                        partner
                    );
                }
            }
        }
        AdminAction::Settings { category } => {
            if let Some(settings) = collaborate("設定の取得", client.settings(category.as_deref()).await)? {
                for s in settings {
                    println!("  [{}] {} = {}", s.category, s.setting_key, s.setting_value);
                }
            }
        }
        AdminAction::SaveBanner {
            id,
            advertiser,
            title,
            description,
            image_url,
            link_url,
            cta_text,
            click_cost,
            inactive,
            partner,
            priority,
        } => {
            let banner = Banner {
                id,
                advertiser,
                title,
                description,
                image_url,
                link_url,
                cta_text,
                click_cost,
                is_active: !inactive,
                is_partner: partner,
                priority,
            };
            if collaborate("バナーの保存", client.save(&banner).await)?.is_some() {
                println!("✔ バナーを{}しました", if id.is_some() { "更新" } else { "作成" });
            }
        }
        AdminAction::SaveSalon { id, name, address, rating, reviews, partner, image_url } => {
            let salon = SalonRecord {
                id,
                name,
                address,
                rating,
                reviews_count: reviews,
                is_partner: partner,
                image_url,
                ..SalonRecord::default()
            };
            if collaborate("サロンの保存", client.save(&salon).await)?.is_some() {
                println!("✔ サロンを{}しました", if id.is_some() { "更新" } else { "作成" });
            }
        }
        AdminAction::Set { key, value } => {
            if collaborate("設定の更新", client.update_setting(&key, &value).await)?.is_some() {
                println!("✔ {} = {}", key, value);
            }
        }
    }
    Ok(())
}

fn print_analysis(look_id: u32, analysis: &LookAnalysis) {
    println!("✔ 解析完了: ルック #{}", look_id);
    println!("  スコア: {}点", analysis.overall_score);
    println!("  スタイル: {} ({})", analysis.style, analysis.occasion);
    println!("  カラー: {}", analysis.colors.join(", "));
    println!("  良い点:");
    for s in &analysis.strengths {
        println!("    + {}", s);
    }
    println!("  改善点:");
    for s in &analysis.improvements {
        println!("    - {}", s);
    }
}

fn print_comparison(comparison: &Comparison) {
    let (a, b) = (&comparison.look1, &comparison.look2);
    println!("比較: #{} {} ({}点) vs #{} {} ({}点)", a.id, a.style, a.score, b.id, b.style, b.score);
    println!("  スコア差: {:+}", comparison.score_diff);
    for criterion in &comparison.criteria {
        println!(
            "  {:<10} {:>3} vs {:>3} ({:+})",
            criterion.name,
            criterion.score1,
            criterion.score2,
            criterion.diff()
        );
    }
    println!("\n{}", comparison.recommendation());
}

fn print_overlay(overlay: &RecognitionOverlay) {
    println!("認識アイテム ({}件):", overlay.items().len());
    for item in overlay.items() {
        let marker = if overlay.selected_id() == Some(item.id) { "▶" } else { " " };
        let b = &item.bounding_box;
        println!(
            "  {} #{} {} ({}) 確度{}% [{:.0},{:.0} {:.0}x{:.0}]",
            marker, item.id, item.name, item.category, item.confidence, b.x, b.y, b.width, b.height
        );
    }

    if let Some(item) = overlay.selected_item() {
        println!(
            "\n「{}」の類似商品 (在庫あり {}件):",
            item.name,
            overlay.in_stock_count(item.id)
        );
        for p in overlay.products_for(item.id) {
            let stock = if p.in_stock { "在庫あり" } else { "在庫なし" };
            println!(
                "  #{} {} {} {} 類似度{}% {} [{}]",
                p.id,
                p.brand,
                p.name,
                p.price,
                p.similarity,
                stock,
                p.sizes.join("/")
            );
        }
    }
}

fn print_recommendations(recommendations: &[Recommendation]) {
    println!("外見解析:");
    for rec in recommendations {
        let value = match rec {
            Recommendation::ColorType(v) | Recommendation::BodyType(v) => v.clone(),
            Recommendation::Styles(v) | Recommendation::Celebrities(v) => v.join(", "),
            Recommendation::Colors { recommended, avoid } => {
                format!("おすすめ {} / 避ける {}", recommended.join(", "), avoid.join(", "))
            }
        };
        println!("  {}: {}", rec.label(), value);
    }
}

fn print_preferences(prefs: &StylePreferences) {
    println!("スタイル嗜好:");
    println!("  スタイル: {}", prefs.favorite_styles.join(", "));
    println!("  シーン: {}", prefs.favorite_occasions.join(", "));
    println!("  カラー: {}", prefs.favorite_colors.join(", "));
    if !prefs.favorite_brands.is_empty() {
        println!("  ブランド: {}", prefs.favorite_brands);
    }
    println!("  予算: ¥{} 〜 ¥{}", prefs.budget_min, prefs.budget_max);
}
