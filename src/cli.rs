use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "style-ai")]
#[command(about = "ファッション写真AIスタイル解析・お気に入り管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// セッションファイル（デフォルト: データディレクトリ/style-ai/session.json）
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真をアップロードして解析
    Upload {
        /// 画像ファイル (jpg/jpeg/png/webp)
        #[arg(required = true)]
        image: PathBuf,

        /// 画像をData URLとして埋め込む
        #[arg(long)]
        embed: bool,
    },

    /// フォルダの写真をまとめて解析
    Import {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 画像をData URLとして埋め込む
        #[arg(long)]
        embed: bool,
    },

    /// 解析履歴を表示
    History,

    /// ルックを解析タブで表示
    View {
        /// ルックID
        look_id: Option<u32>,

        /// 画像の参照（パス/URL）を直接指定
        #[arg(long, conflicts_with = "look_id")]
        url: Option<String>,

        /// お気に入りから開く
        #[arg(long)]
        favorites: bool,
    },

    /// お気に入り管理
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// ルック比較（最大2件）
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },

    /// 表示中の画像のアイテム認識
    Recognize {
        /// アイテムを選択
        #[arg(long, conflicts_with = "clear")]
        select: Option<u32>,

        /// 座標（%）でアイテムを選択
        #[arg(long, num_args = 2, value_names = ["X", "Y"], conflicts_with = "select")]
        at: Option<Vec<f32>>,

        /// 選択を解除
        #[arg(long)]
        clear: bool,

        /// 類似商品の画像を解析タブで開く
        #[arg(long)]
        open: Option<u32>,
    },

    /// カプセルワードローブ
    Capsule {
        #[command(subcommand)]
        action: CapsuleAction,
    },

    /// ビューティーサロン予約（不足項目は対話入力）
    Book {
        /// サービス (makeup/hair/manicure/pedicure)
        #[arg(long)]
        service: Option<String>,

        /// サロンID
        #[arg(long)]
        salon: Option<u32>,

        /// 日付
        #[arg(long)]
        date: Option<String>,

        /// 時間 (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// 上限価格
        #[arg(long, default_value = "10000")]
        max_price: u32,
    },

    /// プロフィール（外見解析・スタイル嗜好）
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// 広告クリックを記録
    AdClick {
        /// 広告ID
        #[arg(required = true)]
        ad_id: String,

        /// 広告主
        #[arg(long, default_value = "Unknown")]
        advertiser: String,

        /// クリック単価
        #[arg(long, default_value = "10")]
        cost: f64,
    },

    /// 管理API
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// 履歴・お気に入り・比較をExcelに出力
    Export {
        /// 出力形式 (excel)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// ファイル名（ディレクトリ指定時）
        #[arg(short, long, default_value = "style-ai")]
        title: String,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        #[arg(long)]
        set_user_id: Option<String>,

        #[arg(long)]
        set_profile_url: Option<String>,

        #[arg(long)]
        set_ads_url: Option<String>,

        #[arg(long)]
        set_admin_url: Option<String>,
    },

    /// セッション管理
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// お気に入りに追加
    Add {
        look_id: u32,

        /// メモ
        #[arg(short, long)]
        notes: Option<String>,

        /// タグ（複数指定可）
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// お気に入りから削除
    Remove { look_id: u32 },
    /// お気に入り一覧
    List {
        /// タグで絞り込み
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// 使われているタグ一覧
    Tags,
}

#[derive(Subcommand)]
pub enum CompareAction {
    /// 比較対象の選択を切り替え
    Toggle { look_id: u32 },
    /// 選択を解除
    Clear,
    /// 比較結果を表示
    Show,
}

#[derive(Subcommand)]
pub enum CapsuleAction {
    /// カプセルを作成
    Create {
        name: String,

        #[arg(long, default_value = "")]
        season: String,

        #[arg(long, default_value = "")]
        occasion: String,
    },
    /// カプセルを削除
    Delete { id: u32 },
    /// カプセル一覧
    List,
    /// ワードローブのアイテム一覧
    Items,
    /// アイテムを追加
    AddItem { capsule_id: u32, item_id: u32 },
    /// アイテムを外す
    RemoveItem { capsule_id: u32, item_id: u32 },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// 保存済みのプロフィールを表示
    Show {
        /// 取得対象 (profile/preferences/all)
        #[arg(long, default_value = "all")]
        kind: String,
    },
    /// プロフィール写真を解析して保存
    SaveAnalysis {
        /// プロフィール写真
        #[arg(required = true)]
        photo: PathBuf,
    },
    /// スタイル嗜好を保存
    SavePreferences {
        #[arg(long, value_delimiter = ',')]
        styles: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        occasions: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,

        #[arg(long, default_value = "")]
        celebrities: String,

        #[arg(long, default_value = "")]
        icons: String,

        #[arg(long, default_value = "")]
        brands: String,

        #[arg(long, default_value = "5000")]
        budget_min: u32,

        #[arg(long, default_value = "200000")]
        budget_max: u32,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// プラットフォーム統計
    Stats,
    /// 広告バナー一覧
    Banners,
    /// サロン一覧
    Salons,
    /// 設定一覧
    Settings {
        #[arg(long)]
        category: Option<String>,
    },
    /// バナーを作成/更新（--id 指定で更新）
    SaveBanner {
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        advertiser: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long, default_value = "")]
        link_url: String,
        #[arg(long, default_value = "詳しく見る")]
        cta_text: String,
        #[arg(long, default_value = "10")]
        click_cost: f64,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        partner: bool,
        #[arg(long, default_value = "0")]
        priority: i32,
    },
    /// サロンを作成/更新（--id 指定で更新）
    SaveSalon {
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "0")]
        rating: f64,
        #[arg(long, default_value = "0")]
        reviews: u32,
        #[arg(long)]
        partner: bool,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// 設定値を更新
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// デモデータに戻す
    Reset,
    /// セッションの概要
    Info,
}

#[derive(Clone, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Excel,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use excel", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_favorite_add_with_tags() {
        let cli = Cli::try_parse_from(["style-ai", "favorite", "add", "5", "-t", "work", "--tag", "work"])
            .expect("パース失敗");
        match cli.command {
            Commands::Favorite { action: FavoriteAction::Add { look_id, tags, notes } } => {
                assert_eq!(look_id, 5);
                assert_eq!(tags, vec!["work", "work"]);
                assert!(notes.is_none());
            }
            _ => panic!("favorite add として解釈されていない"),
        }
    }

    #[test]
    fn test_parse_recognize_at() {
        let cli = Cli::try_parse_from(["style-ai", "recognize", "--at", "40", "30"]).expect("パース失敗");
        match cli.command {
            Commands::Recognize { at, select, clear, open } => {
                assert_eq!(at, Some(vec![40.0, 30.0]));
                assert!(select.is_none());
                assert!(!clear);
                assert!(open.is_none());
            }
            _ => panic!("recognize として解釈されていない"),
        }
    }

    #[test]
    fn test_export_format() {
        assert!(matches!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel)));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
