//! StyleAI Common Library
//!
//! CLIとセッションファイルで共有される型と状態コンポーネント

pub mod types;
pub mod error;
pub mod looks;
pub mod favorites;
pub mod comparison;
pub mod recognition;
pub mod pointer;
pub mod capsule;
pub mod booking;
pub mod profile;
pub mod demo;
pub mod export;

pub use types::{
    dedup_tags, null_as_default, BoundingBox, FavoriteRecord, LookAnalysis, LookRecord, NewLook, RecognizedItem,
    SimilarProduct,
};
pub use error::{Error, Result};
pub use looks::LookStore;
pub use favorites::FavoritesManager;
pub use comparison::{Comparison, ComparisonSelector, CriterionScore, Verdict};
pub use recognition::RecognitionOverlay;
pub use pointer::{ImagePointer, ViewSource, ViewSwitch};
pub use capsule::{Capsule, CapsuleWardrobe, WardrobeCategory, WardrobeItem};
pub use booking::{filter_salons, Booking, BookingForm, Salon, ServiceOffer};
pub use profile::{AppearanceAnalysis, Recommendation, StylePreferences};
