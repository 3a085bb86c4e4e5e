//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `skill`: 音声プラットフォームからのリクエスト受付

pub mod health;
pub mod skill;

pub use health::health_check;
pub use skill::{SkillState, handle_skill_request};
