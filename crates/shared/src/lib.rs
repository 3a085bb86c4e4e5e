//! # KoeMail 共有ユーティリティ
//!
//! スキルサービス・インフラ層・ドメイン層から共通して使われるユーティリティ。
//!
//! ## 設計方針
//!
//! - ビジネスロジック（音声応答の組み立て、通知送信）を含まない
//! - axum への依存を持たない（HTTP レスポンス変換は各アプリの責務）
//! - トレーシング関連の依存は `observability` feature で有効化する

pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

#[cfg(feature = "observability")]
pub mod canonical_log;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
