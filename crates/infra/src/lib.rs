//! # KoeMail インフラ層
//!
//! スキルが呼び出す外部サービスとの通信を担当する。
//!
//! ## 責務
//!
//! - **プロフィール API**: 音声プラットフォームからユーザーのメールアドレスを取得
//! - **ロール引き受け**: STS の AssumeRole で送信専用の一時認証情報を取得
//! - **メール送信**: SES v2 で通知メールを送信
//!
//! いずれも trait で抽象化し、ユースケース層はテスト時にモックへ差し替える。
//!
//! ## 依存関係
//!
//! ```text
//! skill → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`profile`] - プロフィール API クライアント
//! - [`sts`] - STS ロール引き受け
//! - [`notification`] - メール送信
//! - [`error`] - インフラ層エラー定義

pub mod error;
pub mod notification;
pub mod profile;
pub mod sts;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
pub use notification::NotificationSender;
pub use profile::{AlexaProfileClient, ProfileClient};
pub use sts::{RoleAssumer, StsRoleAssumer};
