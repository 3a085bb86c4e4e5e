//! # KoeMail ドメイン層
//!
//! 音声スキルのリクエスト・レスポンスと、通知メールに関する値を定義する。
//!
//! ## 設計方針
//!
//! すべての値は 1 回のリクエスト処理の中だけで生きる。永続化も
//! リクエスト間の共有もしないため、エンティティ（識別子を持つオブジェクト）は存在せず、
//! 値オブジェクトとエラー型だけで構成される。
//!
//! ## 依存関係の方向
//!
//! ```text
//! skill → infra → domain
//! ```
//!
//! ドメイン層は HTTP クライアントや AWS SDK に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`request`] - 音声プラットフォームから届くリクエストエンベロープ
//! - [`response`] - 音声プラットフォームへ返すレスポンスとビルダー
//! - [`profile`] - ユーザープロフィール（メールアドレス）と権限スコープ
//! - [`credentials`] - ロール引き受けで得る一時認証情報
//! - [`notification`] - 通知メールと送信エラー
//! - [`speech`] - スキルが話す固定文言
//! - [`error`] - ドメイン層のエラー定義

pub mod credentials;
pub mod error;
pub mod notification;
pub mod profile;
pub mod request;
pub mod response;
pub mod speech;

pub use error::DomainError;
