//! # ユースケース層
//!
//! 音声リクエストの振り分けと、各ハンドラのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 外部サービスのクライアントを `Arc<dyn Trait>` で外部から注入
//! - **キーによる振り分け**: リクエスト種別とインテント名でハンドラを一意に決める
//! - **エラーは 1 か所で処理**: ハンドラのエラーはエラーハンドラが謝罪応答に変換する
//!
//! ## モジュール構成
//!
//! - `dispatch`: ルーターとエラーハンドラ
//! - `handlers`: 起動・セッション終了・インテント反響の各ハンドラ
//! - `send_email`: メール送信インテントのハンドラ
//! - `profile`: プロフィールのメールアドレス取得
//! - `notification`: ロール引き受けと通知メール送信

pub mod dispatch;
pub mod handlers;
pub mod notification;
pub mod profile;
pub mod send_email;

pub use dispatch::{ErrorHandler, RequestHandler, SkillRouter};
pub use handlers::{IntentReflectorHandler, LaunchHandler, SessionEndedHandler};
pub use notification::NotificationService;
pub use profile::ProfileLookup;
pub use send_email::{SEND_EMAIL_INTENT, SendEmailIntentHandler};
