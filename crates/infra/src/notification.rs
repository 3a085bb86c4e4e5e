//! # 通知送信
//!
//! 通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SES（本番用）、Noop（ローカル動作確認用）
//! - **認証情報は呼び出しごと**: 送信のたびにロール引き受けで得た認証情報を受け取り、
//!   その送信 1 回だけに使う
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択

mod noop;
mod ses;

use async_trait::async_trait;
use koemail_domain::{
    credentials::TemporaryCredentials,
    notification::{EmailMessage, NotificationError, SendReceipt},
};
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    ///
    /// `credentials` は所有権ごと受け取り、この送信が終われば破棄される。
    async fn send_email(
        &self,
        credentials: TemporaryCredentials,
        email: &EmailMessage,
    ) -> Result<SendReceipt, NotificationError>;
}
