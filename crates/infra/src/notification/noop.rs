//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! SES を用意できないローカル環境でスキルの動作を確認するときに使用する。

use async_trait::async_trait;
use koemail_domain::{
    credentials::TemporaryCredentials,
    notification::{EmailMessage, NotificationError, SendReceipt},
};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(
        &self,
        _credentials: TemporaryCredentials,
        email: &EmailMessage,
    ) -> Result<SendReceipt, NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(SendReceipt { message_id: None })
    }
}
