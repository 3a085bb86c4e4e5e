//! # 通知メール送信
//!
//! ロール引き受け → メッセージ組み立て → 送信 → ログ記録を順に行う。
//!
//! 認証情報は呼び出しごとに取得し、保持しない。送信に失敗しても再試行しない。

use std::sync::Arc;

use koemail_domain::{notification::EmailMessage, profile::EmailAddress};
use koemail_infra::{NotificationSender, RoleAssumer};
use koemail_shared::{event_log::event, log_business_event};

use crate::{config::NotificationConfig, error::SkillError};

/// 通知サービス
pub struct NotificationService {
    role_assumer: Arc<dyn RoleAssumer>,
    sender:       Arc<dyn NotificationSender>,
    config:       NotificationConfig,
}

impl NotificationService {
    pub fn new(
        role_assumer: Arc<dyn RoleAssumer>,
        sender: Arc<dyn NotificationSender>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            role_assumer,
            sender,
            config,
        }
    }

    /// 通知メールを 1 通送信する
    #[tracing::instrument(skip_all)]
    pub async fn send_notification(&self, to: &EmailAddress) -> Result<(), SkillError> {
        let credentials = self
            .role_assumer
            .assume_role(&self.config.role_arn, &self.config.role_session_name)
            .await
            .map_err(SkillError::RoleAssumption)?;

        let message = EmailMessage::notification(&self.config.email_sender, to.clone());

        match self.sender.send_email(credentials, &message).await {
            Ok(receipt) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %to,
                    notification.message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.recipient = %to,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(SkillError::Notification(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use koemail_domain::notification::{NOTIFICATION_BODY, NOTIFICATION_SUBJECT};
    use koemail_infra::mock::{MockNotificationSender, MockRoleAssumer};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::notification_config;

    fn make_service(
        role_assumer: MockRoleAssumer,
        sender: MockNotificationSender,
    ) -> NotificationService {
        NotificationService::new(
            Arc::new(role_assumer),
            Arc::new(sender),
            notification_config(),
        )
    }

    fn address() -> EmailAddress {
        EmailAddress::new("taro@example.com").unwrap()
    }

    #[tokio::test]
    async fn ロールを引き受けて固定内容のメールを送る() {
        let role_assumer = MockRoleAssumer::new();
        let sender = MockNotificationSender::new();
        let sut = make_service(role_assumer.clone(), sender.clone());

        sut.send_notification(&address()).await.unwrap();

        assert_eq!(
            role_assumer.calls(),
            vec![(
                "arn:aws:iam::123456789012:role/SendEmailRole".to_string(),
                "SendEmailRoleSession".to_string()
            )]
        );
        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email.source, "noreply@koemail.example.com");
        assert_eq!(sent[0].email.to, address());
        assert_eq!(sent[0].email.subject, NOTIFICATION_SUBJECT);
        assert_eq!(sent[0].email.text_body, NOTIFICATION_BODY);
        assert_eq!(sent[0].email.charset, "UTF-8");
    }

    #[tokio::test]
    async fn 呼び出しごとに新しい認証情報を使う() {
        let role_assumer = MockRoleAssumer::new();
        let sender = MockNotificationSender::new();
        let sut = make_service(role_assumer.clone(), sender.clone());

        sut.send_notification(&address()).await.unwrap();
        sut.send_notification(&address()).await.unwrap();

        assert_eq!(role_assumer.calls().len(), 2);
        let keys: Vec<_> = sender
            .sent_emails()
            .into_iter()
            .map(|s| s.access_key_id)
            .collect();
        assert_eq!(keys, vec!["ASIAMOCK1".to_string(), "ASIAMOCK2".to_string()]);
    }

    #[tokio::test]
    async fn ロール引き受けに失敗したら送信しない() {
        let sender = MockNotificationSender::new();
        let sut = make_service(MockRoleAssumer::failing(), sender.clone());

        let result = sut.send_notification(&address()).await;

        assert!(matches!(result, Err(SkillError::RoleAssumption(_))));
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn 送信失敗はエラーとして返す() {
        let sut = make_service(MockRoleAssumer::new(), MockNotificationSender::failing());

        let result = sut.send_notification(&address()).await;

        assert!(matches!(result, Err(SkillError::Notification(_))));
    }
}
