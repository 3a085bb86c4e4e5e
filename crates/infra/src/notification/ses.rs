//! SES 通知送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 送信のたびに、渡された一時認証情報だけを持つクライアントを組み立てる。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    types::{Body, Content, Destination, EmailContent, Message},
};
use koemail_domain::{
    credentials::TemporaryCredentials,
    notification::{EmailMessage, NotificationError, SendReceipt},
};

use super::NotificationSender;

/// 認証情報プロバイダ名（SDK のログに出る）
const CREDENTIALS_PROVIDER_NAME: &str = "koemail-assumed-role";

/// SES 通知送信
///
/// リージョンのみを保持する。クライアントは送信ごとに作り直し、
/// 認証情報を次の送信に持ち越さない。
pub struct SesNotificationSender {
    region: String,
}

impl SesNotificationSender {
    /// 新しい SES 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `region`: SES のリージョン（例: `"ap-northeast-1"`）
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    fn client_for(&self, credentials: TemporaryCredentials) -> Client {
        let credentials = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            Some(credentials.session_token().to_string()),
            credentials.expiration(),
            CREDENTIALS_PROVIDER_NAME,
        );

        let config = aws_sdk_sesv2::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials)
            .build();

        Client::from_conf(config)
    }
}

/// 文字コード付きの Content を組み立てる
fn content(data: &str, charset: &str, label: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .charset(charset)
        .build()
        .map_err(|e| NotificationError::InvalidMessage(format!("{label}構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    #[tracing::instrument(skip_all, fields(region = %self.region))]
    async fn send_email(
        &self,
        credentials: TemporaryCredentials,
        email: &EmailMessage,
    ) -> Result<SendReceipt, NotificationError> {
        let destination = Destination::builder().to_addresses(email.to.as_str()).build();

        let message = Message::builder()
            .subject(content(&email.subject, email.charset, "件名")?)
            .body(
                Body::builder()
                    .text(content(&email.text_body, email.charset, "本文")?)
                    .build(),
            )
            .build();

        let output = self
            .client_for(credentials)
            .send_email()
            .from_email_address(&email.source)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| {
                NotificationError::SendFailed(format!("SES 送信失敗: {}", DisplayErrorContext(&e)))
            })?;

        Ok(SendReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }
}
