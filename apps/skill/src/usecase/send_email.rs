//! # メール送信インテント
//!
//! プロフィールのメールアドレスを取得できればメールを送り、
//! 権限が無ければ許可を求めるカードを返す。いずれの場合もセッションを閉じる。

use async_trait::async_trait;
use koemail_domain::{
    profile::{EMAIL_READ_PERMISSION, EmailAddress},
    request::RequestEnvelope,
    response::{ResponseBuilder, ResponseEnvelope},
    speech,
};
use koemail_shared::{event_log::event, log_business_event};

use super::{NotificationService, ProfileLookup, RequestHandler};
use crate::error::SkillError;

/// インテント名
pub const SEND_EMAIL_INTENT: &str = "SendEmailIntent";

/// メール送信インテントの状態
enum Consent {
    /// メールアドレス読み取りが許可されていない
    NotGranted,
    /// 許可済みでメールアドレスを取得できた
    Granted(EmailAddress),
}

/// メール送信インテントハンドラ
pub struct SendEmailIntentHandler {
    profile:      ProfileLookup,
    notification: NotificationService,
}

impl SendEmailIntentHandler {
    pub fn new(profile: ProfileLookup, notification: NotificationService) -> Self {
        Self {
            profile,
            notification,
        }
    }

    async fn consent(&self, envelope: &RequestEnvelope) -> Result<Consent, SkillError> {
        let access = envelope.api_access().ok_or(SkillError::MissingApiAccess)?;
        Ok(match self.profile.fetch_profile_email(&access).await? {
            Some(address) => Consent::Granted(address),
            None => Consent::NotGranted,
        })
    }
}

#[async_trait]
impl RequestHandler for SendEmailIntentHandler {
    fn name(&self) -> &'static str {
        "send_email"
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        match self.consent(envelope).await? {
            Consent::NotGranted => {
                log_business_event!(
                    event.category = event::category::SKILL,
                    event.action = event::action::PERMISSION_REQUESTED,
                    event.result = event::result::SUCCESS,
                    permission = EMAIL_READ_PERMISSION,
                    user.id = envelope.user_id(),
                    "メールアドレスの読み取り権限を要求"
                );
                Ok(ResponseBuilder::new()
                    .speak(speech::PERMISSION_REQUIRED)
                    .with_ask_for_permissions_consent_card(&[EMAIL_READ_PERMISSION])
                    .with_should_end_session(true)
                    .build())
            }
            Consent::Granted(address) => {
                self.notification.send_notification(&address).await?;
                Ok(ResponseBuilder::new()
                    .speak(speech::EMAIL_SENT)
                    .with_should_end_session(true)
                    .build())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use koemail_infra::mock::{MockNotificationSender, MockProfileClient, MockRoleAssumer};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        test_utils::{envelope, intent_json, launch_json, notification_config, session_ended_json},
        usecase::SkillRouter,
    };

    struct Fixture {
        profile:      MockProfileClient,
        role_assumer: MockRoleAssumer,
        sender:       MockNotificationSender,
    }

    impl Fixture {
        fn new(profile: MockProfileClient) -> Self {
            Self {
                profile,
                role_assumer: MockRoleAssumer::new(),
                sender: MockNotificationSender::new(),
            }
        }

        fn handler(&self) -> SendEmailIntentHandler {
            SendEmailIntentHandler::new(
                ProfileLookup::new(Arc::new(self.profile.clone())),
                NotificationService::new(
                    Arc::new(self.role_assumer.clone()),
                    Arc::new(self.sender.clone()),
                    notification_config(),
                ),
            )
        }

        /// 本番と同じ構成のルーター
        fn router(&self) -> SkillRouter {
            crate::app_builder::build_skill_router(Arc::new(self.handler()))
        }

        /// 本番と同じ構成のルーター経由で処理する
        async fn dispatch(&self) -> ResponseEnvelope {
            self.router()
                .dispatch(&envelope(intent_json(SEND_EMAIL_INTENT)))
                .await
        }

        /// 外部サービスが一度も呼ばれていないこと
        fn assert_no_side_effects(&self) {
            assert!(self.profile.calls().is_empty());
            assert!(self.role_assumer.calls().is_empty());
            assert!(self.sender.sent_emails().is_empty());
        }
    }

    #[tokio::test]
    async fn 許可済みなら取得したアドレスに1通だけ送信してセッションを閉じる() {
        let fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));

        let response = fixture.dispatch().await;

        let sent = fixture.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email.to.as_str(), "taro@example.com");
        assert_eq!(response.spoken_text(), Some(speech::EMAIL_SENT));
        assert_eq!(response.should_end_session(), Some(true));
        assert!(response.permission_scopes().is_empty());
    }

    #[tokio::test]
    async fn 権限未許可なら送信せず許可を求めるカードを返す() {
        let fixture = Fixture::new(MockProfileClient::failing_with_status(403));

        let response = fixture.dispatch().await;

        assert!(fixture.sender.sent_emails().is_empty());
        assert!(fixture.role_assumer.calls().is_empty());
        assert_eq!(response.spoken_text(), Some(speech::PERMISSION_REQUIRED));
        assert_eq!(
            response.permission_scopes(),
            &["alexa::profile:email:read".to_string()]
        );
        assert_eq!(response.should_end_session(), Some(true));
    }

    #[tokio::test]
    async fn プロフィール取得が500なら謝罪応答を返し送信しない() {
        let fixture = Fixture::new(MockProfileClient::failing_with_status(500));

        let response = fixture.dispatch().await;

        assert!(fixture.sender.sent_emails().is_empty());
        assert_eq!(response.spoken_text(), Some(speech::APOLOGY));
        assert_eq!(response.should_end_session(), None);
    }

    #[tokio::test]
    async fn ロール引き受けに失敗したら謝罪応答を返す() {
        let mut fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));
        fixture.role_assumer = MockRoleAssumer::failing();

        let response = fixture.dispatch().await;

        assert!(fixture.sender.sent_emails().is_empty());
        assert_eq!(response.spoken_text(), Some(speech::APOLOGY));
    }

    #[tokio::test]
    async fn 送信に失敗したら謝罪応答を返す() {
        let mut fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));
        fixture.sender = MockNotificationSender::failing();

        let response = fixture.dispatch().await;

        assert_eq!(response.spoken_text(), Some(speech::APOLOGY));
    }

    #[tokio::test]
    async fn アクセス情報が無ければプロフィールを呼ばずにエラーを返す() {
        let fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));
        let mut json = intent_json(SEND_EMAIL_INTENT);
        json["context"]["System"]
            .as_object_mut()
            .unwrap()
            .remove("apiAccessToken");

        let result = fixture.handler().handle(&envelope(json)).await;

        assert!(matches!(result, Err(SkillError::MissingApiAccess)));
        assert!(fixture.profile.calls().is_empty());
    }

    #[tokio::test]
    async fn ルーターは登録されたインテントハンドラを使う() {
        let fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));
        let router = fixture.router();

        let response = router
            .dispatch(&envelope(intent_json(SEND_EMAIL_INTENT)))
            .await;

        assert_ne!(response.spoken_text(), Some(speech::reflect_intent(SEND_EMAIL_INTENT).as_str()));
        assert_eq!(fixture.profile.calls().len(), 1);
    }

    #[tokio::test]
    async fn 同じ起動リクエストにはルーター経由でも同じ応答を返し外部サービスを呼ばない() {
        let fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));
        let router = fixture.router();
        let request = envelope(launch_json());

        let first = router.dispatch(&request).await;
        let second = router.dispatch(&request).await;

        assert_eq!(first, second);
        assert_eq!(first.spoken_text(), Some(speech::LAUNCH));
        assert_eq!(first.should_end_session(), None);
        fixture.assert_no_side_effects();
    }

    #[tokio::test]
    async fn セッション終了はルーター経由でも何も話さず外部サービスを呼ばない() {
        let fixture = Fixture::new(MockProfileClient::returning_email("taro@example.com"));

        let response = fixture
            .router()
            .dispatch(&envelope(session_ended_json()))
            .await;

        assert_eq!(response.spoken_text(), None);
        assert_eq!(response.reprompt_text(), None);
        assert_eq!(response.should_end_session(), None);
        fixture.assert_no_side_effects();
    }
}
