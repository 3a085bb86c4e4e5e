//! # 定型ハンドラ
//!
//! 外部サービスを呼ばないハンドラ群。

use async_trait::async_trait;
use koemail_domain::{
    request::{RequestEnvelope, RequestKind},
    response::{ResponseBuilder, ResponseEnvelope},
    speech,
};

use super::RequestHandler;
use crate::error::SkillError;

/// 起動ハンドラ
///
/// 挨拶を話し、同じ文言で再プロンプトする。セッションは開いたまま。
pub struct LaunchHandler;

#[async_trait]
impl RequestHandler for LaunchHandler {
    fn name(&self) -> &'static str {
        "launch"
    }

    async fn handle(&self, _: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        Ok(ResponseBuilder::new()
            .speak(speech::LAUNCH)
            .reprompt(speech::LAUNCH)
            .build())
    }
}

/// セッション終了ハンドラ
///
/// 終了理由をログに残し、空の応答を返す。
pub struct SessionEndedHandler;

#[async_trait]
impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        let reason = match envelope.request.kind() {
            RequestKind::SessionEnded { reason } => reason.unwrap_or("UNKNOWN"),
            _ => "UNKNOWN",
        };
        let error = envelope.request.error.as_ref();
        tracing::info!(
            session.end_reason = reason,
            session.error_type = error.map(|e| e.error_type.as_str()),
            session.error_message = error.and_then(|e| e.message.as_deref()),
            user.id = envelope.user_id(),
            "セッションが終了しました"
        );

        Ok(ResponseBuilder::new().build())
    }
}

/// インテント反響ハンドラ
///
/// 登録されていないインテントの名前をそのまま読み上げる。
pub struct IntentReflectorHandler;

#[async_trait]
impl RequestHandler for IntentReflectorHandler {
    fn name(&self) -> &'static str {
        "intent_reflector"
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        let name = envelope
            .request
            .intent
            .as_ref()
            .map(|intent| intent.name.as_str())
            .unwrap_or_default();

        Ok(ResponseBuilder::new()
            .speak(&speech::reflect_intent(name))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{envelope, intent_json, launch_json, session_ended_json};

    #[tokio::test]
    async fn 起動時は挨拶を話しセッションを閉じない() {
        let response = LaunchHandler.handle(&envelope(launch_json())).await.unwrap();

        assert_eq!(response.spoken_text(), Some(speech::LAUNCH));
        assert_eq!(response.reprompt_text(), Some(speech::LAUNCH));
        assert_eq!(response.should_end_session(), None);
    }

    #[tokio::test]
    async fn 同じ起動リクエストには同じ応答を返す() {
        let request = envelope(launch_json());

        let first = LaunchHandler.handle(&request).await.unwrap();
        let second = LaunchHandler.handle(&request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn セッション終了時は何も話さない() {
        let response = SessionEndedHandler
            .handle(&envelope(session_ended_json()))
            .await
            .unwrap();

        assert_eq!(response.spoken_text(), None);
        assert_eq!(response.reprompt_text(), None);
        assert_eq!(response.should_end_session(), None);
    }

    #[rstest]
    #[case("HelloWorldIntent")]
    #[case("AMAZON.HelpIntent")]
    #[case("AMAZON.StopIntent")]
    #[tokio::test]
    async fn 未登録インテントは名前をそのまま読み上げる(#[case] name: &str) {
        let response = IntentReflectorHandler
            .handle(&envelope(intent_json(name)))
            .await
            .unwrap();

        let spoken = response.spoken_text().unwrap();
        assert!(spoken.contains(name), "発話にインテント名を含むこと: {spoken}");
        assert_eq!(response.should_end_session(), None);
    }
}
