//! # リクエストの振り分け
//!
//! リクエスト種別（とインテント名）をキーにハンドラを選び、応答を 1 つ返す。
//!
//! ## 振り分け規則
//!
//! | リクエスト | ハンドラ |
//! |---|---|
//! | `LaunchRequest` | 起動ハンドラ |
//! | `IntentRequest`（登録済みの名前） | そのインテントのハンドラ |
//! | `IntentRequest`（それ以外） | フォールバック（インテント反響） |
//! | `SessionEndedRequest` | セッション終了ハンドラ |
//! | その他 | エラーハンドラ |
//!
//! インテントは名前で引くため、登録順によってフォールバックが
//! 登録済みインテントを横取りすることはない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use koemail_domain::{
    request::{RequestEnvelope, RequestKind},
    response::{ResponseBuilder, ResponseEnvelope},
    speech,
};
use koemail_shared::{event_log::event, log_business_event};

use crate::error::SkillError;

/// リクエストハンドラ
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// ログ用のハンドラ名
    fn name(&self) -> &'static str;

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError>;
}

/// エラーハンドラ
///
/// あらゆる [`SkillError`] を受け取り、詳細をログに残して謝罪応答を返す。
/// セッションは閉じない。
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn handle(&self, error: &SkillError) -> ResponseEnvelope {
        tracing::error!(
            error.category = error.category(),
            error.kind = error.kind(),
            error = %error,
            error.detail = ?error,
            "リクエスト処理でエラーが発生しました"
        );

        ResponseBuilder::new()
            .speak(speech::APOLOGY)
            .reprompt(speech::APOLOGY)
            .build()
    }
}

/// スキルのルーター
pub struct SkillRouter {
    launch:          Arc<dyn RequestHandler>,
    session_ended:   Arc<dyn RequestHandler>,
    intents:         HashMap<String, Arc<dyn RequestHandler>>,
    fallback_intent: Arc<dyn RequestHandler>,
    error_handler:   ErrorHandler,
}

impl SkillRouter {
    pub fn new(
        launch: Arc<dyn RequestHandler>,
        session_ended: Arc<dyn RequestHandler>,
        fallback_intent: Arc<dyn RequestHandler>,
    ) -> Self {
        Self {
            launch,
            session_ended,
            intents: HashMap::new(),
            fallback_intent,
            error_handler: ErrorHandler,
        }
    }

    /// インテントハンドラを登録する
    ///
    /// 同じ名前で登録し直した場合は後から登録したものが使われる。
    pub fn with_intent(mut self, name: impl Into<String>, handler: Arc<dyn RequestHandler>) -> Self {
        self.intents.insert(name.into(), handler);
        self
    }

    /// リクエストを処理して応答を返す
    ///
    /// 失敗しない。ハンドラのエラーはエラーハンドラの応答に置き換わる。
    #[tracing::instrument(
        skip_all,
        fields(
            request.id = %envelope.request.request_id,
            request.kind = <&'static str>::from(envelope.request.kind()),
        )
    )]
    pub async fn dispatch(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let result = match self.select(envelope.request.kind()) {
            Ok(handler) => {
                tracing::debug!(handler = handler.name(), "ハンドラを選択しました");
                handler.handle(envelope).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                log_business_event!(
                    event.category = event::category::SKILL,
                    event.action = event::action::REQUEST_HANDLED,
                    event.result = event::result::SUCCESS,
                    "リクエスト処理完了"
                );
                response
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::SKILL,
                    event.action = event::action::REQUEST_HANDLED,
                    event.result = event::result::FAILURE,
                    "リクエスト処理失敗"
                );
                self.error_handler.handle(&e)
            }
        }
    }

    fn select(&self, kind: RequestKind<'_>) -> Result<&Arc<dyn RequestHandler>, SkillError> {
        match kind {
            RequestKind::Launch => Ok(&self.launch),
            RequestKind::Intent { name } => {
                Ok(self.intents.get(name).unwrap_or(&self.fallback_intent))
            }
            RequestKind::SessionEnded { .. } => Ok(&self.session_ended),
            RequestKind::Unsupported { request_type } => {
                Err(SkillError::UnhandledRequest(request_type.to_string()))
            }
        }
    }
}
