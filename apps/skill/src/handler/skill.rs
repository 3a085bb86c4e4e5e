//! # スキルリクエストハンドラ
//!
//! 音声プラットフォームが POST するリクエストエンベロープを受け取り、
//! ルーターの応答をそのまま JSON で返す。
//!
//! ハンドラ内のエラーは音声の謝罪応答として 200 で返る。
//! HTTP エラーになるのは、JSON が不正な場合（axum の拒否応答）と
//! アプリケーション ID が一致しない場合だけ。

use std::sync::Arc;

use axum::{Json, extract::State};
use koemail_domain::{request::RequestEnvelope, response::ResponseEnvelope};

use crate::{error::ApiError, usecase::SkillRouter};

/// スキルハンドラの State
pub struct SkillState {
    pub router:   SkillRouter,
    /// 設定されている場合、リクエストのアプリケーション ID と照合する
    pub skill_id: Option<String>,
}

/// POST /alexa
#[tracing::instrument(
    skip_all,
    fields(request_id = %envelope.request.request_id, user.id = envelope.user_id())
)]
pub async fn handle_skill_request(
    State(state): State<Arc<SkillState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    if let Some(expected) = state.skill_id.as_deref() {
        let actual = envelope.application_id();
        if actual != Some(expected) {
            tracing::warn!(
                application_id = actual.unwrap_or("-"),
                "アプリケーション ID が一致しないリクエストを拒否しました"
            );
            return Err(ApiError::ApplicationIdMismatch);
        }
    }

    Ok(Json(state.router.dispatch(&envelope).await))
}
