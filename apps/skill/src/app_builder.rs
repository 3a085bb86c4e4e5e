//! # スキルサービス アプリケーション構築
//!
//! ハンドラの組み立て（ルーター）と HTTP ルーター構築を担当する。
//! `main.rs` は外部クライアントの初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use koemail_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{SkillState, handle_skill_request, health_check},
    usecase::{
        IntentReflectorHandler,
        LaunchHandler,
        RequestHandler,
        SEND_EMAIL_INTENT,
        SessionEndedHandler,
        SkillRouter,
    },
};

/// スキルのルーターを組み立てる
///
/// 外部サービスに依存するのはメール送信インテントだけなので、
/// そのハンドラのみ外から受け取る。
pub fn build_skill_router(send_email: Arc<dyn RequestHandler>) -> SkillRouter {
    SkillRouter::new(
        Arc::new(LaunchHandler),
        Arc::new(SessionEndedHandler),
        Arc::new(IntentReflectorHandler),
    )
    .with_intent(SEND_EMAIL_INTENT, send_email)
}

/// HTTP ルーターを構築する
pub fn build_app(state: Arc<SkillState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/alexa", post(handle_skill_request))
        .with_state(state)
        // レイヤー順序: 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を採番（クライアント提供値があればそれを使う）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 4. CanonicalLogLineLayer: スパン内でリクエストごとのサマリログを出力
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
