//! # ヘルスチェックハンドラ
//!
//! `/health` は常に `"healthy"` を返す。外部サービスへの疎通は確認しない。

use axum::Json;
use koemail_shared::HealthResponse;

/// スキルサービスのヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
