//! # スキルサービス エラー定義
//!
//! - [`SkillError`]: ハンドラ内で発生するエラー。エラーハンドラが音声の謝罪応答に変換する
//! - [`ApiError`]: リクエスト自体を受け付けられない場合の HTTP エラー

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use koemail_domain::{DomainError, notification::NotificationError};
use koemail_infra::InfraError;
use koemail_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

/// スキル処理で発生するエラー
///
/// 権限未許可（プロフィール API の 403）はエラーではなく、ここには現れない。
#[derive(Debug, Error)]
pub enum SkillError {
    /// プロフィール API の呼び出しに失敗
    #[error("プロフィールの取得に失敗: {0}")]
    ProfileLookup(#[source] InfraError),

    /// リクエストにプラットフォーム API のエンドポイントまたはトークンが無い
    #[error("プラットフォーム API へのアクセス情報がありません")]
    MissingApiAccess,

    /// プロフィールのメールアドレスが不正
    #[error("メールアドレスが不正です: {0}")]
    InvalidEmail(#[source] DomainError),

    /// 送信用ロールの引き受けに失敗
    #[error("ロール引き受けに失敗: {0}")]
    RoleAssumption(#[source] InfraError),

    /// メール送信に失敗
    #[error("通知の送信に失敗: {0}")]
    Notification(#[from] NotificationError),

    /// どのハンドラも対応しないリクエスト
    #[error("未対応のリクエストです: {0}")]
    UnhandledRequest(String),
}

impl SkillError {
    /// ログ用のエラーカテゴリ
    pub fn category(&self) -> &'static str {
        match self {
            SkillError::ProfileLookup(_)
            | SkillError::RoleAssumption(_)
            | SkillError::Notification(_) => log_error::category::EXTERNAL_SERVICE,
            SkillError::MissingApiAccess
            | SkillError::InvalidEmail(_)
            | SkillError::UnhandledRequest(_) => log_error::category::REQUEST,
        }
    }

    /// ログ用のエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            SkillError::ProfileLookup(_) => log_error::kind::PROFILE_LOOKUP,
            SkillError::MissingApiAccess | SkillError::InvalidEmail(_) => {
                log_error::kind::INVALID_INPUT
            }
            SkillError::RoleAssumption(_) => log_error::kind::ROLE_ASSUMPTION,
            SkillError::Notification(_) => log_error::kind::MAIL_SEND,
            SkillError::UnhandledRequest(_) => log_error::kind::UNHANDLED_REQUEST,
        }
    }
}

/// HTTP レイヤーのエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストのアプリケーション ID が設定済みのスキル ID と一致しない
    #[error("アプリケーション ID が一致しません")]
    ApplicationIdMismatch,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ApplicationIdMismatch => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "application-id-mismatch",
                    "Bad Request",
                    400,
                    "アプリケーション ID が一致しません",
                )),
            )
                .into_response(),
        }
    }
}
