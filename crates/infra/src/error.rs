//! # インフラ層エラー定義
//!
//! 外部サービスとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From` 実装や convenience constructor でエラーを生成すると、
//! その時点のスパン情報（どのリクエストのどの処理か）が自動的に記録される。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::ServiceError { status: 403, .. } => { /* 権限なし */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 外部サービスが成功以外のステータスを返した
    ///
    /// ステータスコードの解釈（403 を「未許可」とみなす等）はユースケース層が行う。
    #[error("サービスエラー（status={status}）: {message}")]
    ServiceError {
        /// HTTP ステータスコード
        status:  u16,
        /// レスポンスボディ
        message: String,
    },

    /// HTTP 通信エラー
    ///
    /// 接続失敗、タイムアウトなど。
    #[error("HTTP 通信エラー: {0}")]
    Http(#[source] reqwest::Error),

    /// レスポンスの形式が想定と異なる
    #[error("不正なレスポンス: {0}")]
    InvalidResponse(String),

    /// ロール引き受けの失敗
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("ロール引き受けに失敗: {0}")]
    RoleAssumption(String),

    /// ロール引き受けは成功したが認証情報が含まれていない
    #[error("ロール引き受けの応答に認証情報が含まれていません")]
    MissingCredentials,
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ServiceError の場合、ステータスコードを返す
    pub fn service_status(&self) -> Option<u16> {
        match &self.kind {
            InfraErrorKind::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }

    // ===== Convenience constructors =====

    /// サービスエラーを生成する
    pub fn service_error(status: u16, message: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::ServiceError {
            status,
            message: message.into(),
        })
    }

    /// 不正なレスポンスエラーを生成する
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::InvalidResponse(msg.into()))
    }

    /// ロール引き受けエラーを生成する
    pub fn role_assumption(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::RoleAssumption(msg.into()))
    }

    /// 認証情報欠落エラーを生成する
    pub fn missing_credentials() -> Self {
        Self::capture(InfraErrorKind::MissingCredentials)
    }

    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self::capture(InfraErrorKind::Http(source))
    }
}
