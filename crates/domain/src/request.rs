//! # リクエストエンベロープ
//!
//! 音声プラットフォームがスキルのエンドポイントに POST する JSON を表現する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`RequestEnvelope`] | リクエストエンベロープ | 1 回の呼び出しで受け取る全体 |
//! | [`RequestKind`] | リクエスト種別 | ハンドラ選択のキー |
//! | [`ApiAccess`] | API アクセス情報 | プロフィール API 呼び出しに使うエンドポイントとトークン |
//!
//! ## 設計方針
//!
//! - **種別は文字列のまま受け取る**: 未知の `type` でもデシリアライズは失敗させず、
//!   [`RequestKind::Unsupported`] としてルーターに判断を委ねる
//! - **識別子は不透明値**: ユーザー ID・セッション ID はログ出力にのみ使う

use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum::IntoStaticStr;

/// リクエストエンベロープ
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub version: String,
    pub session: Option<Session>,
    pub context: Option<Context>,
    pub request: Request,
}

/// セッション情報
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new:         bool,
    pub session_id:  String,
    pub application: Option<Application>,
    pub user:        Option<User>,
}

/// コンテキスト情報
#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
}

/// システムコンテキスト
///
/// プロフィール API などのプラットフォーム API を呼ぶためのエンドポイントと
/// アクセストークンを含む。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    pub application:      Option<Application>,
    pub user:             Option<User>,
    pub api_endpoint:     Option<String>,
    pub api_access_token: Option<ApiAccessToken>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// プラットフォーム API 用のアクセストークン
///
/// # セキュリティ
///
/// Debug 出力ではトークンの値をマスクする。
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiAccessToken(String);

impl std::fmt::Debug for ApiAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiAccessToken").field(&"[REDACTED]").finish()
    }
}

impl ApiAccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// リクエスト本体
///
/// `type` ごとに中身が異なるが、種別の判定は [`Request::kind`] で行う。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    pub request_id:   String,
    pub timestamp:    Option<DateTime<Utc>>,
    pub locale:       Option<String>,
    /// `IntentRequest` のときのみ存在する
    pub intent:       Option<Intent>,
    /// `SessionEndedRequest` のときのみ存在する
    pub reason:       Option<String>,
    /// `SessionEndedRequest` で reason が `ERROR` のときのみ存在する
    pub error:        Option<SessionEndedError>,
}

/// インテント
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name:                String,
    pub confirmation_status: Option<String>,
}

/// セッション終了時にプラットフォームが報告するエラー
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEndedError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message:    Option<String>,
}

/// リクエスト種別
///
/// ルーターがハンドラを選ぶためのキー。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind<'a> {
    /// スキルの起動
    Launch,
    /// インテント（名前付き）
    Intent { name: &'a str },
    /// セッション終了
    SessionEnded { reason: Option<&'a str> },
    /// 上記以外（このスキルでは扱わない）
    Unsupported { request_type: &'a str },
}

impl Request {
    /// リクエスト種別を判定する
    ///
    /// `IntentRequest` なのに `intent` が欠けている場合は
    /// [`RequestKind::Unsupported`] として扱う。
    pub fn kind(&self) -> RequestKind<'_> {
        match self.request_type.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            "IntentRequest" => match &self.intent {
                Some(intent) => RequestKind::Intent {
                    name: intent.name.as_str(),
                },
                None => RequestKind::Unsupported {
                    request_type: &self.request_type,
                },
            },
            "SessionEndedRequest" => RequestKind::SessionEnded {
                reason: self.reason.as_deref(),
            },
            other => RequestKind::Unsupported {
                request_type: other,
            },
        }
    }
}

/// プラットフォーム API へのアクセス情報
///
/// リクエストごとに発行されるため、保持・再利用しない。
#[derive(Debug, Clone)]
pub struct ApiAccess {
    pub endpoint: String,
    pub token:    ApiAccessToken,
}

impl RequestEnvelope {
    /// プラットフォーム API へのアクセス情報を取り出す
    ///
    /// エンドポイントとトークンの両方が揃っている場合のみ `Some` を返す。
    pub fn api_access(&self) -> Option<ApiAccess> {
        let system = &self.context.as_ref()?.system;
        Some(ApiAccess {
            endpoint: system.api_endpoint.clone()?,
            token:    system.api_access_token.clone()?,
        })
    }

    /// スキルのアプリケーション ID を取り出す
    ///
    /// コンテキストを優先し、無ければセッションの値を使う。
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.application.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }

    /// ユーザー ID を取り出す（ログ用）
    pub fn user_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.user.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.user.as_ref()))
            .map(|u| u.user_id.as_str())
    }
}
