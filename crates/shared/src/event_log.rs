//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! 「発話 → ハンドラ選択 → メール送信」の流れを `jq` で追えるよう、
//! ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const SKILL: &str = "skill";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // スキル
        pub const REQUEST_HANDLED: &str = "skill.request_handled";
        pub const PERMISSION_REQUESTED: &str = "skill.permission_requested";

        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（プロフィール API、STS、SES）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// リクエストの内容に起因するもの
        pub const REQUEST: &str = "request";
    }

    /// エラー種別
    pub mod kind {
        pub const PROFILE_LOOKUP: &str = "profile_lookup";
        pub const ROLE_ASSUMPTION: &str = "role_assumption";
        pub const MAIL_SEND: &str = "mail_send";
        pub const UNHANDLED_REQUEST: &str = "unhandled_request";
        pub const INVALID_INPUT: &str = "invalid_input";
    }
}
