//! # 通知
//!
//! スキルが送る通知メールのドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`EmailMessage`] | 通知メール | NotificationSender に渡す送信内容 |
//! | [`SendReceipt`] | 送信受付 | メールサービスが返す受付結果（ログ用） |
//! | [`NotificationError`] | 送信エラー | メールサービスへの送信失敗 |
//!
//! ## 設計方針
//!
//! - **宛先は 1 件のみ**: 発話したユーザー本人にだけ送る
//! - **件名・本文は固定**: テンプレートは持たない
//! - **送信失敗は呼び出し元へ伝播**: リトライしない

use thiserror::Error;

use crate::profile::EmailAddress;

/// 通知メールの件名
pub const NOTIFICATION_SUBJECT: &str = "テストメール";

/// 通知メールの本文
pub const NOTIFICATION_BODY: &str = "こんにちは\nAlexaからのテストメールです。";

/// 件名・本文の文字コード
pub const NOTIFICATION_CHARSET: &str = "UTF-8";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// 送信内容の組み立てに失敗
    #[error("メッセージ構築に失敗: {0}")]
    InvalidMessage(String),

    /// メールサービスが送信を拒否した、または通信に失敗した
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// 通知メール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（メールサービスで検証済みであること）
    pub source:    String,
    /// 送信先メールアドレス
    pub to:        EmailAddress,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// 件名・本文の文字コード
    pub charset:   &'static str,
}

impl EmailMessage {
    /// 固定の件名・本文で通知メールを作成する
    pub fn notification(source: impl Into<String>, to: EmailAddress) -> Self {
        Self {
            source: source.into(),
            to,
            subject: NOTIFICATION_SUBJECT.to_string(),
            text_body: NOTIFICATION_BODY.to_string(),
            charset: NOTIFICATION_CHARSET,
        }
    }
}

/// 送信受付
///
/// メールサービスが返す受付 ID。呼び出し元はログに残すだけで、応答には含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn 通知メールは固定の件名と本文を持つ() {
        let to = EmailAddress::new("taro@example.com").unwrap();
        let message = EmailMessage::notification("noreply@koemail.example.com", to.clone());

        assert_eq!(
            message,
            EmailMessage {
                source: "noreply@koemail.example.com".to_string(),
                to,
                subject: "テストメール".to_string(),
                text_body: "こんにちは\nAlexaからのテストメールです。".to_string(),
                charset: "UTF-8",
            }
        );
    }
}
