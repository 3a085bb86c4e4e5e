//! # ユーザープロフィール
//!
//! 音声プラットフォームのプロフィール API から取得する値と、
//! その取得に必要な権限スコープを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 / 定数 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`EmailAddress`] | メールアドレス | 通知メールの宛先 |
//! | [`EMAIL_READ_PERMISSION`] | メール読み取り権限 | 権限リクエストカードに載せるスコープ |

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// メールアドレス読み取り権限のスコープ
///
/// ユーザーがこの権限を許可していない場合、プロフィール API は 403 を返す。
pub const EMAIL_READ_PERMISSION: &str = "alexa::profile:email:read";

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let value = value.trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスが空です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn 正しい形式のメールアドレスを受け付ける() {
        let email = EmailAddress::new("taro@example.com").unwrap();
        assert_eq!(email.as_str(), "taro@example.com");
    }

    #[test]
    fn 前後の空白は取り除かれる() {
        let email = EmailAddress::new("  taro@example.com\n").unwrap();
        assert_eq!(email.to_string(), "taro@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("taro.example.com")]
    #[case("@example.com")]
    #[case("taro@")]
    fn 不正な形式はバリデーションエラーになる(#[case] input: &str) {
        let result = EmailAddress::new(input);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn 長すぎるメールアドレスはバリデーションエラーになる() {
        let input = format!("{}@example.com", "a".repeat(250));
        assert!(EmailAddress::new(input).is_err());
    }
}
