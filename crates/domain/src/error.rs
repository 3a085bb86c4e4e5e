//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に発生するエラー。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 外部から受け取った値がドメインの制約を満たさない場合に使用する。
    /// 例: プロフィール API が返したメールアドレスの形式が不正
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
