//! # KoeMail スキルサービス ライブラリ
//!
//! 音声プラットフォームからのリクエストを受けて応答を返すスキルのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: 依存の組み立てとルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: スキル処理のエラーと HTTP エラーレスポンス
//! - `handler`: HTTP ハンドラ
//! - `usecase`: リクエストの振り分けと各ハンドラのビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

#[cfg(test)]
pub(crate) mod test_utils;
