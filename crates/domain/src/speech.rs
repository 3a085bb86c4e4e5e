//! # スキルの発話文言
//!
//! ハンドラが返す固定文言。ハンドラ側で文字列を直書きせず、ここに集約する。

/// 起動時の挨拶（再プロンプトにも同じ文言を使う）
pub const LAUNCH: &str = "こんにちは。メールして、と言ってみてください。";

/// メール送信完了
pub const EMAIL_SENT: &str = "Eメールを送信しました。";

/// メールアドレス読み取り権限が無い場合の案内
pub const PERMISSION_REQUIRED: &str = "Eメールへのアクセス権が必要です。アレクサ・アプリに、アクセス権を求めるカードを送ったので、許可をお願いします。";

/// エラー時の定型文（再プロンプトにも同じ文言を使う）
pub const APOLOGY: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// 未登録インテントの復唱
pub fn reflect_intent(intent_name: &str) -> String {
    format!("You just triggered {intent_name}")
}
