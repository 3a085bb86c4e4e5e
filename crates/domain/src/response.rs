//! # レスポンスエンベロープ
//!
//! スキルが音声プラットフォームに返す JSON と、それを組み立てるビルダー。
//!
//! ## 設計方針
//!
//! - **1 リクエスト 1 レスポンス**: [`ResponseBuilder`] は値で受け渡し、
//!   `build()` で消費される
//! - **未指定は送らない**: `shouldEndSession` などの任意項目は `None` のとき
//!   JSON に含めない（プラットフォームの既定動作に任せる）

use serde::{Deserialize, Serialize};

const RESPONSE_VERSION: &str = "1.0";

/// レスポンスエンベロープ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version:  String,
    pub response: ResponseBody,
}

/// レスポンス本体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech:      Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt:           Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card:               Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// 発話内容（SSML）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    fn from_text(text: &str) -> Self {
        Self::Ssml {
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }

    /// `<speak>` タグを除いた発話テキストを返す
    ///
    /// SSML のエスケープ（`&amp;` など）は戻さずにそのまま返す。
    pub fn text(&self) -> &str {
        match self {
            Self::Ssml { ssml } => ssml
                .strip_prefix("<speak>")
                .and_then(|s| s.strip_suffix("</speak>"))
                .unwrap_or(ssml),
        }
    }
}

/// SSML の本文として安全な文字列にする
///
/// 発話には固定文言のほか、インテント名などプラットフォーム由来の値も入る。
fn escape_ssml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 再プロンプト
///
/// ユーザーが応答しなかったときに再度話す内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// アプリに表示するカード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    /// 権限リクエストカード
    ///
    /// ユーザーに対し、音声チャネルの外（スマホアプリ）で権限の許可を求める。
    AskForPermissionsConsent { permissions: Vec<String> },
}

impl ResponseEnvelope {
    /// 発話テキスト（`<speak>` タグなし）
    pub fn spoken_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::text)
    }

    /// 再プロンプトのテキスト（`<speak>` タグなし）
    pub fn reprompt_text(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|r| r.output_speech.text())
    }

    pub fn should_end_session(&self) -> Option<bool> {
        self.response.should_end_session
    }

    /// 権限リクエストカードが求めるスコープ
    ///
    /// カードが無い場合は空スライスを返す。
    pub fn permission_scopes(&self) -> &[String] {
        match &self.response.card {
            Some(Card::AskForPermissionsConsent { permissions }) => permissions,
            None => &[],
        }
    }
}

/// レスポンスビルダー
///
/// ```
/// use koemail_domain::response::ResponseBuilder;
///
/// let response = ResponseBuilder::new()
///     .speak("こんにちは")
///     .with_should_end_session(true)
///     .build();
///
/// assert_eq!(response.spoken_text(), Some("こんにちは"));
/// assert_eq!(response.should_end_session(), Some(true));
/// ```
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    body: ResponseBody,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 発話内容を設定する
    pub fn speak(mut self, text: &str) -> Self {
        self.body.output_speech = Some(OutputSpeech::from_text(text));
        self
    }

    /// 再プロンプトを設定する
    pub fn reprompt(mut self, text: &str) -> Self {
        self.body.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::from_text(text),
        });
        self
    }

    pub fn with_should_end_session(mut self, should_end_session: bool) -> Self {
        self.body.should_end_session = Some(should_end_session);
        self
    }

    /// 権限リクエストカードを添付する
    pub fn with_ask_for_permissions_consent_card(mut self, permissions: &[&str]) -> Self {
        self.body.card = Some(Card::AskForPermissionsConsent {
            permissions: permissions.iter().map(|p| (*p).to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version:  RESPONSE_VERSION.to_string(),
            response: self.body,
        }
    }
}
