use crate::error::{Result, SkillError};
use crate::protocol::directives::{ClearBehavior, Directive, PlayBehavior};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response protocol version
pub const RESPONSE_VERSION: &str = "1.0";

/// Outbound skill response, assembled through chained setters.
///
/// ```
/// use skillserver::{PlayBehavior, SkillResponse};
///
/// let mut response = SkillResponse::new();
/// response
///     .output_speech("Playing your station")
///     .simple_card("Radio", "Now playing")
///     .audio_player_play(PlayBehavior::ReplaceAll, "https://cdn.example.com/live.mp3", "live", None, 0)
///     .end_session(true);
///
/// let json = response.to_json().unwrap();
/// assert!(json.contains("\"AudioPlayer.Play\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,

    /// Omitted from the wire form when empty
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub session_attributes: HashMap<String, serde_json::Value>,

    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    /// `Some(true)` on creation; absent only after an explicit clear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,

    /// Always serialized, `[]` when nothing was appended
    #[serde(default)]
    pub directives: Vec<Directive>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_fulfill_intent: Option<CanFulfillIntent>,
}

/// Speech payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    pub fn plain_text(text: &str) -> Self {
        OutputSpeech::PlainText { text: text.to_string() }
    }

    pub fn ssml(markup: &str) -> Self {
        OutputSpeech::Ssml { ssml: markup.to_string() }
    }
}

/// Companion-app card, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple {
        title: String,
        content: String,
    },
    Standard {
        title: String,
        content: String,
        #[serde(default, skip_serializing_if = "CardImage::is_empty")]
        image: CardImage,
    },
    LinkAccount,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

impl CardImage {
    pub fn is_empty(&self) -> bool {
        self.small_image_url.is_none() && self.large_image_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanFulfillAnswer {
    Yes,
    No,
    Maybe,
}

/// Answer to a can-fulfill-intent request, overall and per slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanFulfillIntent {
    pub can_fulfill: CanFulfillAnswer,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, CanFulfillSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanFulfillSlot {
    pub can_understand: CanFulfillAnswer,
    pub can_fulfill: CanFulfillAnswer,
}

impl CanFulfillIntent {
    pub fn new(answer: CanFulfillAnswer) -> Self {
        Self {
            can_fulfill: answer,
            slots: HashMap::new(),
        }
    }

    /// Attach a per-slot answer, replacing any earlier one for the same slot
    pub fn with_slot(
        mut self,
        slot_name: &str,
        can_understand: CanFulfillAnswer,
        can_fulfill: CanFulfillAnswer,
    ) -> Self {
        self.slots.insert(
            slot_name.to_string(),
            CanFulfillSlot {
                can_understand,
                can_fulfill,
            },
        );
        self
    }
}

impl Default for SkillResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillResponse {
    /// Empty response: version 1.0, session ends, no directives
    pub fn new() -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: HashMap::new(),
            response: ResponseBody {
                output_speech: None,
                card: None,
                reprompt: None,
                should_end_session: Some(true),
                directives: Vec::new(),
                can_fulfill_intent: None,
            },
        }
    }

    pub fn output_speech(&mut self, text: &str) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::plain_text(text));
        self
    }

    pub fn output_speech_ssml(&mut self, ssml: &str) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::ssml(ssml));
        self
    }

    /// Shorthand for [`SkillResponse::simple_card`]
    pub fn card(&mut self, title: &str, content: &str) -> &mut Self {
        self.simple_card(title, content)
    }

    pub fn simple_card(&mut self, title: &str, content: &str) -> &mut Self {
        self.response.card = Some(Card::Simple {
            title: title.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Standard card; each image URL is included only when non-empty
    pub fn standard_card(
        &mut self,
        title: &str,
        content: &str,
        small_image_url: &str,
        large_image_url: &str,
    ) -> &mut Self {
        let non_empty = |url: &str| (!url.is_empty()).then(|| url.to_string());

        self.response.card = Some(Card::Standard {
            title: title.to_string(),
            content: content.to_string(),
            image: CardImage {
                small_image_url: non_empty(small_image_url),
                large_image_url: non_empty(large_image_url),
            },
        });
        self
    }

    pub fn link_account_card(&mut self) -> &mut Self {
        self.response.card = Some(Card::LinkAccount);
        self
    }

    pub fn reprompt(&mut self, text: &str) -> &mut Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::plain_text(text),
        });
        self
    }

    pub fn reprompt_ssml(&mut self, ssml: &str) -> &mut Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(ssml),
        });
        self
    }

    pub fn end_session(&mut self, flag: bool) -> &mut Self {
        self.response.should_end_session = Some(flag);
        self
    }

    /// Drop `shouldEndSession` from the response entirely
    pub fn clear_end_session(&mut self) -> &mut Self {
        self.response.should_end_session = None;
        self
    }

    pub fn session_attribute(&mut self, key: &str, value: serde_json::Value) -> &mut Self {
        self.session_attributes.insert(key.to_string(), value);
        self
    }

    pub fn session_attributes(&mut self, attributes: HashMap<String, serde_json::Value>) -> &mut Self {
        self.session_attributes = attributes;
        self
    }

    pub fn can_fulfill(&mut self, payload: CanFulfillIntent) -> &mut Self {
        self.response.can_fulfill_intent = Some(payload);
        self
    }

    /// Append a directive; execution order follows append order
    pub fn directive(&mut self, directive: Directive) -> &mut Self {
        debug!("Appending {} directive", directive.type_name());
        self.response.directives.push(directive);
        self
    }

    pub fn audio_player_play(
        &mut self,
        behavior: PlayBehavior,
        stream_url: &str,
        token: &str,
        expected_previous_token: Option<&str>,
        offset_ms: i64,
    ) -> &mut Self {
        self.directive(Directive::play(
            behavior,
            stream_url,
            token,
            expected_previous_token,
            offset_ms,
        ))
    }

    pub fn audio_player_stop(&mut self) -> &mut Self {
        self.directive(Directive::AudioPlayerStop)
    }

    pub fn audio_player_clear_queue(&mut self, behavior: ClearBehavior) -> &mut Self {
        self.directive(Directive::clear_queue(behavior))
    }

    pub fn video_app_launch(&mut self, source_url: &str, title: &str, subtitle: &str) -> &mut Self {
        self.directive(Directive::video_launch(source_url, title, subtitle))
    }

    /// Encode the response as compact JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            error!("Failed to serialize skill response: {}", e);
            SkillError::Serialization(e.to_string())
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            error!("Failed to serialize skill response: {}", e);
            SkillError::Serialization(e.to_string())
        })
    }

    /// Encode the response as JSON bytes ready for the transport
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            error!("Failed to serialize skill response: {}", e);
            SkillError::Serialization(e.to_string())
        })
    }

    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| SkillError::Deserialization(e.to_string()))
    }
}
