use serde::{Deserialize, Serialize};

/// Auxiliary instruction appended to a response.
///
/// Serialized as an object whose `type` key names the directive kind; the
/// remaining keys depend on the kind. The platform executes directives in
/// the order they appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play")]
    AudioPlayerPlay(AudioPlayerPlay),

    #[serde(rename = "AudioPlayer.Stop")]
    AudioPlayerStop,

    #[serde(rename = "AudioPlayer.ClearQueue")]
    AudioPlayerClearQueue(AudioPlayerClearQueue),

    #[serde(rename = "VideoApp.Launch")]
    VideoAppLaunch(VideoAppLaunch),
}

impl Directive {
    /// The `type` tag this directive serializes under
    pub fn type_name(&self) -> &'static str {
        match self {
            Directive::AudioPlayerPlay(_) => "AudioPlayer.Play",
            Directive::AudioPlayerStop => "AudioPlayer.Stop",
            Directive::AudioPlayerClearQueue(_) => "AudioPlayer.ClearQueue",
            Directive::VideoAppLaunch(_) => "VideoApp.Launch",
        }
    }

    pub fn play(
        behavior: PlayBehavior,
        stream_url: &str,
        token: &str,
        expected_previous_token: Option<&str>,
        offset_ms: i64,
    ) -> Self {
        Directive::AudioPlayerPlay(AudioPlayerPlay {
            play_behavior: behavior,
            audio_item: AudioItem {
                stream: AudioStream {
                    url: stream_url.to_string(),
                    token: token.to_string(),
                    expected_previous_token: expected_previous_token.map(str::to_string),
                    offset_in_milliseconds: offset_ms,
                },
            },
        })
    }

    pub fn clear_queue(behavior: ClearBehavior) -> Self {
        Directive::AudioPlayerClearQueue(AudioPlayerClearQueue {
            clear_behavior: behavior,
        })
    }

    /// Video launch; metadata is attached only when a title or subtitle is given
    pub fn video_launch(source_url: &str, title: &str, subtitle: &str) -> Self {
        let metadata = if title.is_empty() && subtitle.is_empty() {
            None
        } else {
            Some(VideoMetadata {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
            })
        };

        Directive::VideoAppLaunch(VideoAppLaunch {
            video_item: VideoItem {
                source: source_url.to_string(),
                metadata,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    /// Stop current playback and replace the whole queue
    ReplaceAll,
    /// Append to the end of the queue
    Enqueue,
    /// Replace everything queued after the current stream
    ReplaceEnqueued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClearBehavior {
    ClearEnqueued,
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerPlay {
    pub play_behavior: PlayBehavior,
    pub audio_item: AudioItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub stream: AudioStream,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub url: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
    pub offset_in_milliseconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerClearQueue {
    pub clear_behavior: ClearBehavior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAppLaunch {
    pub video_item: VideoItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
}

/// Both fields are always carried together, even when one is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub subtitle: String,
}
