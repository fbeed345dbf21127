pub mod request_types;
pub mod response_types;
pub mod directives;

pub use request_types::{
    Application, Context, ContextApplication, ContextUser, Device, Intent, Permissions,
    RequestBody, RequestType, Session, SessionUser, SkillRequest, Slot, SystemContext,
};
pub use response_types::{
    CanFulfillAnswer, CanFulfillIntent, CanFulfillSlot, Card, CardImage, OutputSpeech, Reprompt,
    ResponseBody, SkillResponse, RESPONSE_VERSION,
};
pub use directives::{
    AudioItem, AudioPlayerClearQueue, AudioPlayerPlay, AudioStream, ClearBehavior, Directive,
    PlayBehavior, VideoAppLaunch, VideoItem, VideoMetadata,
};
