pub mod skill_error;

pub use skill_error::SkillError;

pub type Result<T> = std::result::Result<T, SkillError>;
