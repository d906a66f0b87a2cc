//! Value Objects - Immutable, identity-less domain primitives

mod speaking_speed;

pub use speaking_speed::SpeakingSpeed;
