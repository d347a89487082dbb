//! Domain layer.
//!
//! - `dialogue` - Scripted conversation engine (scripts, matcher, classifier)

pub mod dialogue;
