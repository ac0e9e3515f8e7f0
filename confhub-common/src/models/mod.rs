//! Entity models
//!
//! Each submodule holds:
//! - the record struct returned to callers (id assigned by storage)
//! - a create payload for registration
//! - a patch with one optional slot per mutable attribute

pub mod conference;
pub mod speaker;
pub mod validation;

pub use conference::{Conference, ConferencePatch, NewConference};
pub use speaker::{NewSpeaker, Speaker, SpeakerPatch};
