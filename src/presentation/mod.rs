//! Boundary to whatever draws the match
//!
//! The engine never renders or plays audio itself. It emits
//! [`PresentationRequest`]s and waits for completion reports where a request
//! needs one.

pub mod headless;
pub mod request;

pub use headless::HeadlessPresenter;
pub use request::{CameraPhase, PresentationRequest, SoundId};
