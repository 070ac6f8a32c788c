#![forbid(unsafe_code)]

pub mod app_services;
pub mod capture;
pub mod detector;
pub mod error;
pub mod gesture_loop;
pub mod messages;
pub mod popup;
pub mod selection;

pub use handcards_core::Clock;

pub use app_services::AppServices;
pub use capture::CaptureService;
pub use detector::{
    DetectorConfig, FrameSource, HandDetector, LandmarkScript, ScriptedDetector, ScriptedFrame,
    ScriptedFrameSource, VideoFrame,
};
pub use error::{AppServicesError, CaptureError, DetectorError};
pub use gesture_loop::{FrameOutcome, GestureLoop, StopHandle};
pub use messages::{ExtensionMessage, SelectionReply};
pub use popup::{CardPosition, PopupView};
pub use selection::SelectionTracker;
