//! Camera control for a captured-scene viewer.
//!
//! A [`CameraRig`] arbitrates between three camera behaviors (orbit around a
//! pivot, free flight, pre-authored animation), blends smoothly over every
//! discontinuous jump, and keeps track of which captured reference viewpoint
//! (a [`FrameSet`] prepared from a photogrammetry `transforms.json`) best
//! matches the live view.
//!
//! The crate does no rendering and owns no event loop; the host ticks the
//! rig once per frame and reads the displayed pose back:
//!
//! ```
//! use viewfinder::{CameraRig, CameraSettings, Command, FrameSet, InputFrame, SceneBounds};
//!
//! let settings = CameraSettings::default();
//! let mut rig = CameraRig::new(&settings, SceneBounds::default(), FrameSet::empty());
//!
//! rig.handle(Command::FrameScene);
//! rig.update(1.0 / 60.0, &InputFrame::idle());
//!
//! let pose = rig.pose();
//! for event in rig.take_events() {
//!     // forward to the UI
//!     let _ = event;
//! }
//! # let _ = pose;
//! ```

pub mod bounds;
pub mod camera;
pub mod dataset;
pub mod events;
pub mod input;
pub mod matcher;
pub mod pose;
pub mod rig;
pub mod settings;
pub mod settle;
pub mod transition;

pub use bounds::SceneBounds;
pub use camera::{
    AnimController, AnimationTrack, CameraController, CameraMode, FlyController, FlyTuning,
    OrbitController, OrbitTuning, TrackError,
};
pub use dataset::{DatasetPayload, FrameSet, PreparedFrame, TransformFrame};
pub use events::ViewerEvent;
pub use input::{Command, InputFrame};
pub use matcher::{nearest_frame, MatchWeights};
pub use pose::Pose;
pub use rig::CameraRig;
pub use settings::CameraSettings;
pub use settle::{MotionSettle, SettleTuning};
pub use transition::Transition;
