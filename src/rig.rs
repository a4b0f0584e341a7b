use crate::bounds::SceneBounds;
use crate::camera::{AnimController, CameraController, CameraMode, FlyController, OrbitController};
use crate::dataset::{FrameSet, PreparedFrame};
use crate::events::ViewerEvent;
use crate::input::{Command, InputFrame};
use crate::matcher::{self, MatchWeights};
use crate::pose::Pose;
use crate::settings::CameraSettings;
use crate::settle::MotionSettle;
use crate::transition::Transition;

/// The camera state machine. Owns the three controllers, arbitrates which
/// one drives the camera, blends over discontinuous jumps, and keeps the
/// nearest captured frame selected while the view rests.
///
/// The host ticks it: queue commands with [`handle`](Self::handle), call
/// [`update`](Self::update) once per frame, render from
/// [`pose`](Self::pose), and drain [`take_events`](Self::take_events).
pub struct CameraRig {
    mode: CameraMode,
    /// Mode to return to when an animation is cancelled or interrupted.
    previous_mode: CameraMode,
    paused: bool,

    displayed: Pose,
    target: Pose,
    home: Pose,

    orbit: OrbitController,
    fly: FlyController,
    anim: Option<AnimController>,

    transition: Transition,
    settle: MotionSettle,

    bounds: SceneBounds,
    frames: FrameSet,
    selected: Option<usize>,
    weights: MatchWeights,

    events: Vec<ViewerEvent>,
}

impl CameraRig {
    pub fn new(settings: &CameraSettings, bounds: SceneBounds, frames: FrameSet) -> Self {
        let start = settings.start_pose();

        let anim = match settings.track.clone().map(AnimController::new) {
            Some(Ok(controller)) => Some(controller),
            Some(Err(error)) => {
                log::warn!("animation track rejected: {}", error);
                None
            }
            None => None,
        };

        let interactive = if bounds.contains(start.position) {
            CameraMode::Fly
        } else {
            CameraMode::Orbit
        };
        let fallback = if anim.is_some() {
            CameraMode::Anim
        } else {
            interactive
        };
        let mode = match settings.mode {
            Some(CameraMode::Anim) if anim.is_none() => {
                log::warn!("camera mode preference ignored: no animation track");
                fallback
            }
            Some(preferred) => preferred,
            None => fallback,
        };

        let mut rig = Self {
            mode,
            previous_mode: interactive,
            paused: false,
            displayed: start,
            target: start,
            home: start,
            orbit: OrbitController::new(settings.orbit),
            fly: FlyController::new(settings.fly),
            anim,
            transition: Transition::completed(settings.transition_speed),
            settle: MotionSettle::new(settings.settle),
            bounds,
            frames,
            selected: None,
            weights: settings.weights,
            events: Vec::new(),
        };

        match rig.mode {
            // Orbit starts pivoting at the configured target point.
            CameraMode::Orbit => rig.orbit.goto_look_at(start.position, settings.target, start.fov),
            CameraMode::Fly => rig.fly.on_enter(&start),
            CameraMode::Anim => {
                if let Some(anim) = &mut rig.anim {
                    anim.on_enter(&start);
                }
            }
        }

        rig.events.push(ViewerEvent::AnimationState {
            available: rig.anim.is_some(),
            duration: rig.anim.as_ref().map_or(0.0, AnimController::duration),
        });
        log::debug!(
            "camera rig starting in {:?} mode with {} transform frames",
            rig.mode,
            rig.frames.len()
        );
        rig
    }

    /// Apply one discrete request. Commands take effect immediately and in
    /// call order; the pose itself moves on the next [`update`](Self::update).
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::SetMode { mode, previous } => self.set_mode(mode, previous),
            Command::Cancel | Command::Interrupt => {
                if self.mode == CameraMode::Anim {
                    self.set_mode(self.previous_mode, None);
                }
            }
            Command::PlayPause => {
                if self.mode == CameraMode::Anim {
                    self.paused = !self.paused;
                } else if self.anim.is_some() {
                    self.set_mode(CameraMode::Anim, None);
                }
            }
            Command::Reset => {
                self.enter_orbit();
                let home = self.home;
                let center = self.bounds.center;
                self.orbit.goto_look_at(home.position, center, home.fov);
                self.begin_transition();
            }
            Command::FrameScene => {
                self.enter_orbit();
                let fov = self.displayed.fov;
                let center = self.bounds.center;
                let eye = center - self.displayed.forward() * self.bounds.framing_distance(fov);
                self.orbit.goto_look_at(eye, center, fov);
                self.begin_transition();
            }
            Command::PickPoint(point) => {
                self.enter_orbit();
                let eye = self.displayed.position;
                let fov = self.displayed.fov;
                self.orbit.goto_look_at(eye, point, fov);
                self.begin_transition();
            }
            Command::ActivateViewpoint(pose) => {
                self.enter_orbit();
                self.orbit.goto_pose(&pose);
                self.begin_transition();
            }
            Command::PrevTransformFrame => self.navigate(false),
            Command::NextTransformFrame => self.navigate(true),
            Command::GotoNearestTransformFrame => {
                let nearest = matcher::nearest_frame(
                    &self.displayed,
                    &self.frames,
                    self.bounds.radius(),
                    &self.weights,
                );
                if let Some(index) = nearest {
                    self.goto_frame(index);
                }
            }
            Command::GotoCurrentTransformFrame => {
                if let Some(index) = self.selected {
                    self.goto_frame(index);
                }
            }
            Command::Scrub(time) => {
                if let Some(anim) = &mut self.anim {
                    anim.scrub(time);
                }
            }
        }
    }

    /// Advance one frame: run the active controller, blend the displayed
    /// pose, and rematch the captured frames once the view has settled.
    pub fn update(&mut self, dt: f32, input: &InputFrame) {
        let effective_dt = if self.mode == CameraMode::Anim && self.paused {
            0.0
        } else {
            dt
        };

        let mut target = self.target;
        if let Some(controller) = self.controller_mut(self.mode) {
            controller.update(effective_dt, input, &mut target);
        }
        self.target = target;

        self.transition.advance(effective_dt);
        self.displayed = self.transition.blend(&self.target);

        if self.mode == CameraMode::Anim {
            if let Some(anim) = &self.anim {
                self.events.push(ViewerEvent::AnimationTime(anim.cursor()));
            }
        }

        let displayed = self.displayed;
        if self.settle.observe(&displayed, dt) {
            let nearest = matcher::nearest_frame(
                &displayed,
                &self.frames,
                self.bounds.radius(),
                &self.weights,
            );
            if let Some(index) = nearest {
                self.select(index);
            }
        }
    }

    pub fn pose(&self) -> Pose {
        self.displayed
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_animation(&self) -> bool {
        self.anim.is_some()
    }

    pub fn animation_duration(&self) -> Option<f32> {
        self.anim.as_ref().map(AnimController::duration)
    }

    pub fn animation_time(&self) -> Option<f32> {
        self.anim.as_ref().map(AnimController::cursor)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_frame(&self) -> Option<&PreparedFrame> {
        self.selected.and_then(|index| self.frames.get(index))
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Drain the events queued since the last call. Meant to run after
    /// [`update`](Self::update), so selections never arrive before the pose
    /// they were computed from.
    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    fn controller_mut(&mut self, mode: CameraMode) -> Option<&mut dyn CameraController> {
        match mode {
            CameraMode::Orbit => Some(&mut self.orbit),
            CameraMode::Fly => Some(&mut self.fly),
            CameraMode::Anim => self
                .anim
                .as_mut()
                .map(|anim| anim as &mut dyn CameraController),
        }
    }

    /// Full mode switch: hand the camera from one controller to the next and
    /// blend over the cut. `remembered` overrides which mode a later cancel
    /// returns to; by default it is the mode being left.
    fn set_mode(&mut self, mode: CameraMode, remembered: Option<CameraMode>) {
        if mode == self.mode {
            return;
        }
        if mode == CameraMode::Anim && self.anim.is_none() {
            log::debug!("ignoring switch to animation mode: no track");
            return;
        }
        let displayed = self.displayed;
        if let Some(controller) = self.controller_mut(self.mode) {
            controller.on_exit(&displayed);
        }
        self.previous_mode = remembered.unwrap_or(self.mode);
        self.mode = mode;
        // Pause never outlives the mode it was set in.
        self.paused = false;
        if let Some(controller) = self.controller_mut(mode) {
            controller.on_enter(&displayed);
        }
        self.begin_transition();
        log::debug!("camera mode -> {:?}", mode);
    }

    /// Switch into orbit without seeding it; callers follow up with a
    /// `goto_*` retarget and a transition.
    fn enter_orbit(&mut self) {
        if self.mode == CameraMode::Orbit {
            return;
        }
        let displayed = self.displayed;
        if let Some(controller) = self.controller_mut(self.mode) {
            controller.on_exit(&displayed);
        }
        self.previous_mode = self.mode;
        self.mode = CameraMode::Orbit;
        self.paused = false;
        log::debug!("camera mode -> Orbit");
    }

    fn begin_transition(&mut self) {
        self.transition.begin(self.displayed);
    }

    fn navigate(&mut self, forward: bool) {
        if self.frames.is_empty() {
            return;
        }
        let count = self.frames.len();
        let index = match (self.selected, forward) {
            (Some(current), true) => (current + 1) % count,
            (Some(current), false) => (current + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        self.goto_frame(index);
    }

    fn goto_frame(&mut self, index: usize) {
        let pose = match self.frames.get(index) {
            Some(frame) => frame.pose,
            None => return,
        };
        self.enter_orbit();
        self.orbit.goto_pose(&pose);
        self.begin_transition();
        self.select(index);
    }

    fn select(&mut self, index: usize) {
        if self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        if let Some(frame) = self.frames.get(index) {
            self.events.push(ViewerEvent::TransformFrameSelected {
                index,
                count: self.frames.len(),
                file_path: frame.file_path.clone(),
                colmap_im_id: frame.colmap_im_id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::AnimationTrack;
    use crate::dataset::{DatasetPayload, TransformFrame};
    use ultraviolet::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn test_bounds() -> SceneBounds {
        SceneBounds {
            center: Vec3::zero(),
            half_extents: Vec3::one() * 2.0,
        }
    }

    fn test_track() -> AnimationTrack {
        AnimationTrack {
            timestamps: vec![0.0, 2.0],
            positions: vec![Vec3::new(0.0, 0.0, 8.0), Vec3::new(8.0, 0.0, 0.0)],
            targets: vec![Vec3::zero(), Vec3::zero()],
            fovs: vec![60.0, 60.0],
        }
    }

    fn raw_frame(file_path: &str, position: Vec3, forward: Vec3) -> TransformFrame {
        TransformFrame {
            file_path: Some(file_path.to_string()),
            colmap_im_id: None,
            transform_matrix: vec![
                vec![1.0, 0.0, -forward.x, position.x],
                vec![0.0, 1.0, -forward.y, position.y],
                vec![0.0, 0.0, -forward.z, position.z],
            ],
        }
    }

    fn test_frames() -> FrameSet {
        let payload = DatasetPayload {
            frames: vec![
                raw_frame("cap_001.png", Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0)),
                raw_frame("cap_002.png", Vec3::new(4.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
                raw_frame("cap_003.png", Vec3::new(0.0, 0.0, -100.0), Vec3::new(0.0, 0.0, -1.0)),
            ],
            ..Default::default()
        };
        FrameSet::prepare(&payload, 60.0)
    }

    fn inside_settings() -> CameraSettings {
        CameraSettings {
            position: Vec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        }
    }

    fn track_settings() -> CameraSettings {
        CameraSettings {
            track: Some(test_track()),
            ..Default::default()
        }
    }

    fn inside_track_settings() -> CameraSettings {
        CameraSettings {
            track: Some(test_track()),
            ..inside_settings()
        }
    }

    fn selections(events: &[ViewerEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|event| match event {
                ViewerEvent::TransformFrameSelected { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initial_mode_follows_track_and_bounds() {
        let rig = CameraRig::new(&track_settings(), test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Anim);

        // Default start (0, 0, 5) is outside the 2-unit bounds.
        let rig = CameraRig::new(&CameraSettings::default(), test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Orbit);

        let rig = CameraRig::new(&inside_settings(), test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Fly);
    }

    #[test]
    fn mode_preference_overrides_when_reachable() {
        let settings = CameraSettings {
            mode: Some(CameraMode::Fly),
            ..track_settings()
        };
        let rig = CameraRig::new(&settings, test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Fly);

        // Asking for animation without a track falls back.
        let settings = CameraSettings {
            mode: Some(CameraMode::Anim),
            ..CameraSettings::default()
        };
        let rig = CameraRig::new(&settings, test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Orbit);
    }

    #[test]
    fn startup_reports_animation_state() {
        let mut rig = CameraRig::new(&track_settings(), test_bounds(), FrameSet::empty());
        let events = rig.take_events();
        assert_eq!(
            events,
            vec![ViewerEvent::AnimationState {
                available: true,
                duration: 2.0
            }]
        );

        let mut rig = CameraRig::new(&CameraSettings::default(), test_bounds(), FrameSet::empty());
        let events = rig.take_events();
        assert_eq!(
            events,
            vec![ViewerEvent::AnimationState {
                available: false,
                duration: 0.0
            }]
        );
    }

    #[test]
    fn invalid_track_degrades_to_no_animation() {
        let settings = CameraSettings {
            track: Some(AnimationTrack {
                timestamps: vec![0.0],
                positions: vec![Vec3::zero()],
                targets: vec![Vec3::zero()],
                fovs: vec![],
            }),
            ..CameraSettings::default()
        };
        let mut rig = CameraRig::new(&settings, test_bounds(), FrameSet::empty());
        assert!(!rig.has_animation());
        assert_eq!(rig.mode(), CameraMode::Orbit);
        rig.handle(Command::SetMode {
            mode: CameraMode::Anim,
            previous: None,
        });
        assert_eq!(rig.mode(), CameraMode::Orbit);
        rig.handle(Command::PlayPause);
        assert_eq!(rig.mode(), CameraMode::Orbit);
        assert!(!rig.is_paused());
    }

    #[test]
    fn cancel_returns_to_the_previous_mode() {
        let mut rig = CameraRig::new(&inside_track_settings(), test_bounds(), FrameSet::empty());
        assert_eq!(rig.mode(), CameraMode::Anim);
        rig.handle(Command::Cancel);
        assert_eq!(rig.mode(), CameraMode::Fly);
        // Cancel outside animation mode does nothing.
        rig.handle(Command::Cancel);
        assert_eq!(rig.mode(), CameraMode::Fly);
    }

    #[test]
    fn interrupt_honors_an_explicit_previous_mode() {
        let mut rig = CameraRig::new(&inside_track_settings(), test_bounds(), FrameSet::empty());
        rig.handle(Command::SetMode {
            mode: CameraMode::Fly,
            previous: None,
        });
        rig.handle(Command::SetMode {
            mode: CameraMode::Anim,
            previous: Some(CameraMode::Orbit),
        });
        assert_eq!(rig.mode(), CameraMode::Anim);
        rig.handle(Command::Interrupt);
        assert_eq!(rig.mode(), CameraMode::Orbit);
    }

    #[test]
    fn play_pause_toggles_and_freezes_the_cursor() {
        let settings = CameraSettings {
            mode: Some(CameraMode::Orbit),
            ..track_settings()
        };
        let mut rig = CameraRig::new(&settings, test_bounds(), FrameSet::empty());

        rig.handle(Command::PlayPause);
        assert_eq!(rig.mode(), CameraMode::Anim);
        assert!(!rig.is_paused());

        for _ in 0..6 {
            rig.update(DT, &InputFrame::idle());
        }
        let running = rig.animation_time().unwrap();
        assert!(running > 0.0);

        rig.handle(Command::PlayPause);
        assert!(rig.is_paused());
        for _ in 0..6 {
            rig.update(DT, &InputFrame::idle());
        }
        assert_eq!(rig.animation_time().unwrap(), running);

        rig.handle(Command::PlayPause);
        assert!(!rig.is_paused());
        rig.update(DT, &InputFrame::idle());
        assert!(rig.animation_time().unwrap() > running);
    }

    #[test]
    fn reentering_animation_clears_the_pause() {
        let mut rig = CameraRig::new(&inside_track_settings(), test_bounds(), FrameSet::empty());
        rig.handle(Command::PlayPause); // pause in anim
        assert!(rig.is_paused());
        rig.handle(Command::Cancel);
        rig.handle(Command::SetMode {
            mode: CameraMode::Anim,
            previous: None,
        });
        assert!(!rig.is_paused());
    }

    #[test]
    fn scrub_clamps_into_the_track() {
        let mut rig = CameraRig::new(&track_settings(), test_bounds(), FrameSet::empty());
        rig.handle(Command::Scrub(1.25));
        assert_eq!(rig.animation_time(), Some(1.25));
        rig.handle(Command::Scrub(99.0));
        assert_eq!(rig.animation_time(), Some(2.0));
        rig.handle(Command::Scrub(-3.0));
        assert_eq!(rig.animation_time(), Some(0.0));
    }

    #[test]
    fn animation_time_is_published_while_animating() {
        let mut rig = CameraRig::new(&track_settings(), test_bounds(), FrameSet::empty());
        rig.take_events();
        rig.update(0.5, &InputFrame::idle());
        let events = rig.take_events();
        assert!(events.contains(&ViewerEvent::AnimationTime(0.5)));
    }

    #[test]
    fn navigation_wraps_and_notifies_in_order() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), test_frames());
        rig.take_events();

        rig.handle(Command::NextTransformFrame);
        assert_eq!(rig.mode(), CameraMode::Orbit);
        rig.handle(Command::NextTransformFrame);
        rig.handle(Command::PrevTransformFrame);
        rig.handle(Command::PrevTransformFrame); // wraps to the end
        assert_eq!(rig.selected_index(), Some(2));

        let events = rig.take_events();
        assert_eq!(selections(&events), vec![0, 1, 0, 2]);
    }

    #[test]
    fn navigation_lands_on_the_frame_pose() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), test_frames());
        rig.handle(Command::NextTransformFrame);
        rig.update(2.0, &InputFrame::idle());
        let frame_pose = rig.frames().get(0).map(|frame| frame.pose);
        assert!(rig.pose().approx_eq(&frame_pose.unwrap(), 1e-3));
    }

    #[test]
    fn navigation_lands_on_a_straight_down_frame() {
        let payload = DatasetPayload {
            frames: vec![raw_frame(
                "nadir_001.png",
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(0.0, -1.0, 0.0),
            )],
            ..Default::default()
        };
        let frames = FrameSet::prepare(&payload, 60.0);
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), frames);
        rig.handle(Command::NextTransformFrame);
        rig.update(2.0, &InputFrame::idle());
        let frame_pose = rig.frames().get(0).map(|frame| frame.pose).unwrap();
        assert!(rig.pose().approx_eq(&frame_pose, 1e-3));
        assert!((rig.pose().forward() - Vec3::new(0.0, -1.0, 0.0)).mag() < 1e-3);
    }

    #[test]
    fn goto_current_retargets_without_a_new_selection() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), test_frames());
        rig.handle(Command::NextTransformFrame);
        rig.take_events();
        // Wander off, then return to the same frame.
        rig.handle(Command::SetMode {
            mode: CameraMode::Fly,
            previous: None,
        });
        let mut input = InputFrame::idle();
        input.movement = Vec3::new(1.0, 0.0, 0.0);
        for _ in 0..30 {
            rig.update(DT, &input);
        }
        rig.handle(Command::GotoCurrentTransformFrame);
        rig.update(2.0, &InputFrame::idle());
        assert_eq!(rig.selected_index(), Some(0));
        assert!(selections(&rig.take_events()).is_empty());
        let frame_pose = rig.frames().get(0).map(|frame| frame.pose);
        assert!(rig.pose().approx_eq(&frame_pose.unwrap(), 1e-3));
    }

    #[test]
    fn goto_nearest_picks_the_closest_frame() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), test_frames());
        rig.take_events();
        // Live pose at (0, 0, 1) looking down -Z sits right in front of
        // cap_001 at (0, 0, 4) looking the same way.
        rig.handle(Command::GotoNearestTransformFrame);
        assert_eq!(rig.selected_index(), Some(0));
        assert_eq!(selections(&rig.take_events()), vec![0]);
    }

    #[test]
    fn empty_dataset_navigation_is_a_noop() {
        let payload = DatasetPayload {
            frames: vec![TransformFrame {
                file_path: Some("bad_001.png".into()),
                colmap_im_id: None,
                transform_matrix: vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]],
            }],
            ..Default::default()
        };
        let frames = FrameSet::prepare(&payload, 60.0);
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), frames);
        rig.take_events();
        let mode = rig.mode();

        rig.handle(Command::NextTransformFrame);
        rig.handle(Command::PrevTransformFrame);
        rig.handle(Command::GotoNearestTransformFrame);
        rig.handle(Command::GotoCurrentTransformFrame);

        assert_eq!(rig.selected_index(), None);
        assert_eq!(rig.mode(), mode);
        assert!(rig.take_events().is_empty());
    }

    #[test]
    fn settled_motion_rematches_exactly_once() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), test_frames());
        rig.take_events();

        let mut input = InputFrame::idle();
        input.movement = Vec3::new(0.0, 0.0, 1.0);
        for _ in 0..30 {
            rig.update(DT, &input);
        }
        // No selection while the camera is still moving.
        assert!(selections(&rig.take_events()).is_empty());

        for _ in 0..30 {
            rig.update(DT, &InputFrame::idle());
        }
        let first = selections(&rig.take_events());
        assert_eq!(first.len(), 1);

        // A second burst that settles near the same spot rematches but the
        // selection is unchanged, so no further event is emitted.
        for _ in 0..5 {
            rig.update(DT, &input);
        }
        for _ in 0..30 {
            rig.update(DT, &InputFrame::idle());
        }
        assert!(selections(&rig.take_events()).is_empty());
        assert_eq!(rig.selected_index(), Some(first[0]));
    }

    #[test]
    fn reset_looks_home_at_the_scene_center() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), FrameSet::empty());
        let mut input = InputFrame::idle();
        input.movement = Vec3::new(1.0, 0.5, 0.0);
        for _ in 0..60 {
            rig.update(DT, &input);
        }
        rig.handle(Command::Reset);
        assert_eq!(rig.mode(), CameraMode::Orbit);
        rig.update(2.0, &InputFrame::idle());
        let expected = Pose::looking_at(Vec3::new(0.0, 0.0, 1.0), Vec3::zero(), 60.0);
        assert!(rig.pose().approx_eq(&expected, 1e-3));
    }

    #[test]
    fn frame_scene_pulls_back_along_the_view_axis() {
        let bounds = test_bounds();
        let mut rig = CameraRig::new(&inside_settings(), bounds, FrameSet::empty());
        rig.handle(Command::FrameScene);
        rig.update(2.0, &InputFrame::idle());
        let pose = rig.pose();
        let distance = bounds.framing_distance(60.0);
        assert!((pose.position - Vec3::new(0.0, 0.0, distance)).mag() < 1e-2);
        assert!((pose.forward() - Vec3::new(0.0, 0.0, -1.0)).mag() < 1e-3);
    }

    #[test]
    fn pick_point_turns_in_place() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), FrameSet::empty());
        rig.handle(Command::PickPoint(Vec3::new(5.0, 0.0, 1.0)));
        rig.update(2.0, &InputFrame::idle());
        let pose = rig.pose();
        assert!((pose.position - Vec3::new(0.0, 0.0, 1.0)).mag() < 1e-3);
        assert!((pose.forward() - Vec3::new(1.0, 0.0, 0.0)).mag() < 1e-3);
    }

    #[test]
    fn transitions_blend_instead_of_snapping() {
        let mut rig = CameraRig::new(&inside_settings(), test_bounds(), FrameSet::empty());
        let start = rig.pose();
        let destination = Pose::looking_at(Vec3::new(20.0, 5.0, -7.0), Vec3::zero(), 45.0);
        rig.handle(Command::ActivateViewpoint(destination));

        rig.update(DT, &InputFrame::idle());
        let early = rig.pose();
        assert!((early.position - start.position).mag() > 1e-3);
        assert!((early.position - destination.position).mag() > 1.0);

        for _ in 0..120 {
            rig.update(DT, &InputFrame::idle());
        }
        assert!(rig.pose().approx_eq(&destination, 1e-3));
    }
}
