/// Notifications for the host application, queued during command handling
/// and ticking and drained afterwards with
/// [`CameraRig::take_events`](crate::rig::CameraRig::take_events).
///
/// The displayed pose itself is not an event; the host reads it every frame
/// via [`CameraRig::pose`](crate::rig::CameraRig::pose).
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// Emitted once at startup so timeline UI can show or hide itself.
    AnimationState { available: bool, duration: f32 },
    /// Current animation cursor in seconds, emitted every tick spent in
    /// animation mode.
    AnimationTime(f32),
    /// The selected captured frame changed, by navigation or by an automatic
    /// nearest-frame match.
    TransformFrameSelected {
        index: usize,
        count: usize,
        file_path: Option<String>,
        colmap_im_id: Option<u64>,
    },
}
