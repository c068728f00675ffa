//! Integration tests for dotview-visualization
//!
//! These tests drive the input router and frame loop against a recording
//! backend, so no window or GPU is needed.

use dotview_core::{IndexSequence, Point3f, PointSet, PrimitiveMode, Result, TransformState};
use dotview_visualization::*;
use nalgebra::{Matrix4, Point3};

/// Backend that records what the frame loop asks of it
#[derive(Default)]
struct RecordingBackend {
    point_count: usize,
    indices: Vec<Vec<u32>>,
    viewports: Vec<Viewport>,
    frames: Vec<TransformState>,
}

impl RenderBackend for RecordingBackend {
    fn upload(&mut self, points: &PointSet, indices: &IndexSequence) -> Result<()> {
        self.point_count = points.len();
        self.indices.push(indices.as_slice().to_vec());
        Ok(())
    }

    fn upload_indices(&mut self, indices: &IndexSequence) -> Result<()> {
        assert!(indices.is_valid_for(self.point_count, indices.mode()));
        assert!(indices.as_slice().iter().all(|&i| (i as usize) < self.point_count));
        self.indices.push(indices.as_slice().to_vec());
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewports.push(viewport);
    }

    fn draw(&mut self, transform: &TransformState) -> Result<()> {
        self.frames.push(*transform);
        Ok(())
    }
}

fn triangle() -> PointSet {
    PointSet::from_points(vec![
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
    ])
}

fn press(key: ViewerKey) -> InputEvent {
    InputEvent::Key { key, state: KeyState::Pressed }
}

/// Route a batch of events the way the window loop does
fn feed(
    events: &[InputEvent],
    router: &InputRouter,
    frame_loop: &mut FrameLoop,
    state: &mut ViewerState,
    backend: &mut RecordingBackend,
) {
    for event in events {
        let outcome = router.route(state, *event);
        frame_loop.apply(outcome, state, backend).unwrap();
    }
}

#[test]
fn test_startup_uploads_points_and_viewport() {
    let config = ViewerConfig::default();
    let state = ViewerState::new(triangle(), &config);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();

    frame_loop.start(&state, &mut backend).unwrap();

    assert_eq!(backend.point_count, 3);
    assert_eq!(backend.indices, vec![vec![0, 1]]);
    assert_eq!(backend.viewports, vec![Viewport::new(800, 800)]);
}

#[test]
fn test_mode_switches_reupload_matching_indices() {
    let config = ViewerConfig::default();
    let mut state = ViewerState::new(triangle(), &config);
    let router = InputRouter::new(config.rotation_step);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.start(&state, &mut backend).unwrap();

    feed(
        &[press(ViewerKey::L), press(ViewerKey::P), press(ViewerKey::L)],
        &router,
        &mut frame_loop,
        &mut state,
        &mut backend,
    );

    assert_eq!(
        backend.indices,
        vec![vec![0, 1], vec![0, 1], vec![0, 1], vec![0, 1]]
    );
    assert_eq!(state.mode(), PrimitiveMode::Lines);
    assert!(state.indices().is_valid_for(3, PrimitiveMode::Lines));
}

#[test]
fn test_degenerate_point_sets_never_crash() {
    for count in 0..2 {
        let points: PointSet = (0..count).map(|i| Point3f::new(i as f32, 0.0, 0.0)).collect();
        let config = ViewerConfig::default();
        let mut state = ViewerState::new(points, &config);
        let router = InputRouter::new(config.rotation_step);
        let mut backend = RecordingBackend::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&state, &mut backend).unwrap();

        feed(
            &[press(ViewerKey::L), press(ViewerKey::P)],
            &router,
            &mut frame_loop,
            &mut state,
            &mut backend,
        );
        assert!(frame_loop.run_frame(&mut state, &mut backend).unwrap());
        assert!(backend.indices.iter().all(|indices| indices.is_empty()));
    }
}

#[test]
fn test_frame_uses_camera_view_and_viewport_projection() {
    let config = ViewerConfig::default();
    let mut state = ViewerState::new(triangle(), &config);
    let router = InputRouter::new(config.rotation_step);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.start(&state, &mut backend).unwrap();

    feed(
        &[InputEvent::Resized { width: 1600, height: 800 }, InputEvent::Scroll { dy: 2.0 }],
        &router,
        &mut frame_loop,
        &mut state,
        &mut backend,
    );
    assert!(frame_loop.run_frame(&mut state, &mut backend).unwrap());

    let frame = backend.frames.last().unwrap();
    let expected_view = state.camera.view_matrix() * Matrix4::new_translation(&dotview_core::VIEW_OFFSET);
    assert_eq!(*frame.view(), expected_view);

    let mut expected = TransformState::new();
    expected.recompute_projection(2.0, &config.projection);
    assert_eq!(frame.projection(), expected.projection());
    assert_eq!(backend.viewports.last(), Some(&Viewport::new(1600, 800)));

    // The camera started at z = 3 and one scroll step moved it closer.
    assert!(state.camera.position.z < 3.0);
}

#[test]
fn test_rotations_persist_across_frames() {
    let config = ViewerConfig::default();
    let mut state = ViewerState::new(triangle(), &config);
    let router = InputRouter::new(config.rotation_step);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.start(&state, &mut backend).unwrap();

    feed(&[press(ViewerKey::Left)], &router, &mut frame_loop, &mut state, &mut backend);
    frame_loop.run_frame(&mut state, &mut backend).unwrap();
    feed(&[press(ViewerKey::Left)], &router, &mut frame_loop, &mut state, &mut backend);
    frame_loop.run_frame(&mut state, &mut backend).unwrap();

    let first = backend.frames[0].model().transform_point(&Point3::new(1.0, 0.0, 0.0));
    let second = backend.frames[1].model().transform_point(&Point3::new(1.0, 0.0, 0.0));
    let angle = |p: Point3<f32>| (-p.z).atan2(p.x);
    approx::assert_relative_eq!(angle(first), config.rotation_step, epsilon = 1e-5);
    approx::assert_relative_eq!(angle(second), 2.0 * config.rotation_step, epsilon = 1e-5);
}

#[test]
fn test_escape_closes_the_loop() {
    let config = ViewerConfig::default();
    let mut state = ViewerState::new(triangle(), &config);
    let router = InputRouter::new(config.rotation_step);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.start(&state, &mut backend).unwrap();

    assert!(frame_loop.run_frame(&mut state, &mut backend).unwrap());
    feed(&[press(ViewerKey::Escape)], &router, &mut frame_loop, &mut state, &mut backend);

    assert_eq!(frame_loop.phase(), FramePhase::Closed);
    assert!(!frame_loop.run_frame(&mut state, &mut backend).unwrap());
    assert_eq!(frame_loop.frame_count(), 1);
    assert_eq!(backend.frames.len(), 1);
}

#[test]
fn test_window_close_request_closes_on_next_frame() {
    let config = ViewerConfig::default();
    let mut state = ViewerState::new(triangle(), &config);
    let mut backend = RecordingBackend::default();
    let mut frame_loop = FrameLoop::new();

    state.request_close();
    assert!(!frame_loop.run_frame(&mut state, &mut backend).unwrap());
    assert!(!frame_loop.is_running());
    assert!(backend.frames.is_empty());
}
