mod common;

use common::synthetic_image::{rover_scene, FRAME_H, FRAME_W};
use rover_perception::image::{ImageView, RgbImage};
use rover_perception::{
    to_vehicle_frame, to_world, MapChannel, Perception, PerceptionError, PerceptionParams,
    VehicleState, WorldPose,
};
use std::f32::consts::PI;

const WORLD_SIZE: usize = 200;

fn scene_state(pose: WorldPose) -> VehicleState {
    let mut state = VehicleState::new(WORLD_SIZE);
    state.set_frame(rover_scene(FRAME_W, FRAME_H, 90), pose);
    state
}

#[test]
fn synthetic_scene_populates_all_outputs() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(100.0, 100.0, 0.0));

    let report = perception
        .perceive(&mut state)
        .expect("synthetic frame should be processed");

    assert!(report.classes.navigable > 0, "expected navigable terrain");
    assert!(report.classes.obstacle > 0, "expected obstacle pixels");
    assert!(report.classes.rock > 0, "expected the rock sample");
    assert_eq!(report.input.width, FRAME_W);
    assert_eq!(report.input.height, FRAME_H);

    // Each class pixel adds exactly one count to its channel.
    let map = &state.worldmap;
    assert_eq!(
        map.channel_total(MapChannel::Navigable),
        report.classes.navigable as u64
    );
    assert_eq!(
        map.channel_total(MapChannel::Obstacle),
        report.classes.obstacle as u64
    );
    assert_eq!(map.channel_total(MapChannel::Rock), report.classes.rock as u64);

    assert_eq!(state.nav_dists.len(), report.classes.navigable);
    assert_eq!(state.nav_angles.len(), report.classes.navigable);
    assert!(state.nav_dists.iter().all(|&d| d >= 0.0));
    assert!(state.nav_angles.iter().all(|&a| a > -PI && a <= PI));
    assert_eq!(report.navigation.points, report.classes.navigable);

    for stage in ["rectify", "segment", "overlay", "vehicle_frame", "world_map", "polar"] {
        let ms = report.timings.stage_ms(stage).expect("stage recorded");
        assert!((0.0..=report.timings.total_ms).contains(&ms), "{stage}: {ms}");
    }
    assert_eq!(report.timings.stage_ms("visits"), None);
}

#[test]
fn overlay_matches_rectified_masks() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(50.0, 50.0, 10.0));
    perception.perceive(&mut state).expect("valid frame");

    let rectified = perception.rectify_frame(&state.frame).expect("valid quads");
    let masks = perception.classify(&rectified);
    let overlay = &state.vision_image;
    assert_eq!((overlay.width(), overlay.height()), (FRAME_W, FRAME_H));
    for y in 0..FRAME_H {
        for x in 0..FRAME_W {
            let px = overlay.get(x, y);
            assert_eq!(px[0], if masks.navigable.is_set(x, y) { 255 } else { 0 });
            assert_eq!(px[1], if masks.rock.is_set(x, y) { 255 } else { 0 });
            assert_eq!(px[2], if masks.obstacle.is_set(x, y) { 255 } else { 0 });
        }
    }
}

#[test]
fn overlay_is_fully_overwritten() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(100.0, 100.0, 0.0));
    state.vision_image = RgbImage::filled(FRAME_W, FRAME_H, [7, 7, 7]);
    perception.perceive(&mut state).expect("valid frame");
    assert!(state
        .vision_image
        .data
        .iter()
        .flatten()
        .all(|&v| v == 0 || v == 255));
}

#[test]
fn repeated_frames_double_the_evidence() {
    let mut perception = Perception::new(PerceptionParams::default());
    let pose = WorldPose::new(120.0, 80.0, 135.0);
    let mut state = scene_state(pose);

    perception.perceive(&mut state).expect("first frame");
    let once = state.worldmap.clone();
    perception.perceive(&mut state).expect("second frame");

    for y in 0..WORLD_SIZE {
        for x in 0..WORLD_SIZE {
            for ch in MapChannel::ALL {
                assert_eq!(state.worldmap.get(x, y, ch), 2 * once.get(x, y, ch));
            }
        }
    }
}

#[test]
fn map_cells_match_direct_projection() {
    let params = PerceptionParams::default();
    let scale = params.scale;
    let mut perception = Perception::new(params);
    let pose = WorldPose::new(30.0, 170.0, 250.0);
    let mut state = scene_state(pose);
    perception.perceive(&mut state).expect("valid frame");

    let rectified = perception.rectify_frame(&state.frame).expect("valid quads");
    let masks = perception.classify(&rectified);
    let cells = to_world(&to_vehicle_frame(&masks.rock), &pose, WORLD_SIZE, scale);
    for (x, y) in cells.iter() {
        assert!(state.worldmap.get(x, y, MapChannel::Rock) > 0);
    }
}

#[test]
fn rover_near_the_edge_accumulates_on_the_border() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(199.5, 100.0, 0.0));
    let report = perception.perceive(&mut state).expect("valid frame");

    // Everything ahead of the rover lies beyond x = 199 and is clamped there.
    let border: u64 = (0..WORLD_SIZE)
        .map(|y| state.worldmap.get(WORLD_SIZE - 1, y, MapChannel::Navigable) as u64)
        .sum();
    assert_eq!(border, report.classes.navigable as u64);
}

#[test]
fn blank_frame_yields_empty_signal_and_untouched_map() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = VehicleState::new(WORLD_SIZE);
    state.nav_dists = vec![1.0, 2.0];
    state.nav_angles = vec![0.1, 0.2];
    // Pure black is outside every class (bounds are exclusive).
    state.set_frame(RgbImage::new(FRAME_W, FRAME_H), WorldPose::new(10.0, 10.0, 0.0));

    let report = perception.perceive(&mut state).expect("valid frame");
    assert_eq!(report.classes.navigable, 0);
    assert_eq!(report.classes.obstacle, 0);
    assert_eq!(report.classes.rock, 0);
    assert!(state.nav_dists.is_empty());
    assert!(state.nav_angles.is_empty());
    assert_eq!(report.navigation.mean_angle_deg, None);
    for ch in MapChannel::ALL {
        assert_eq!(state.worldmap.channel_total(ch), 0);
    }
}

#[test]
fn skipped_frame_keeps_map_state() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(100.0, 100.0, 0.0));
    perception.perceive(&mut state).expect("valid frame");
    let map_before = state.worldmap.clone();
    let nav_before = state.nav_angles.clone();

    state.set_frame(RgbImage::new(0, 0), WorldPose::new(100.0, 100.0, 0.0));
    let err = perception.perceive(&mut state).unwrap_err();
    assert!(matches!(err, PerceptionError::EmptyFrame { .. }));
    assert_eq!(state.worldmap, map_before);
    assert_eq!(state.nav_angles, nav_before);
}

#[test]
fn degenerate_quads_skip_the_frame() {
    let mut params = PerceptionParams::default();
    params.rectify.source_quad = [[0.0, 0.0], [10.0, 0.0], [20.0, 0.0], [30.0, 0.0]];
    let mut perception = Perception::new(params);
    let mut state = scene_state(WorldPose::new(100.0, 100.0, 0.0));
    assert_eq!(
        perception.perceive(&mut state).unwrap_err(),
        PerceptionError::DegenerateQuads
    );
}

#[test]
fn parallel_warp_gives_identical_results() {
    let mut seq = Perception::new(PerceptionParams::default());
    let mut params = PerceptionParams::default();
    params.rectify.parallel = true;
    let mut par = Perception::new(params);

    let pose = WorldPose::new(80.0, 90.0, 300.0);
    let mut a = scene_state(pose);
    let mut b = scene_state(pose);
    seq.perceive(&mut a).expect("valid frame");
    par.perceive(&mut b).expect("valid frame");

    assert_eq!(a.worldmap, b.worldmap);
    assert_eq!(a.vision_image, b.vision_image);
    assert_eq!(a.nav_angles, b.nav_angles);
}

#[test]
fn visit_log_tracks_novel_ground() {
    let mut perception = Perception::new(PerceptionParams::default());
    let mut state = scene_state(WorldPose::new(100.0, 100.0, 0.0)).with_visit_log(10);

    let report = perception.perceive(&mut state).expect("valid frame");
    let fraction = report.novel_fraction.expect("visit log attached");
    assert!((0.0..=1.0).contains(&fraction));
    let log = state.visits.as_ref().expect("visit log attached");
    assert!(log.is_visited(100.0, 100.0));
    assert_eq!(log.visited_count(), 1);
    assert!(report.timings.stage_ms("visits").is_some());
}
