use rover_perception::image::RgbImage;
use rover_perception::{MapChannel, Perception, PerceptionParams, VehicleState, WorldPose};

fn main() {
    env_logger::init();

    // Demo: a synthetic 320×160 frame with dark walls above the horizon,
    // bright ground below it and a yellow sample in front of the rover.
    let (w, h) = (320usize, 160usize);
    let mut frame = RgbImage::filled(w, h, [12, 12, 12]);
    for y in 90..h {
        for x in 0..w {
            frame.set(x, y, [205, 190, 185]);
        }
    }
    for y in 112..124 {
        for x in 150..170 {
            frame.set(x, y, [180, 150, 20]);
        }
    }

    let mut state = VehicleState::new(200).with_visit_log(10);
    state.set_frame(frame, WorldPose::new(100.0, 100.0, 30.0));

    let mut perception = Perception::new(PerceptionParams::default());
    match perception.perceive(&mut state) {
        Ok(report) => {
            println!(
                "navigable={} obstacle={} rock={} latency_ms={:.3}",
                report.classes.navigable,
                report.classes.obstacle,
                report.classes.rock,
                report.timings.total_ms
            );
            if let Some(angle) = report.navigation.mean_angle_deg {
                println!("mean nav bearing: {angle:.2} deg");
            }
            println!(
                "map cells observed: navigable={} obstacle={} rock={}",
                state.worldmap.observed_cells(MapChannel::Navigable),
                state.worldmap.observed_cells(MapChannel::Obstacle),
                state.worldmap.observed_cells(MapChannel::Rock)
            );
        }
        Err(err) => eprintln!("frame skipped: {err}"),
    }
}
