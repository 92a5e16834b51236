use rover_perception::config::{load_config, RuntimeConfig};
use rover_perception::image::io::{load_rgb_image, save_mask, save_rgb_image, write_json_file};
use rover_perception::{Perception, PerceptionReport, VehicleState};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frame = load_rgb_image(&config.input_path)?;
    let mut state = VehicleState::new(config.world_size);
    if let Some(precision) = config.visit_precision {
        state = state.with_visit_log(precision);
    }
    state.set_frame(frame, config.pose);

    let mut perception = Perception::new(config.perception.clone());
    if config.output.wants_bird_view() {
        save_bird_view(&mut perception, &state, &config)?;
    }
    let report = perception.perceive(&mut state).map_err(|e| e.to_string())?;

    print_summary(&report);
    save_outputs(&config, &state, &report)
}

fn save_bird_view(
    perception: &mut Perception,
    state: &VehicleState,
    config: &RuntimeConfig,
) -> Result<(), String> {
    let out = &config.output;
    let rectified = perception
        .rectify_frame(&state.frame)
        .map_err(|e| e.to_string())?;
    if let Some(path) = &out.rectified_png {
        save_rgb_image(&rectified, path)?;
        println!("Rectified frame written to {}", path.display());
    }
    let masks = perception.classify(&rectified);
    let requested = [
        (&out.navigable_mask_png, &masks.navigable),
        (&out.obstacle_mask_png, &masks.obstacle),
        (&out.rock_mask_png, &masks.rock),
    ];
    for (path, mask) in requested {
        if let Some(path) = path {
            save_mask(mask, path)?;
            println!("Mask written to {}", path.display());
        }
    }
    Ok(())
}

fn save_outputs(
    config: &RuntimeConfig,
    state: &VehicleState,
    report: &PerceptionReport,
) -> Result<(), String> {
    let out = &config.output;
    if let Some(path) = &out.overlay_png {
        save_rgb_image(&state.vision_image, path)?;
        println!("Overlay written to {}", path.display());
    }
    if let Some(path) = &out.worldmap_png {
        save_rgb_image(&state.worldmap.to_rgb_image(), path)?;
        println!("World map written to {}", path.display());
    }
    if let Some(path) = &out.report_json {
        write_json_file(path, report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_summary(report: &PerceptionReport) {
    println!("Perception summary");
    println!(
        "  frame: {}x{}  pose: ({:.2}, {:.2}) yaw {:.1} deg",
        report.input.width,
        report.input.height,
        report.input.pose.x,
        report.input.pose.y,
        report.input.pose.yaw_deg
    );
    println!(
        "  pixels: navigable={} obstacle={} rock={}",
        report.classes.navigable, report.classes.obstacle, report.classes.rock
    );
    match report.navigation.mean_angle_deg {
        Some(angle) => println!(
            "  navigation: {} points, mean bearing {:.2} deg",
            report.navigation.points, angle
        ),
        None => println!("  navigation: no navigable terrain"),
    }
    if let Some(f) = report.novel_fraction {
        println!("  unvisited share of navigable points: {:.3}", f);
    }
    for stage in &report.timings.stages {
        println!("  {:<14} {:.3} ms", stage.label, stage.elapsed_ms);
    }
    println!("  total          {:.3} ms", report.timings.total_ms);
}

fn usage() -> String {
    "Usage: perceive_frame <config.json>".to_string()
}
