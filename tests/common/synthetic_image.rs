use rover_perception::image::RgbImage;

pub const FRAME_W: usize = 320;
pub const FRAME_H: usize = 160;

pub const WALL: [u8; 3] = [12, 12, 12];
pub const GROUND: [u8; 3] = [205, 190, 185];
pub const ROCK: [u8; 3] = [180, 150, 20];

/// Generates a camera-like frame: dark walls above `horizon`, bright ground
/// below it and a yellow sample patch in front of the rover.
pub fn rover_scene(width: usize, height: usize, horizon: usize) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(horizon < height, "horizon must lie inside the frame");

    let mut img = RgbImage::filled(width, height, WALL);
    for y in horizon..height {
        for x in 0..width {
            img.set(x, y, GROUND);
        }
    }
    let (cx, cy) = (width / 2, (horizon + height) / 2 - 5);
    for y in cy.saturating_sub(8)..(cy + 8).min(height) {
        for x in cx.saturating_sub(20)..(cx + 20).min(width) {
            img.set(x, y, ROCK);
        }
    }
    img
}
