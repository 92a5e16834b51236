/// Reasons a frame is skipped. The world map is never touched when
/// [`Perception::perceive`](super::Perception::perceive) fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PerceptionError {
    #[error("camera frame is empty ({width}x{height})")]
    EmptyFrame { width: usize, height: usize },
    #[error("perspective quads do not define a valid homography")]
    DegenerateQuads,
    #[error("world scale must be positive and finite, got {0}")]
    InvalidScale(f32),
    #[error("world map has zero size")]
    EmptyWorldMap,
}
