//! Perception orchestrator: one camera frame in, map evidence and a polar
//! navigation signal out.
//!
//! Modules
//! - [`params`] – colour classes, rectification quads and world scale.
//! - [`state`] – the caller-owned [`VehicleState`] mutated by each step.
//! - `pipeline` – the [`Perception`] step itself.
//! - `workspace` – cached homographies keyed by frame size.
//! - `error` – skip-frame conditions.
//!
//! The step is synchronous and holds no cross-frame state besides the cached
//! matrices; exclusive access to the vehicle state is expressed through the
//! `&mut VehicleState` borrow.

mod error;
pub mod params;
mod pipeline;
pub mod state;
mod workspace;

pub use error::PerceptionError;
pub use params::{ClassRanges, PerceptionParams, RectifyParams, DEFAULT_WORLD_SCALE};
pub use pipeline::{compose_overlay, ClassMasks, Perception};
pub use state::VehicleState;
pub use workspace::{Homographies, RectifierWorkspace};
