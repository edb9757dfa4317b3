//! Trimline core - timeline clip-editing engine
//!
//! Computes how trimming a clip affects it and its neighbours, and derives the
//! per-clip metadata a compositor needs:
//! - Edit mode resolution from modifier keys (normal, ripple, roll, slip)
//! - Trim calculation and execution through an update callback
//! - Fade, crossfade and effective-start metadata, plus opacity curves
//! - Drag sessions with snapping, and an undo/redo history for in-memory timelines
//!
//! All time values are seconds as `f64`, compared with the fixed tolerance
//! [`TIME_EPSILON`].

pub mod config;
pub mod edit_mode;
pub mod error;
pub mod executor;
pub mod history;
pub mod opacity;
pub mod session;
pub mod snapping;
pub mod transitions;
pub mod trim;
pub mod types;

pub use config::TrimConfig;
pub use edit_mode::{resolve, EditMode, Modifiers};
pub use error::{CoreError, Result, TrimRejection};
pub use executor::{execute_trim_operation, execute_trim_operation_with};
pub use history::{TrimBatch, TrimHistory};
pub use opacity::{compute_opacity, opacity_at};
pub use session::TrimSession;
pub use transitions::{compute_clip_metas, compute_clip_metas_with, ClipMeta};
pub use trim::{
    calculate_trim_operation, calculate_trim_operation_with, AffectedClip, ProposedTrim,
    TrimEdge, TrimOperation,
};
pub use types::{
    Clip, ClipId, ClipPatch, Placement, Timeline, TimelineSettings, Transition, TransitionKind,
    MIN_CLIP_DURATION, MIN_TRANSITION_DURATION, TIME_EPSILON,
};
