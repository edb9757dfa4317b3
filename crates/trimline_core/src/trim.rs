use crate::config::TrimConfig;
use crate::edit_mode::EditMode;
use crate::error::TrimRejection;
use crate::types::{clips_on_track, Clip, ClipId, Placement};
use serde::{Deserialize, Serialize};

/// Which edge of the clip is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimEdge {
    Left,
    Right,
}

/// Where the caller wants the clip to end up, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProposedTrim {
    pub start: f64,
    pub end: f64,
    pub position: f64,
}

impl ProposedTrim {
    pub fn new(start: f64, end: f64, position: f64) -> Self {
        Self {
            start,
            end,
            position,
        }
    }
}

/// A clip other than the trimmed one that moves as a side effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedClip {
    pub clip_id: ClipId,
    /// Set by ripple: the clip's new timeline position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<f64>,
    /// Set by roll: the clip's new source in-point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_start: Option<f64>,
}

impl AffectedClip {
    fn moved(clip_id: ClipId, new_position: f64) -> Self {
        Self {
            clip_id,
            new_position: Some(new_position),
            new_start: None,
        }
    }

    fn restarted(clip_id: ClipId, new_start: f64) -> Self {
        Self {
            clip_id,
            new_position: None,
            new_start: Some(new_start),
        }
    }
}

/// The full effect of one trim, ready for `execute_trim_operation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimOperation {
    /// The mode actually applied. Roll without a neighbour reports `Normal`.
    pub edit_mode: EditMode,
    pub clip_id: ClipId,
    pub edge: TrimEdge,
    pub new_start: f64,
    pub new_end: f64,
    pub new_position: f64,
    pub affected_clips: Vec<AffectedClip>,
    /// The trimmed clip before the operation.
    pub previous: Placement,
}

impl TrimOperation {
    pub fn new_duration(&self) -> f64 {
        self.new_end - self.new_start
    }

    /// Signed change in the trimmed clip's length.
    pub fn duration_delta(&self) -> f64 {
        self.new_duration() - (self.previous.end - self.previous.start)
    }

    /// Short user-facing summary, e.g. `"Ripple trim +5.0s"`.
    pub fn feedback(&self) -> String {
        match self.edit_mode {
            EditMode::Normal => format!("Trimmed {}", signed_seconds(self.duration_delta())),
            EditMode::Ripple => format!("Ripple trim {}", signed_seconds(self.duration_delta())),
            EditMode::Roll => format!("Roll trim {}", signed_seconds(self.duration_delta())),
            EditMode::Slip => format!(
                "Slipped {}",
                signed_seconds(self.new_start - self.previous.start)
            ),
        }
    }
}

fn signed_seconds(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:+.1}s", value)
}

/// Compute a trim with the default tolerances.
///
/// `clips` is the full clip list of the project; only clips on the trimmed
/// clip's track are considered.
pub fn calculate_trim_operation(
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
    clips: &[Clip],
    mode: EditMode,
) -> Result<TrimOperation, TrimRejection> {
    calculate_trim_operation_with(&TrimConfig::default(), clip, edge, proposed, clips, mode)
}

pub fn calculate_trim_operation_with(
    config: &TrimConfig,
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
    clips: &[Clip],
    mode: EditMode,
) -> Result<TrimOperation, TrimRejection> {
    let result = match mode {
        EditMode::Slip => slip(config, clip, edge, proposed),
        EditMode::Normal => normal(config, clip, edge, proposed),
        EditMode::Ripple => ripple(config, clip, edge, proposed, clips),
        EditMode::Roll => roll(config, clip, edge, proposed, clips),
    };

    match &result {
        Ok(op) => tracing::trace!(
            clip_id = %clip.id,
            mode = %op.edit_mode,
            new_start = op.new_start,
            new_end = op.new_end,
            new_position = op.new_position,
            affected = op.affected_clips.len(),
            "trim accepted"
        ),
        Err(rejection) => tracing::trace!(clip_id = %clip.id, %mode, %rejection, "trim rejected"),
    }
    result
}

fn normal(
    config: &TrimConfig,
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
) -> Result<TrimOperation, TrimRejection> {
    check_window(config, proposed.start, proposed.end, clip.source_duration)?;
    if !proposed.position.is_finite() {
        return Err(TrimRejection::BeyondSourceBounds {
            start: proposed.start,
            end: proposed.end,
            source_duration: clip.source_duration,
        });
    }
    Ok(TrimOperation {
        edit_mode: EditMode::Normal,
        clip_id: clip.id.clone(),
        edge,
        new_start: proposed.start,
        new_end: proposed.end,
        new_position: proposed.position.max(0.0),
        affected_clips: Vec::new(),
        previous: clip.placement(),
    })
}

fn ripple(
    config: &TrimConfig,
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
    clips: &[Clip],
) -> Result<TrimOperation, TrimRejection> {
    let mut op = normal(config, clip, edge, proposed)?;
    op.edit_mode = EditMode::Ripple;

    let delta = op.duration_delta();
    let original_end = clip.timeline_end();
    op.affected_clips = clips_on_track(clips, clip.track_index)
        .into_iter()
        .filter(|c| c.id != clip.id && config.approx_ge(c.timeline_position, original_end))
        .map(|c| AffectedClip::moved(c.id.clone(), c.timeline_position + delta))
        .collect();
    Ok(op)
}

fn roll(
    config: &TrimConfig,
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
    clips: &[Clip],
) -> Result<TrimOperation, TrimRejection> {
    let mut op = normal(config, clip, edge, proposed)?;

    let original_end = clip.timeline_end();
    let neighbour = clips_on_track(clips, clip.track_index)
        .into_iter()
        .find(|c| c.id != clip.id && config.approx_eq(c.timeline_position, original_end));

    let Some(neighbour) = neighbour else {
        tracing::debug!(clip_id = %clip.id, "roll has no contiguous neighbour, trimming as normal");
        return Ok(op);
    };

    let new_start = neighbour.start + op.duration_delta();
    check_window(config, new_start, neighbour.end, neighbour.source_duration)?;

    op.edit_mode = EditMode::Roll;
    op.affected_clips = vec![AffectedClip::restarted(neighbour.id.clone(), new_start)];
    Ok(op)
}

fn slip(
    config: &TrimConfig,
    clip: &Clip,
    edge: TrimEdge,
    proposed: ProposedTrim,
) -> Result<TrimOperation, TrimRejection> {
    let length = clip.length();
    let delta = match edge {
        TrimEdge::Left => proposed.start - clip.start,
        TrimEdge::Right => proposed.end - clip.end,
    };

    let mut new_start = clip.start + delta;
    let mut new_end = clip.end + delta;
    // Clamp the window as a whole so its length never changes.
    if let Some(source_duration) = clip.source_duration {
        if new_end > source_duration {
            new_end = source_duration;
            new_start = source_duration - length;
        }
    }
    if new_start < 0.0 {
        new_start = 0.0;
        new_end = length;
    }
    check_window(config, new_start, new_end, clip.source_duration)?;

    Ok(TrimOperation {
        edit_mode: EditMode::Slip,
        clip_id: clip.id.clone(),
        edge,
        new_start,
        new_end,
        new_position: clip.timeline_position,
        affected_clips: Vec::new(),
        previous: clip.placement(),
    })
}

/// Check a source window against the minimum duration and the source bounds.
fn check_window(
    config: &TrimConfig,
    start: f64,
    end: f64,
    source_duration: Option<f64>,
) -> Result<(), TrimRejection> {
    let out_of_bounds = TrimRejection::BeyondSourceBounds {
        start,
        end,
        source_duration,
    };
    if !(start.is_finite() && end.is_finite()) {
        return Err(out_of_bounds);
    }

    let duration = end - start;
    if !config.approx_ge(duration, config.min_clip_duration) {
        return Err(TrimRejection::DurationTooShort {
            duration,
            min: config.min_clip_duration,
        });
    }

    if start < -config.time_epsilon {
        return Err(out_of_bounds);
    }
    if let Some(source_duration) = source_duration {
        if config.definitely_gt(end, source_duration) {
            return Err(out_of_bounds);
        }
    }
    Ok(())
}
