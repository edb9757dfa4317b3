use crate::config::TrimConfig;
use crate::edit_mode::{resolve, EditMode, Modifiers};
use crate::error::TrimRejection;
use crate::snapping::{collect_snap_points, find_snap_point};
use crate::trim::{calculate_trim_operation_with, ProposedTrim, TrimEdge, TrimOperation};
use crate::types::Clip;

/// State of one edge drag, from pointer-down to pointer-up. Dropping it cancels the gesture.
#[derive(Debug, Clone)]
pub struct TrimSession {
    clip: Clip,
    edge: TrimEdge,
    snapping: bool,
    playhead: Option<f64>,
    last: Option<TrimOperation>,
}

impl TrimSession {
    /// Start a drag on `edge` of `clip`.
    pub fn begin(clip: &Clip, edge: TrimEdge) -> Self {
        tracing::debug!(clip_id = %clip.id, ?edge, "trim session started");
        Self {
            clip: clip.clone(),
            edge,
            snapping: false,
            playhead: None,
            last: None,
        }
    }

    /// Pull the dragged timeline edge towards clip edges, the origin and the
    /// playhead when it comes within `TrimConfig::snap_threshold`.
    pub fn with_snapping(mut self, playhead: Option<f64>) -> Self {
        self.snapping = true;
        self.playhead = playhead;
        self
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    pub fn edge(&self) -> TrimEdge {
        self.edge
    }

    /// Translate a drag delta in seconds into a proposal for `mode`.
    pub fn propose(&self, drag_delta: f64, mode: EditMode) -> ProposedTrim {
        let clip = &self.clip;
        if mode == EditMode::Slip {
            return ProposedTrim::new(
                clip.start + drag_delta,
                clip.end + drag_delta,
                clip.timeline_position,
            );
        }
        match self.edge {
            TrimEdge::Left => ProposedTrim::new(
                clip.start + drag_delta,
                clip.end,
                clip.timeline_position + drag_delta,
            ),
            TrimEdge::Right => {
                ProposedTrim::new(clip.start, clip.end + drag_delta, clip.timeline_position)
            }
        }
    }

    /// Recompute the operation for the current pointer position.
    ///
    /// On rejection the previously accepted operation is kept.
    pub fn update(
        &mut self,
        drag_delta: f64,
        modifiers: Modifiers,
        clips: &[Clip],
        config: &TrimConfig,
    ) -> Result<&TrimOperation, TrimRejection> {
        let mode = resolve(modifiers);
        let drag_delta = if self.snapping && mode != EditMode::Slip {
            self.snap_delta(drag_delta, clips, config)
        } else {
            drag_delta
        };

        let proposed = self.propose(drag_delta, mode);
        let op = calculate_trim_operation_with(config, &self.clip, self.edge, proposed, clips, mode)?;
        Ok(&*self.last.insert(op))
    }

    pub fn last_operation(&self) -> Option<&TrimOperation> {
        self.last.as_ref()
    }

    /// End the drag, yielding the operation to execute, if any move was accepted.
    pub fn finish(self) -> Option<TrimOperation> {
        tracing::debug!(
            clip_id = %self.clip.id,
            accepted = self.last.is_some(),
            "trim session finished"
        );
        self.last
    }

    fn snap_delta(&self, drag_delta: f64, clips: &[Clip], config: &TrimConfig) -> f64 {
        let edge_at_rest = match self.edge {
            TrimEdge::Left => self.clip.timeline_position,
            TrimEdge::Right => self.clip.timeline_end(),
        };
        let points = collect_snap_points(clips, Some(&self.clip.id), self.playhead);
        let snapped = find_snap_point(edge_at_rest + drag_delta, &points, config.snap_threshold);
        snapped - edge_at_rest
    }
}
