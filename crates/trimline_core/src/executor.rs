use crate::config::TrimConfig;
use crate::edit_mode::EditMode;
use crate::trim::TrimOperation;
use crate::types::{ClipId, ClipPatch};

impl TrimOperation {
    /// The clip updates this operation stands for, primary clip first.
    ///
    /// Normal and ripple write all three fields of the primary clip. Roll and
    /// slip write only the fields that changed, and skip the primary clip
    /// entirely when nothing did. Affected clips carry only their moved field.
    pub fn patches(&self) -> Vec<(ClipId, ClipPatch)> {
        self.patches_with(&TrimConfig::default())
    }

    pub fn patches_with(&self, config: &TrimConfig) -> Vec<(ClipId, ClipPatch)> {
        let mut patches = Vec::with_capacity(1 + self.affected_clips.len());

        let primary = match self.edit_mode {
            EditMode::Normal | EditMode::Ripple => ClipPatch {
                start: Some(self.new_start),
                end: Some(self.new_end),
                timeline_position: Some(self.new_position),
            },
            EditMode::Roll | EditMode::Slip => {
                let changed = |old: f64, new: f64| (!config.approx_eq(old, new)).then_some(new);
                ClipPatch {
                    start: changed(self.previous.start, self.new_start),
                    end: changed(self.previous.end, self.new_end),
                    timeline_position: changed(self.previous.timeline_position, self.new_position),
                }
            }
        };
        if !primary.is_empty() {
            patches.push((self.clip_id.clone(), primary));
        }

        for affected in &self.affected_clips {
            let patch = ClipPatch {
                start: affected.new_start,
                end: None,
                timeline_position: affected.new_position,
            };
            patches.push((affected.clip_id.clone(), patch));
        }
        patches
    }
}

/// Emit every update of `operation` through `update_clip`, primary clip first.
///
/// Performs no validation: only pass operations produced by
/// `calculate_trim_operation`. The calls belong to one gesture and should be
/// committed by the store as a single transition.
pub fn execute_trim_operation<F>(operation: &TrimOperation, update_clip: F)
where
    F: FnMut(&ClipId, ClipPatch),
{
    execute_trim_operation_with(&TrimConfig::default(), operation, update_clip)
}

/// Like `execute_trim_operation`, comparing fields with the tolerance of the
/// config the operation was calculated under.
pub fn execute_trim_operation_with<F>(
    config: &TrimConfig,
    operation: &TrimOperation,
    mut update_clip: F,
) where
    F: FnMut(&ClipId, ClipPatch),
{
    let patches = operation.patches_with(config);
    tracing::debug!(
        clip_id = %operation.clip_id,
        mode = %operation.edit_mode,
        updates = patches.len(),
        "executing trim"
    );
    for (id, patch) in &patches {
        update_clip(id, *patch);
    }
}
