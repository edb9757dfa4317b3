use crate::config::TrimConfig;
use crate::error::{CoreError, Result};
use crate::trim::TrimOperation;
use crate::types::{ClipId, ClipPatch, Timeline};

/// One executed trim: the updates it wrote and the updates that undo them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimBatch {
    description: String,
    forward: Vec<(ClipId, ClipPatch)>,
    inverse: Vec<(ClipId, ClipPatch)>,
}

impl TrimBatch {
    /// Capture `operation` against the current state of `timeline`.
    pub fn capture(operation: &TrimOperation, timeline: &Timeline) -> Result<Self> {
        Self::capture_with(&TrimConfig::default(), operation, timeline)
    }

    pub fn capture_with(
        config: &TrimConfig,
        operation: &TrimOperation,
        timeline: &Timeline,
    ) -> Result<Self> {
        let forward = operation.patches_with(config);
        let mut inverse = Vec::with_capacity(forward.len());
        for (id, patch) in forward.iter().rev() {
            let clip = timeline
                .clip(id)
                .ok_or_else(|| CoreError::ClipNotFound(id.clone()))?;
            inverse.push((id.clone(), patch.inverse_for(clip)));
        }
        Ok(Self {
            description: operation.feedback(),
            forward,
            inverse,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn updates(&self) -> &[(ClipId, ClipPatch)] {
        &self.forward
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn apply(&self, timeline: &mut Timeline) -> Result<()> {
        timeline.apply_patches(&self.forward)
    }

    fn revert(&self, timeline: &mut Timeline) -> Result<()> {
        timeline.apply_patches(&self.inverse)
    }
}

/// Undo/redo history of trims applied to an in-memory `Timeline`.
///
/// Every batch is applied with `Timeline::apply_patches`, so a trim and the
/// neighbours it moved land (or roll back) together.
#[derive(Debug, Clone)]
pub struct TrimHistory {
    undo_stack: Vec<TrimBatch>,
    redo_stack: Vec<TrimBatch>,
    max_size: usize,
    config: TrimConfig,
}

impl TrimHistory {
    pub fn new(max_size: usize) -> Self {
        Self::from_config(&TrimConfig {
            history_limit: max_size,
            ..TrimConfig::default()
        })
    }

    /// History whose batches compare fields with `config`'s tolerance.
    pub fn from_config(config: &TrimConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: config.history_limit.max(1),
            config: config.clone(),
        }
    }

    /// Apply a trim and push it onto the undo stack. Clears redo stack.
    ///
    /// An operation that changes nothing leaves both stacks as they are.
    pub fn apply(&mut self, operation: &TrimOperation, timeline: &mut Timeline) -> Result<()> {
        let batch = TrimBatch::capture_with(&self.config, operation, timeline)?;
        if batch.is_empty() {
            tracing::debug!(clip_id = %operation.clip_id, "trim changes nothing, not recorded");
            return Ok(());
        }
        batch.apply(timeline)?;
        tracing::debug!(
            clip_id = %operation.clip_id,
            updates = batch.forward.len(),
            "trim applied"
        );

        self.redo_stack.clear();
        self.undo_stack.push(batch);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        Ok(())
    }

    /// Undo the last trim.
    pub fn undo(&mut self, timeline: &mut Timeline) -> Result<()> {
        let batch = self.undo_stack.pop().ok_or(CoreError::NothingToUndo)?;
        if let Err(err) = batch.revert(timeline) {
            self.undo_stack.push(batch);
            return Err(err);
        }
        self.redo_stack.push(batch);
        Ok(())
    }

    /// Redo the last undone trim.
    pub fn redo(&mut self, timeline: &mut Timeline) -> Result<()> {
        let batch = self.redo_stack.pop().ok_or(CoreError::NothingToRedo)?;
        if let Err(err) = batch.apply(timeline) {
            self.redo_stack.push(batch);
            return Err(err);
        }
        self.undo_stack.push(batch);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|batch| batch.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|batch| batch.description())
    }
}

impl Default for TrimHistory {
    fn default() -> Self {
        Self::from_config(&TrimConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
