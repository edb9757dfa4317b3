use crate::config::TrimConfig;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Shortest clip any accepted trim may produce, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.05;

/// Floor for fades and crossfades, in seconds. Applied as a floor, not a truncation.
pub const MIN_TRANSITION_DURATION: f64 = 0.05;

/// Absolute tolerance for every time comparison in the crate, in seconds.
///
/// Two times are equal when `|a - b| <= TIME_EPSILON`.
pub const TIME_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// ClipId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    #[default]
    None,
    FadeIn,
    FadeOut,
    Crossfade,
}

/// The transition a clip has with the next clip on its track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    pub duration: f64,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration: f64) -> Self {
        Self { kind, duration }
    }

    pub fn crossfade(duration: f64) -> Self {
        Self::new(TransitionKind::Crossfade, duration)
    }

    pub fn fade_in(duration: f64) -> Self {
        Self::new(TransitionKind::FadeIn, duration)
    }

    pub fn fade_out(duration: f64) -> Self {
        Self::new(TransitionKind::FadeOut, duration)
    }
}

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

/// One placed media segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub track_index: u32,
    /// Start on the timeline, seconds.
    pub timeline_position: f64,
    /// Source in-point, seconds.
    pub start: f64,
    /// Source out-point, seconds.
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_to_next: Option<Transition>,
}

impl Clip {
    pub fn new(
        id: impl Into<ClipId>,
        track_index: u32,
        timeline_position: f64,
        start: f64,
        end: f64,
    ) -> Self {
        Self {
            id: id.into(),
            track_index,
            timeline_position,
            start,
            end,
            source_duration: None,
            transition_to_next: None,
        }
    }

    pub fn with_source_duration(mut self, source_duration: f64) -> Self {
        self.source_duration = Some(source_duration);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition_to_next = Some(transition);
        self
    }

    /// Played length of the clip, `end - start`.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Where the clip stops on the timeline.
    pub fn timeline_end(&self) -> f64 {
        self.timeline_position + self.length()
    }

    pub fn placement(&self) -> Placement {
        Placement {
            start: self.start,
            end: self.end,
            timeline_position: self.timeline_position,
        }
    }

    /// Check the clip against the data-model invariants.
    pub fn validate(&self, config: &TrimConfig) -> Result<()> {
        let finite = [self.timeline_position, self.start, self.end]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::InvalidClip(format!(
                "{}: times must be finite",
                self.id
            )));
        }
        if self.timeline_position < -config.time_epsilon {
            return Err(CoreError::InvalidClip(format!(
                "{}: timeline position {} is negative",
                self.id, self.timeline_position
            )));
        }
        if self.start < -config.time_epsilon {
            return Err(CoreError::InvalidClip(format!(
                "{}: source start {} is negative",
                self.id, self.start
            )));
        }
        if self.end <= self.start {
            return Err(CoreError::InvalidClip(format!(
                "{}: source end {} must be after start {}",
                self.id, self.end, self.start
            )));
        }
        if let Some(source_duration) = self.source_duration {
            if config.definitely_gt(self.end, source_duration) {
                return Err(CoreError::InvalidClip(format!(
                    "{}: source end {} is past source duration {}",
                    self.id, self.end, source_duration
                )));
            }
        }
        if let Some(transition) = &self.transition_to_next {
            if !(transition.duration.is_finite() && transition.duration >= 0.0) {
                return Err(CoreError::InvalidClip(format!(
                    "{}: transition duration {} is invalid",
                    self.id, transition.duration
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// The three fields a trim may rewrite on a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub start: f64,
    pub end: f64,
    pub timeline_position: f64,
}

// ---------------------------------------------------------------------------
// ClipPatch
// ---------------------------------------------------------------------------

/// Partial clip update. Absent fields are left untouched by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_position: Option<f64>,
}

impl ClipPatch {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.timeline_position.is_none()
    }

    pub fn apply_to(&self, clip: &mut Clip) {
        if let Some(start) = self.start {
            clip.start = start;
        }
        if let Some(end) = self.end {
            clip.end = end;
        }
        if let Some(position) = self.timeline_position {
            clip.timeline_position = position;
        }
    }

    /// The patch that restores `clip` after this one has been applied to it.
    pub fn inverse_for(&self, clip: &Clip) -> ClipPatch {
        ClipPatch {
            start: self.start.map(|_| clip.start),
            end: self.end.map(|_| clip.end),
            timeline_position: self.timeline_position.map(|_| clip.timeline_position),
        }
    }
}

// ---------------------------------------------------------------------------
// TimelineSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSettings {
    pub duration: f64,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            duration: 0.0,
            fps: 30.0,
            width: 1920,
            height: 1080,
        }
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub settings: TimelineSettings,
}

impl Timeline {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            settings: TimelineSettings::default(),
        }
    }

    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }

    /// Clips on `track_index`, ordered by timeline position.
    pub fn clips_on_track(&self, track_index: u32) -> Vec<&Clip> {
        clips_on_track(&self.clips, track_index)
    }

    /// Distinct track indices in ascending order.
    pub fn tracks(&self) -> Vec<u32> {
        let mut tracks: Vec<u32> = self.clips.iter().map(|c| c.track_index).collect();
        tracks.sort_unstable();
        tracks.dedup();
        tracks
    }

    /// Check every clip, id uniqueness, and that same-track clips only overlap
    /// where the earlier one crossfades into the later one.
    pub fn validate(&self, config: &TrimConfig) -> Result<()> {
        let mut seen = HashSet::new();
        for clip in &self.clips {
            clip.validate(config)?;
            if !seen.insert(&clip.id) {
                return Err(CoreError::InvalidClip(format!("duplicate clip id {}", clip.id)));
            }
        }

        for track in self.tracks() {
            let lane = self.clips_on_track(track);
            for pair in lane.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let crossfades = matches!(
                    a.transition_to_next,
                    Some(Transition {
                        kind: TransitionKind::Crossfade,
                        ..
                    })
                );
                if config.definitely_gt(a.timeline_end(), b.timeline_position) && !crossfades {
                    return Err(CoreError::InvalidClip(format!(
                        "clips {} and {} overlap on track {}",
                        a.id, b.id, track
                    )));
                }
            }
        }
        Ok(())
    }

    /// Apply a single partial update.
    pub fn apply_patch(&mut self, id: &ClipId, patch: &ClipPatch) -> Result<()> {
        let clip = self
            .clips
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CoreError::ClipNotFound(id.clone()))?;
        patch.apply_to(clip);
        Ok(())
    }

    /// Apply a batch of updates as one transition: if any id is unknown,
    /// nothing is written.
    pub fn apply_patches(&mut self, patches: &[(ClipId, ClipPatch)]) -> Result<()> {
        if let Some((missing, _)) = patches.iter().find(|(id, _)| self.clip(id).is_none()) {
            return Err(CoreError::ClipNotFound(missing.clone()));
        }
        for (id, patch) in patches {
            self.apply_patch(id, patch)?;
        }
        Ok(())
    }
}

/// Clips on `track_index` from `clips`, ordered by timeline position.
///
/// The sort is stable, so clips at the same position keep their input order.
pub fn clips_on_track(clips: &[Clip], track_index: u32) -> Vec<&Clip> {
    let mut lane: Vec<&Clip> = clips.iter().filter(|c| c.track_index == track_index).collect();
    lane.sort_by(|a, b| a.timeline_position.total_cmp(&b.timeline_position));
    lane
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
