use crate::config::TrimConfig;
use crate::types::{clips_on_track, Clip, ClipId, TransitionKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived compositing data for one clip. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipMeta {
    /// `end - start` of the clip.
    pub length: f64,
    /// Nominal start on the timeline, floored at 0.
    pub timeline_start: f64,
    /// When compositing begins. Earlier than `timeline_start` by the length
    /// of an incoming crossfade.
    pub effective_start: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    /// The clip's own outgoing transition.
    pub transition_kind: TransitionKind,
    /// Duration of the outgoing transition after clamping, 0 when there is none.
    pub transition_duration: f64,
}

impl ClipMeta {
    pub fn timeline_end(&self) -> f64 {
        self.timeline_start + self.length
    }

    /// Seconds since the clip's nominal start. Negative during a crossfade lead-in.
    pub fn progress_at(&self, time: f64) -> f64 {
        time - self.timeline_start
    }

    /// Whether the compositor should consider this clip at `time`.
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.effective_start && time < self.timeline_end()
    }
}

/// Compute metadata for every clip using the default floors.
pub fn compute_clip_metas(clips: &[Clip]) -> HashMap<ClipId, ClipMeta> {
    compute_clip_metas_with(&TrimConfig::default(), clips)
}

pub fn compute_clip_metas_with(config: &TrimConfig, clips: &[Clip]) -> HashMap<ClipId, ClipMeta> {
    let mut tracks: Vec<u32> = clips.iter().map(|c| c.track_index).collect();
    tracks.sort_unstable();
    tracks.dedup();

    let mut metas = HashMap::with_capacity(clips.len());
    for track in tracks {
        let lane = clips_on_track(clips, track);
        // Crossfade length flowing from the previous clip into the current one.
        let mut incoming: Option<f64> = None;

        for (i, clip) in lane.iter().enumerate() {
            let length = clip.length().max(0.0);
            let timeline_start = clip.timeline_position.max(0.0);
            let mut meta = ClipMeta {
                length,
                timeline_start,
                effective_start: timeline_start,
                fade_in: 0.0,
                fade_out: 0.0,
                transition_kind: TransitionKind::None,
                transition_duration: 0.0,
            };

            if let Some(d) = incoming.take() {
                meta.fade_in = d;
                meta.effective_start = (timeline_start - d).max(0.0);
            }

            if let Some(transition) = &clip.transition_to_next {
                let floored = transition.duration.max(config.min_transition_duration);
                match transition.kind {
                    TransitionKind::None => {}
                    TransitionKind::FadeIn => {
                        let d = floored.min(length);
                        meta.fade_in = meta.fade_in.max(d);
                        meta.transition_kind = TransitionKind::FadeIn;
                        meta.transition_duration = d;
                    }
                    TransitionKind::FadeOut => {
                        let d = floored.min(length);
                        meta.fade_out = d;
                        meta.transition_kind = TransitionKind::FadeOut;
                        meta.transition_duration = d;
                    }
                    TransitionKind::Crossfade => {
                        // Only a clip starting at or before this one's end can be blended into.
                        let next = lane.get(i + 1).filter(|next| {
                            !config.definitely_gt(next.timeline_position, clip.timeline_end())
                        });
                        let d = match next {
                            Some(next) => {
                                let d = floored.min(length.min(next.length().max(0.0)));
                                incoming = Some(d);
                                d
                            }
                            // Nothing to blend into: fade to black instead.
                            None => floored.min(length),
                        };
                        meta.fade_out = d;
                        meta.transition_kind = TransitionKind::Crossfade;
                        meta.transition_duration = d;
                    }
                }
            }

            metas.insert(clip.id.clone(), meta);
        }
    }

    tracing::trace!(clips = clips.len(), "computed clip metadata");
    metas
}
