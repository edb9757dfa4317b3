use proptest::prelude::*;
use proptest::sample::Index;
use trimline_core::{
    calculate_trim_operation, compute_clip_metas, compute_opacity, Clip, EditMode, TrimEdge,
    TrimSession, Transition, MIN_CLIP_DURATION, TIME_EPSILON,
};

/// Clips laid end to end on one track, with an occasional gap.
fn lane(track: u32) -> impl Strategy<Value = Vec<Clip>> {
    prop::collection::vec(
        (
            0.5f64..20.0,
            0.0f64..5.0,
            prop::option::of(0.0f64..10.0),
            prop_oneof![Just(0.0), 0.0f64..3.0],
        ),
        1..6,
    )
    .prop_map(move |specs| {
        let mut position = 0.0;
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (length, start, extra, gap))| {
                position += gap;
                let mut clip = Clip::new(format!("t{track}-c{i}"), track, position, start, start + length);
                if let Some(extra) = extra {
                    clip = clip.with_source_duration(start + length + extra);
                }
                position += length;
                clip
            })
            .collect()
    })
}

fn two_tracks() -> impl Strategy<Value = Vec<Clip>> {
    (lane(0), lane(1)).prop_map(|(mut clips, other)| {
        clips.extend(other);
        clips
    })
}

fn edit_mode() -> impl Strategy<Value = EditMode> {
    prop_oneof![
        Just(EditMode::Normal),
        Just(EditMode::Ripple),
        Just(EditMode::Roll),
        Just(EditMode::Slip),
    ]
}

fn edge() -> impl Strategy<Value = TrimEdge> {
    prop_oneof![Just(TrimEdge::Left), Just(TrimEdge::Right)]
}

proptest! {
    #[test]
    fn accepted_trims_keep_clip_invariants(
        clips in two_tracks(),
        pick in any::<Index>(),
        delta in -25.0f64..25.0,
        mode in edit_mode(),
        edge in edge(),
    ) {
        let clip = pick.get(&clips[..]);
        let proposed = TrimSession::begin(clip, edge).propose(delta, mode);

        if let Ok(op) = calculate_trim_operation(clip, edge, proposed, &clips, mode) {
            prop_assert!(op.new_end - op.new_start >= MIN_CLIP_DURATION - TIME_EPSILON);
            prop_assert!(op.new_start >= -TIME_EPSILON);
            if let Some(source_duration) = clip.source_duration {
                prop_assert!(op.new_end <= source_duration + TIME_EPSILON);
            }
            prop_assert!(op.new_position >= 0.0);

            for affected in &op.affected_clips {
                let other = clips.iter().find(|c| c.id == affected.clip_id).unwrap();
                prop_assert_eq!(other.track_index, clip.track_index);
                if let Some(new_start) = affected.new_start {
                    prop_assert!(new_start >= -TIME_EPSILON);
                    prop_assert!(other.end - new_start >= MIN_CLIP_DURATION - TIME_EPSILON);
                }
            }
        }
    }

    #[test]
    fn ripple_shifts_exactly_by_duration_change(
        clips in two_tracks(),
        pick in any::<Index>(),
        delta in -25.0f64..25.0,
        edge in edge(),
    ) {
        let clip = pick.get(&clips[..]);
        let proposed = TrimSession::begin(clip, edge).propose(delta, EditMode::Ripple);

        if let Ok(op) = calculate_trim_operation(clip, edge, proposed, &clips, EditMode::Ripple) {
            let shift = op.duration_delta();
            let expected: Vec<&Clip> = clips
                .iter()
                .filter(|c| {
                    c.track_index == clip.track_index
                        && c.id != clip.id
                        && c.timeline_position > clip.timeline_end() - TIME_EPSILON
                })
                .collect();
            prop_assert_eq!(op.affected_clips.len(), expected.len());

            let mut previous = f64::NEG_INFINITY;
            for affected in &op.affected_clips {
                let other = clips.iter().find(|c| c.id == affected.clip_id).unwrap();
                let new_position = affected.new_position.unwrap();
                prop_assert!((new_position - (other.timeline_position + shift)).abs() < 1e-9);
                prop_assert!(new_position >= previous);
                previous = new_position;
            }
        }
    }

    #[test]
    fn roll_without_neighbour_is_normal(
        clips in two_tracks(),
        pick in any::<Index>(),
        delta in -25.0f64..25.0,
        edge in edge(),
    ) {
        let clip = pick.get(&clips[..]);
        let proposed = TrimSession::begin(clip, edge).propose(delta, EditMode::Roll);
        let has_neighbour = clips.iter().any(|c| {
            c.track_index == clip.track_index
                && c.id != clip.id
                && (c.timeline_position - clip.timeline_end()).abs() <= TIME_EPSILON
        });

        if let Ok(op) = calculate_trim_operation(clip, edge, proposed, &clips, EditMode::Roll) {
            if has_neighbour {
                prop_assert_eq!(op.edit_mode, EditMode::Roll);
                prop_assert_eq!(op.affected_clips.len(), 1);
            } else {
                prop_assert_eq!(op.edit_mode, EditMode::Normal);
                prop_assert!(op.affected_clips.is_empty());
            }
        }
    }

    #[test]
    fn slip_never_moves_clip(
        clips in two_tracks(),
        pick in any::<Index>(),
        delta in -25.0f64..25.0,
        edge in edge(),
    ) {
        let clip = pick.get(&clips[..]);
        let proposed = TrimSession::begin(clip, edge).propose(delta, EditMode::Slip);

        if let Ok(op) = calculate_trim_operation(clip, edge, proposed, &clips, EditMode::Slip) {
            prop_assert_eq!(op.new_position, clip.timeline_position);
            prop_assert!((op.new_duration() - clip.length()).abs() < 1e-9);
            prop_assert!(op.affected_clips.is_empty());
        }
    }

    #[test]
    fn calculation_is_idempotent(
        clips in two_tracks(),
        pick in any::<Index>(),
        delta in -25.0f64..25.0,
        mode in edit_mode(),
        edge in edge(),
    ) {
        let clip = pick.get(&clips[..]);
        let proposed = TrimSession::begin(clip, edge).propose(delta, mode);
        let first = calculate_trim_operation(clip, edge, proposed, &clips, mode);
        let second = calculate_trim_operation(clip, edge, proposed, &clips, mode);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn opacity_stays_in_unit_range(
        clips in lane(0),
        fade in 0.0f64..30.0,
        progress in -5.0f64..120.0,
    ) {
        let clips: Vec<Clip> = clips
            .into_iter()
            .map(|c| c.with_transition(Transition::crossfade(fade)))
            .collect();
        let metas = compute_clip_metas(&clips);
        for meta in metas.values() {
            let opacity = compute_opacity(meta, progress);
            prop_assert!((0.0..=1.0).contains(&opacity));
            prop_assert!(meta.effective_start >= 0.0);
            prop_assert!(meta.effective_start <= meta.timeline_start);
            prop_assert!(meta.fade_in <= meta.length + TIME_EPSILON);
            prop_assert!(meta.fade_out <= meta.length + TIME_EPSILON);
        }
    }
}
