use crate::transitions::ClipMeta;

/// Compositing opacity of a clip `progress` seconds after its nominal start.
///
/// Outside `[0, length]` the clip is invisible. Inside, the fade-in and
/// fade-out ramps are evaluated independently and the smaller one wins, so
/// overlapping fades never extrapolate past `[0, 1]`.
pub fn compute_opacity(meta: &ClipMeta, progress: f64) -> f64 {
    if !progress.is_finite() || progress < 0.0 || progress > meta.length {
        return 0.0;
    }

    let fade_in = if meta.fade_in > 0.0 {
        progress / meta.fade_in
    } else {
        1.0
    };
    let fade_out = if meta.fade_out > 0.0 {
        (meta.length - progress) / meta.fade_out
    } else {
        1.0
    };

    fade_in.min(fade_out).clamp(0.0, 1.0)
}

/// Opacity at an absolute timeline time.
pub fn opacity_at(meta: &ClipMeta, time: f64) -> f64 {
    compute_opacity(meta, meta.progress_at(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransitionKind;

    fn make_meta(length: f64, fade_in: f64, fade_out: f64) -> ClipMeta {
        ClipMeta {
            length,
            timeline_start: 0.0,
            effective_start: 0.0,
            fade_in,
            fade_out,
            transition_kind: TransitionKind::None,
            transition_duration: 0.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn symmetric_fades() {
        let meta = make_meta(10.0, 2.0, 2.0);
        assert_close(compute_opacity(&meta, 0.0), 0.0);
        assert_close(compute_opacity(&meta, 1.0), 0.5);
        assert_close(compute_opacity(&meta, 2.0), 1.0);
        assert_close(compute_opacity(&meta, 5.0), 1.0);
        assert_close(compute_opacity(&meta, 9.0), 0.5);
        assert_close(compute_opacity(&meta, 10.0), 0.0);
    }

    #[test]
    fn outside_clip_is_transparent() {
        let meta = make_meta(10.0, 0.0, 0.0);
        assert_eq!(compute_opacity(&meta, -0.01), 0.0);
        assert_eq!(compute_opacity(&meta, 10.01), 0.0);
        assert_eq!(compute_opacity(&meta, f64::NAN), 0.0);
    }

    #[test]
    fn no_fades_is_fully_opaque() {
        let meta = make_meta(4.0, 0.0, 0.0);
        assert_eq!(compute_opacity(&meta, 0.0), 1.0);
        assert_eq!(compute_opacity(&meta, 4.0), 1.0);
    }

    #[test]
    fn overlapping_fades_take_minimum() {
        // Ramps cross at 2.0 where both equal 2/3.
        let meta = make_meta(4.0, 3.0, 3.0);
        assert_close(compute_opacity(&meta, 2.0), 2.0 / 3.0);
        assert_close(compute_opacity(&meta, 1.0), 1.0 / 3.0);
        assert_close(compute_opacity(&meta, 3.0), 1.0 / 3.0);
        for step in 0..=40 {
            let value = compute_opacity(&meta, step as f64 * 0.1);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn absolute_time_uses_nominal_start() {
        let meta = ClipMeta {
            timeline_start: 10.0,
            effective_start: 8.0,
            ..make_meta(10.0, 2.0, 0.0)
        };
        assert_close(opacity_at(&meta, 11.0), 0.5);
        // Lead-in before the nominal start is outside the ramp.
        assert_eq!(opacity_at(&meta, 9.0), 0.0);
    }
}
