use crate::types::{Clip, ClipId};

/// Find the nearest snap point within the threshold.
/// Returns the snapped position if within threshold, otherwise the original position.
pub fn find_snap_point(position: f64, snap_points: &[f64], threshold: f64) -> f64 {
    let mut best = position;
    let mut best_dist = f64::INFINITY;

    for &point in snap_points {
        let dist = (position - point).abs();
        if dist < best_dist {
            best = point;
            best_dist = dist;
        }
    }

    if best_dist <= threshold {
        best
    } else {
        position
    }
}

/// Collect snap points from the clip list (clip edges on every track, the playhead).
pub fn collect_snap_points(
    clips: &[Clip],
    exclude: Option<&ClipId>,
    playhead: Option<f64>,
) -> Vec<f64> {
    let mut points = Vec::with_capacity(clips.len() * 2 + 2);

    // Timeline origin is always a snap point
    points.push(0.0);
    points.extend(playhead);

    for clip in clips {
        if Some(&clip.id) == exclude {
            continue;
        }
        points.push(clip.timeline_position);
        points.push(clip.timeline_end());
    }

    points.retain(|p| p.is_finite());
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}
