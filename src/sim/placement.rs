//! Horizontal spawn placement
//!
//! Best effort: try a handful of random columns that don't overlap a live
//! disc, and settle for the last try if the board is too crowded.

use rand::Rng;

use super::state::FallingObject;

/// Pick a left edge in `[0, area_width - object_width)` for a new disc
pub fn choose_placement<R: Rng + ?Sized>(
    existing: &[FallingObject],
    area_width: f32,
    object_width: f32,
    attempts: u32,
    rng: &mut R,
) -> f32 {
    let max_x = area_width - object_width;
    if max_x <= 0.0 {
        return 0.0;
    }

    let mut candidate = 0.0;
    for _ in 0..attempts.max(1) {
        // Whole pixels, like the DOM layout
        candidate = rng.random_range(0.0..max_x).floor();
        if !existing
            .iter()
            .any(|o| spans_overlap(candidate, o.pos.x, object_width))
        {
            return candidate;
        }
    }

    log::debug!("No free column after {} attempts, overlapping at x={}", attempts, candidate);
    candidate
}

/// Closed spans `[a, a + width]` and `[b, b + width]` intersect
#[inline]
fn spans_overlap(a: f32, b: f32, width: f32) -> bool {
    a <= b + width && b <= a + width
}
