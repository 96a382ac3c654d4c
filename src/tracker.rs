// Finds the ball in a frame by color and remembers where it last was.
// Visual expectation: a marker that sits on the orange ball while it is
// visible and stays put for the moments the ball ducks out of view.

use crate::types::{BlobEstimate, PixelBuffer, Point2};

/// Matching pixels needed before a centroid is trusted.
pub const MIN_PIXEL_COUNT: usize = 300;

/// Marker radius in pixels. Display convention only.
pub const MARKER_RADIUS: f32 = 30.0;

/// Default color rule: bright red/orange, rejecting strong green and strong
/// blue. Tuned for an orange ball under typical indoor lighting.
pub fn orange(r: u8, g: u8, b: u8) -> bool {
    r > 180 && g > 70 && g < 160 && b < 80
}

/// Tracks one colored blob across frames.
///
/// Owns exactly one slot of state: the last trusted center. One instance,
/// one owner, one `update` per frame; there is deliberately no history
/// buffer or smoothing behind it.
pub struct ColorBlobTracker {
    last_center: Option<Point2>,
}

impl ColorBlobTracker {
    pub fn new() -> Self {
        Self { last_center: None }
    }

    /// Scan `frame` and decide where to draw the ball marker.
    ///
    /// Every pixel's (r,g,b) goes through `predicate`; matches feed three
    /// running sums (count, x, y), one linear pass, nothing allocated.
    /// With at least `min_count` matches the centroid of the matches
    /// becomes the new trusted center. With fewer we fall back to the
    /// previous center, so a briefly occluded ball does not flicker. With
    /// fewer and no history yet, there is nothing to report.
    pub fn update<F>(
        &mut self,
        frame: &PixelBuffer,
        predicate: F,
        min_count: usize,
        radius: f32,
    ) -> Option<BlobEstimate>
    where
        F: Fn(u8, u8, u8) -> bool,
    {
        let w = frame.width;
        let mut count: usize = 0;
        let mut sum_x: u64 = 0;
        let mut sum_y: u64 = 0;

        for i in 0..w * frame.height {
            let (r, g, b) = frame.rgb(i);
            if predicate(r, g, b) {
                count += 1;
                sum_x += (i % w) as u64; // pixel x from flat index
                sum_y += (i / w) as u64; // pixel y from flat index
            }
        }

        // count > 0 keeps min_count = 0 from dividing by zero below.
        if count >= min_count && count > 0 {
            let center = Point2::new(
                sum_x as f32 / count as f32,
                sum_y as f32 / count as f32,
            );
            self.last_center = Some(center);
            Some(BlobEstimate { center, radius })
        } else if let Some(center) = self.last_center {
            // Not enough evidence this frame; reuse the last trusted spot.
            Some(BlobEstimate { center, radius })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A dark frame with the given pixel indices turned ball-orange.
    fn frame_with_orange(width: usize, height: usize, lit: &[usize]) -> PixelBuffer {
        let mut data = vec![0u8; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        for &i in lit {
            let o = i * 4;
            data[o] = 230; // r
            data[o + 1] = 120; // g
            data[o + 2] = 40; // b
        }
        PixelBuffer {
            width,
            height,
            data,
        }
    }

    #[test]
    fn orange_rule_matches_ball_colors_only() {
        assert!(orange(230, 120, 40));
        assert!(orange(200, 90, 10));
        assert!(!orange(230, 200, 40)); // too green (yellow-ish)
        assert!(!orange(230, 120, 120)); // too blue
        assert!(!orange(120, 120, 40)); // too dark
    }

    #[test]
    fn no_match_and_no_history_reports_nothing() {
        let mut tracker = ColorBlobTracker::new();
        let frame = frame_with_orange(8, 8, &[]);
        assert!(tracker.update(&frame, orange, 1, 30.0).is_none());
    }

    #[test]
    fn centroid_is_the_exact_mean_of_matches() {
        let mut tracker = ColorBlobTracker::new();
        // (1,1), (3,1), (1,3), (3,3): a square centered on (2,2) in 5x5.
        let frame = frame_with_orange(5, 5, &[6, 8, 16, 18]);

        // Exactly min_count matches is enough.
        let est = tracker.update(&frame, orange, 4, 30.0).unwrap();
        assert_eq!(est.center, Point2::new(2.0, 2.0));
        assert_eq!(est.radius, 30.0);
    }

    #[test]
    fn single_pixel_at_index_five_lands_on_1_1() {
        let mut tracker = ColorBlobTracker::new();
        let frame = frame_with_orange(4, 4, &[5]);
        let est = tracker.update(&frame, orange, 1, 30.0).unwrap();
        assert_eq!(est.center, Point2::new(1.0, 1.0));
        assert_eq!(est.radius, 30.0);
    }

    #[test]
    fn last_center_survives_an_empty_frame() {
        let mut tracker = ColorBlobTracker::new();
        let seen = frame_with_orange(4, 4, &[5]);
        let est = tracker.update(&seen, orange, 1, 30.0).unwrap();

        let empty = frame_with_orange(4, 4, &[]);
        let held = tracker.update(&empty, orange, 1, 30.0).unwrap();
        assert_eq!(held.center, est.center);
    }

    #[test]
    fn weak_evidence_does_not_move_the_held_center() {
        let mut tracker = ColorBlobTracker::new();
        let seen = frame_with_orange(4, 4, &[5]);
        tracker.update(&seen, orange, 1, 30.0);

        // One match in a far corner, below the gate: the held center must
        // not drift toward it, this frame or later.
        let weak = frame_with_orange(4, 4, &[15]);
        let held = tracker.update(&weak, orange, 2, 30.0).unwrap();
        assert_eq!(held.center, Point2::new(1.0, 1.0));

        let empty = frame_with_orange(4, 4, &[]);
        let still = tracker.update(&empty, orange, 2, 30.0).unwrap();
        assert_eq!(still.center, Point2::new(1.0, 1.0));
    }

    #[test]
    fn zero_gate_with_zero_matches_still_reports_nothing() {
        let mut tracker = ColorBlobTracker::new();
        let frame = frame_with_orange(4, 4, &[]);
        assert!(tracker.update(&frame, orange, 0, 30.0).is_none());
    }
}
