// Builds the body box: an oriented quadrilateral stretched between the
// shoulder line and the ankle line, widened a little past each side.
// Visual expectation: a frame that leans with the body instead of an
// upright axis-aligned rectangle.

use crate::geometry::{add, normalize, scale, subtract};
use crate::pose::{Keypoint, KeypointRole};
use crate::types::{Point2, Quadrilateral};

/// How far past each keypoint the box extends, in pixels.
pub const BODY_MARGIN: f32 = 40.0;

/// Keypoints scoring at or below this are treated as not seen.
pub const MIN_KEYPOINT_SCORE: f32 = 0.4;

/// Widen the segment p1..p2 by `margin` on both ends: p1 slides backward
/// along the segment direction, p2 slides forward. None when the points
/// coincide; a segment with no direction cannot be extended.
fn extend_pair(p1: Point2, p2: Point2, margin: f32) -> Option<(Point2, Point2)> {
    let unit = normalize(subtract(p2, p1))?;
    let outward = scale(unit, margin);
    Some((subtract(p1, outward), add(p2, outward)))
}

/// Build the box from two already-resolved keypoint pairs.
///
/// All four keypoints must score above `min_score`. Corner order is fixed:
/// pair-a first end, pair-a second end, pair-b second end, pair-b first
/// end. Either pair collapsing to a single point yields None.
pub fn build(
    pair_a: (&Keypoint, &Keypoint),
    pair_b: (&Keypoint, &Keypoint),
    margin: f32,
    min_score: f32,
) -> Option<Quadrilateral> {
    let all_seen = [pair_a.0, pair_a.1, pair_b.0, pair_b.1]
        .iter()
        .all(|k| k.score > min_score);
    if !all_seen {
        return None;
    }

    let (top_a, top_b) = extend_pair(pair_a.0.position, pair_a.1.position, margin)?;
    let (bottom_a, bottom_b) = extend_pair(pair_b.0.position, pair_b.1.position, margin)?;

    Some(Quadrilateral {
        corners: [top_a, top_b, bottom_b, bottom_a],
    })
}

/// First keypoint carrying `role` with a usable score.
fn find_role(keypoints: &[Keypoint], role: KeypointRole, min_score: f32) -> Option<&Keypoint> {
    keypoints.iter().find(|k| k.role == role && k.score > min_score)
}

/// Resolve shoulders and ankles out of a full pose, then build the box.
/// Any of the four landmarks missing or unsure means no box this frame;
/// we never draw a one-sided or collapsed frame around a partial body.
pub fn body_quad(keypoints: &[Keypoint], margin: f32, min_score: f32) -> Option<Quadrilateral> {
    let ls = find_role(keypoints, KeypointRole::LeftShoulder, min_score)?;
    let rs = find_role(keypoints, KeypointRole::RightShoulder, min_score)?;
    let la = find_role(keypoints, KeypointRole::LeftAnkle, min_score)?;
    let ra = find_role(keypoints, KeypointRole::RightAnkle, min_score)?;
    build((ls, rs), (la, ra), margin, min_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(role: KeypointRole, x: f32, y: f32, score: f32) -> Keypoint {
        Keypoint {
            role,
            position: Point2::new(x, y),
            score,
        }
    }

    #[test]
    fn corners_extend_outward_in_winding_order() {
        let a1 = kp(KeypointRole::LeftShoulder, 0.0, 0.0, 0.9);
        let a2 = kp(KeypointRole::RightShoulder, 10.0, 0.0, 0.9);
        let b1 = kp(KeypointRole::LeftAnkle, 0.0, 10.0, 0.9);
        let b2 = kp(KeypointRole::RightAnkle, 10.0, 10.0, 0.9);

        let quad = build((&a1, &a2), (&b1, &b2), 5.0, 0.4).unwrap();
        assert_eq!(
            quad.corners,
            [
                Point2::new(-5.0, 0.0),
                Point2::new(15.0, 0.0),
                Point2::new(15.0, 10.0),
                Point2::new(-5.0, 10.0),
            ]
        );
    }

    #[test]
    fn build_is_a_pure_function_of_its_inputs() {
        let a1 = kp(KeypointRole::LeftShoulder, 3.0, 7.0, 0.8);
        let a2 = kp(KeypointRole::RightShoulder, 41.0, 9.0, 0.7);
        let b1 = kp(KeypointRole::LeftAnkle, 5.0, 90.0, 0.6);
        let b2 = kp(KeypointRole::RightAnkle, 39.0, 88.0, 0.9);

        let once = build((&a1, &a2), (&b1, &b2), 40.0, 0.4).unwrap();
        let twice = build((&a1, &a2), (&b1, &b2), 40.0, 0.4).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn coincident_pair_yields_no_box() {
        let a1 = kp(KeypointRole::LeftShoulder, 5.0, 5.0, 0.9);
        let a2 = kp(KeypointRole::RightShoulder, 5.0, 5.0, 0.9);
        let b1 = kp(KeypointRole::LeftAnkle, 0.0, 10.0, 0.9);
        let b2 = kp(KeypointRole::RightAnkle, 10.0, 10.0, 0.9);
        assert!(build((&a1, &a2), (&b1, &b2), 5.0, 0.4).is_none());
    }

    #[test]
    fn low_score_keypoint_blocks_the_box() {
        let a1 = kp(KeypointRole::LeftShoulder, 0.0, 0.0, 0.9);
        let a2 = kp(KeypointRole::RightShoulder, 10.0, 0.0, 0.9);
        let b1 = kp(KeypointRole::LeftAnkle, 0.0, 10.0, 0.3); // below gate
        let b2 = kp(KeypointRole::RightAnkle, 10.0, 10.0, 0.9);
        assert!(build((&a1, &a2), (&b1, &b2), 5.0, 0.4).is_none());
    }

    #[test]
    fn one_ankle_is_not_enough_even_with_good_shoulders() {
        let pose = [
            kp(KeypointRole::LeftShoulder, 0.0, 0.0, 0.9),
            kp(KeypointRole::RightShoulder, 10.0, 0.0, 0.9),
            kp(KeypointRole::LeftAnkle, 0.0, 10.0, 0.9),
            // Right ankle never detected.
        ];
        assert!(body_quad(&pose, 5.0, 0.4).is_none());
    }

    #[test]
    fn full_pose_resolves_by_role_regardless_of_list_order() {
        let pose = [
            kp(KeypointRole::Nose, 5.0, -20.0, 0.9),
            kp(KeypointRole::RightAnkle, 10.0, 10.0, 0.9),
            kp(KeypointRole::LeftShoulder, 0.0, 0.0, 0.9),
            kp(KeypointRole::RightShoulder, 10.0, 0.0, 0.9),
            kp(KeypointRole::LeftAnkle, 0.0, 10.0, 0.9),
        ];
        let quad = body_quad(&pose, 5.0, 0.4).unwrap();
        assert_eq!(quad.corners[0], Point2::new(-5.0, 0.0));
        assert_eq!(quad.corners[2], Point2::new(15.0, 10.0));
    }
}
