// Keypoints, the pose skeleton, and where poses come from.
// The pose estimator itself lives outside this program; anything able to
// hand over a list of scored landmarks once per frame will do. For
// development and demos we replay a recorded file.

use crate::error::Error;
use crate::types::Point2;
use serde::Deserialize;
use std::fs;

/// The 17 landmark roles reported by COCO-style pose estimators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum KeypointRole {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// One scored landmark. `score` is the estimator's confidence in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Keypoint {
    pub role: KeypointRole,
    pub position: Point2,
    pub score: f32,
}

/// Bone list for drawing: pairs of roles connected by a line.
pub const SKELETON: [(KeypointRole, KeypointRole); 16] = [
    // Face
    (KeypointRole::LeftEar, KeypointRole::LeftEye),
    (KeypointRole::LeftEye, KeypointRole::Nose),
    (KeypointRole::Nose, KeypointRole::RightEye),
    (KeypointRole::RightEye, KeypointRole::RightEar),
    // Torso
    (KeypointRole::LeftShoulder, KeypointRole::RightShoulder),
    (KeypointRole::LeftShoulder, KeypointRole::LeftHip),
    (KeypointRole::RightShoulder, KeypointRole::RightHip),
    (KeypointRole::LeftHip, KeypointRole::RightHip),
    // Arms
    (KeypointRole::LeftShoulder, KeypointRole::LeftElbow),
    (KeypointRole::LeftElbow, KeypointRole::LeftWrist),
    (KeypointRole::RightShoulder, KeypointRole::RightElbow),
    (KeypointRole::RightElbow, KeypointRole::RightWrist),
    // Legs
    (KeypointRole::LeftHip, KeypointRole::LeftKnee),
    (KeypointRole::LeftKnee, KeypointRole::LeftAnkle),
    (KeypointRole::RightHip, KeypointRole::RightKnee),
    (KeypointRole::RightKnee, KeypointRole::RightAnkle),
];

/// Anything that can supply one pose per frame.
pub trait PoseSource {
    fn next_pose(&mut self) -> Result<Vec<Keypoint>, Error>;
}

/// Replays poses recorded to a JSON-lines file: one keypoint array per
/// line. Wraps around at the end so the overlay keeps moving.
pub struct ReplayPoseSource {
    frames: Vec<Vec<Keypoint>>,
    cursor: usize,
}

impl ReplayPoseSource {
    /// Load the whole recording up front. Lines that fail to parse are
    /// skipped with a warning; a file with nothing usable is an error.
    pub fn open(path: &str) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::PoseSource(format!("Read {path}: {e}")))?;

        let mut frames = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Vec<Keypoint>>(line) {
                Ok(kps) => frames.push(kps),
                Err(e) => log::warn!("{path}:{}: skipping bad pose line: {e}", lineno + 1),
            }
        }

        if frames.is_empty() {
            return Err(Error::PoseSource(format!("{path}: no usable poses")));
        }
        Ok(Self { frames, cursor: 0 })
    }
}

impl PoseSource for ReplayPoseSource {
    fn next_pose(&mut self) -> Result<Vec<Keypoint>, Error> {
        let pose = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(pose)
    }
}

/// Stands in when no recording is configured: empty poses, so the skeleton
/// and body box overlays simply stay off.
pub struct IdlePoseSource;

impl PoseSource for IdlePoseSource {
    fn next_pose(&mut self) -> Result<Vec<Keypoint>, Error> {
        Ok(Vec::new())
    }
}
