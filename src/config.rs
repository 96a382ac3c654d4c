// Command line surface. Everything tunable at runtime lives here; the
// defaults match the constants the pipeline modules export.

use crate::quad::{BODY_MARGIN, MIN_KEYPOINT_SCORE};
use crate::tracker::MIN_PIXEL_COUNT;
use clap::Parser;

/// Ball and body-pose overlays on live camera video.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera device index (0 = default webcam)
    #[arg(short, long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Matching pixels needed before the ball centroid is trusted
    #[arg(long, default_value_t = MIN_PIXEL_COUNT)]
    pub min_pixels: usize,

    /// Outward extension of the body box past the shoulder/ankle lines, pixels
    #[arg(long, default_value_t = BODY_MARGIN)]
    pub margin: f32,

    /// Keypoints scoring at or below this are ignored
    #[arg(long, default_value_t = MIN_KEYPOINT_SCORE)]
    pub min_score: f32,

    /// Recorded pose file to replay (JSON lines, one keypoint array per
    /// line); omit to run with the ball overlay only
    #[arg(short, long)]
    pub poses: Option<String>,
}
