// What you SEE now:
// • Live camera is always the base image.
// • A ring + crosshair sits on the orange ball and holds its spot for the
//   moments the ball is hidden.
// • With a pose recording loaded: a stick figure over the body and a
//   slanted translucent box spanning shoulders to ankles.
// • T toggles the ball marker. P toggles the pose overlays. ESC quits.

mod camera;
mod config;
mod draw;
mod error;
mod geometry;
mod pose;
mod quad;
mod tracker;
mod types;

use camera::CameraCapture;
use clap::Parser;
use config::Args;
use draw::{
    draw_circle, draw_crosshair, draw_quad_outline, draw_skeleton, draw_text_5x7, fill_quad,
    GammaLut, Overlay,
};
use error::Error;
use pose::{IdlePoseSource, PoseSource, ReplayPoseSource};
use std::time::{Duration, Instant};
use tracker::ColorBlobTracker;
use types::FrameBuffer;

// Overlay palette (0x00RRGGBB).
const BALL_COLOR: u32 = 0x00_FF_CC_33; // yellow ring + crosshair
const BOX_COLOR: u32 = 0x00_33_CC_66; // translucent body box
const BONE_COLOR: u32 = 0x00_33_CC_FF; // skeleton lines
const JOINT_COLOR: u32 = 0x00_66_FF_66; // keypoint dots

const BOX_ALPHA: f32 = 0.25; // visual: how strong the box wash is

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let mut cam = CameraCapture::new(args.camera, args.width, args.height)?;
    let (w, h) = cam.resolution();
    let mut overlay = Overlay::new("Motion Marker — Ball & Pose", w as usize, h as usize)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer {
        width: w as usize,
        height: h as usize,
        pixels: vec![0u32; (w as usize) * (h as usize)],
    };

    /* --- Analysis state ---
       The tracker owns the one slot of frame-to-frame memory in the whole
       pipeline (the ball's last trusted center). */
    let mut ball_tracker = ColorBlobTracker::new();

    /* --- Pose supply ---
       A recording if one was given, otherwise empty poses (overlays off). */
    let mut poses: Box<dyn PoseSource> = match &args.poses {
        Some(path) => Box::new(ReplayPoseSource::open(path)?),
        None => Box::new(IdlePoseSource),
    };

    /* --- Gamma LUT (fast linear-light blend) ---
       Visual: the box wash mixes into the video without halo artifacts. */
    let lut = GammaLut::new();

    /* --- HUD / FPS ---
       Visual: small text shows overlay states + FPS. */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* --- Overlay toggles --- */
    let mut show_ball = true;
    let mut show_pose = true;

    /* ------------------------------ Main loop ------------------------------ */
    while overlay.is_open() && !overlay.esc_pressed() {
        let now = Instant::now();

        /* 1) Grab a fresh live frame and this frame's pose.
           Visual: the raw base image we draw everything onto. */
        let frame = cam.next_frame()?;
        let keypoints = poses.next_pose()?;

        /* 2) Inputs */
        if overlay.t_pressed_once() {
            show_ball = !show_ball; // visual: ball marker appears/disappears
        }
        if overlay.p_pressed_once() {
            show_pose = !show_pose; // visual: skeleton + box appear/disappear
        }

        /* 3) Per-frame analysis. Both calls are independent; each returns
           nothing at all when it is not confident enough to draw. */
        let ball = ball_tracker.update(&frame, tracker::orange, args.min_pixels, tracker::MARKER_RADIUS);
        let body = quad::body_quad(&keypoints, args.margin, args.min_score);

        /* 4) Base image for this frame. */
        draw::blit(&frame, &mut screen);

        /* 5) Pose overlays first (they sit under the ball marker).
           Visual: translucent slanted box, then the stick figure. */
        if show_pose {
            if let Some(q) = &body {
                fill_quad(&mut screen, q, BOX_COLOR, BOX_ALPHA, &lut);
                draw_quad_outline(&mut screen, q, BOX_COLOR);
            }
            draw_skeleton(&mut screen, &keypoints, args.min_score, BONE_COLOR, JOINT_COLOR);
        }

        /* 6) Ball marker on top.
           Visual: yellow ring + crosshair on (or last known near) the ball. */
        if show_ball {
            if let Some(b) = &ball {
                let (cx, cy) = (b.center.x.round() as i32, b.center.y.round() as i32);
                draw_circle(&mut screen, cx, cy, b.radius.round() as i32, BALL_COLOR);
                draw_crosshair(&mut screen, cx, cy, 12, BALL_COLOR);
            }
        }

        /* 7) HUD text */
        let ball_tag = if show_ball { "BALL ON" } else { "BALL OFF" };
        let pose_tag = if show_pose { "POSE ON" } else { "POSE OFF" };
        let hud = format!("LIVE | T: {ball_tag} | P: {pose_tag} | {hud_fps_text}");
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 8) Present to the window (this is when the on-screen image updates). */
        overlay.present(&screen)?;

        /* 9) FPS counter (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::info!("fps {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
