// Opens the camera and converts frames into the flat RGBA buffer the
// analysis pipeline reads. Visual expectation: each `next_frame()` call
// is one fresh live image, ready for scanning and for display.

use crate::error::Error;
use crate::types::PixelBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so the main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Try to open a camera at a target resolution (falls back if not exact).
    /// On success nothing is shown yet; we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        // 1) Choose the device (0 = default webcam)
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // 2) Ask for RGB frames, prioritizing the closest match to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 3) Create the camera (this might fail if no device exists).
        let mut cam =
            Camera::new(idx, req).map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        // 4) Start streaming frames from the camera.
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // 5) The stream may have settled on a slightly different resolution.
        let actual = cam.resolution();
        log::info!(
            "camera {index} streaming at {}x{}",
            actual.width(),
            actual.height()
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame and lay it out as r,g,b,a bytes per pixel.
    /// The tracker scans this buffer; the renderer copies it to the screen.
    pub fn next_frame(&mut self) -> Result<PixelBuffer, Error> {
        // 1) Pull a frame from the camera (blocks until a new frame is ready).
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // 2) Decode to an ImageBuffer<Rgb<u8>, Vec<u8>> regardless of what
        //    raw format the device delivered.
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // 3) Interleave an opaque alpha channel. The analysis code indexes
        //    pixels as 4-byte groups, so the layout must be exact.
        let (w, h) = rgb_img.dimensions();
        let mut data = Vec::with_capacity((w as usize) * (h as usize) * 4);
        for pixel in rgb_img.pixels() {
            data.push(pixel[0]); // r
            data.push(pixel[1]); // g
            data.push(pixel[2]); // b
            data.push(255); // a, always opaque from a camera
        }

        Ok(PixelBuffer {
            width: w as usize,
            height: h as usize,
            data,
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
