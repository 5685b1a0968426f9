/// Two-stage 68-point landmark detector using ONNX Runtime via `ort`.
///
/// Stage one locates face boxes with [`OnnxFaceLocator`]. Stage two crops an
/// expanded square around each box, resizes it to the landmark model's input
/// and reads 136 values: 68 `(x, y)` pairs normalized to the crop.
use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_set::{LandmarkSet, LANDMARK_COUNT};
use crate::detection::infrastructure::math::FaceBox;
use crate::detection::infrastructure::onnx_face_locator::OnnxFaceLocator;
use crate::detection::infrastructure::session::{load_session, static_input_size};
use crate::shared::frame::Frame;
use crate::shared::geometry::Point;

/// Fallback landmark model input side (PFLD-style models use 112).
const DEFAULT_INPUT_SIZE: u32 = 112;

/// Crop side as a multiple of the larger face box side.
const CROP_EXPANSION: f64 = 1.2;

pub struct OnnxLandmarkDetector {
    locator: OnnxFaceLocator,
    session: Mutex<ort::session::Session>,
    input_size: u32,
}

impl OnnxLandmarkDetector {
    pub fn new(
        locator: OnnxFaceLocator,
        landmark_model_path: &Path,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(landmark_model_path)?;
        let input_size = static_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        Ok(Self {
            locator,
            session: Mutex::new(session),
            input_size,
        })
    }

    fn landmarks_for(
        &self,
        frame: &Frame,
        face: &FaceBox,
    ) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
        let crop = SquareCrop::around(face);
        let tensor = crop_tensor(frame, &crop, self.input_size);
        let input_value = ort::value::Tensor::from_array(tensor)?;

        let values: Vec<f32> = {
            let mut session = self
                .session
                .lock()
                .map_err(|_| "landmark session lock poisoned")?;
            let outputs = session.run(ort::inputs![input_value])?;
            if outputs.len() == 0 {
                return Err("landmark model produced no outputs".into());
            }
            let tensor = outputs[0].try_extract_array::<f32>()?;
            tensor.iter().copied().collect()
        };

        let points = decode_points(&values, &crop)?;
        Ok(LandmarkSet::new(points)?)
    }
}

impl LandmarkDetector for OnnxLandmarkDetector {
    fn detect(&self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        let faces = self.locator.locate(frame)?;
        log::debug!("Located {} face box(es)", faces.len());
        faces
            .iter()
            .map(|face| self.landmarks_for(frame, face))
            .collect()
    }
}

/// Square region in frame coordinates; may extend past the frame edges.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SquareCrop {
    x0: f64,
    y0: f64,
    side: f64,
}

impl SquareCrop {
    fn around(face: &FaceBox) -> Self {
        let (cx, cy) = face.center();
        let side = (face.width().max(face.height()) * CROP_EXPANSION).max(1.0);
        Self {
            x0: cx - side / 2.0,
            y0: cy - side / 2.0,
            side,
        }
    }
}

/// Nearest-neighbour resample of `crop` into an NCHW float32 tensor in
/// [0,1]. Pixels outside the frame are black.
fn crop_tensor(frame: &Frame, crop: &SquareCrop, size: u32) -> Array4<f32> {
    let n = size as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, n, n));
    let src = frame.as_ndarray();
    let (fw, fh) = (frame.width() as f64, frame.height() as f64);
    let step = crop.side / size as f64;
    let gray = frame.channels() < 3;

    for y in 0..n {
        let sy = (crop.y0 + (y as f64 + 0.5) * step).floor();
        if sy < 0.0 || sy >= fh {
            continue;
        }
        for x in 0..n {
            let sx = (crop.x0 + (x as f64 + 0.5) * step).floor();
            if sx < 0.0 || sx >= fw {
                continue;
            }
            for c in 0..3 {
                let channel = if gray { 0 } else { c };
                tensor[[0, c, y, x]] = src[[sy as usize, sx as usize, channel]] as f32 / 255.0;
            }
        }
    }
    tensor
}

/// Maps crop-normalized `(x, y)` pairs back to frame coordinates.
fn decode_points(
    values: &[f32],
    crop: &SquareCrop,
) -> Result<Vec<Point>, Box<dyn std::error::Error>> {
    if values.len() != LANDMARK_COUNT * 2 {
        return Err(format!(
            "landmark model returned {} values, expected {}",
            values.len(),
            LANDMARK_COUNT * 2
        )
        .into());
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| {
            Point::new(
                crop.x0 + xy[0] as f64 * crop.side,
                crop.y0 + xy[1] as f64 * crop.side,
            )
        })
        .collect())
}
