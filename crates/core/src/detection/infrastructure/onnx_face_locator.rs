/// YOLO-face box locator using ONNX Runtime via `ort`.
///
/// First stage of landmark detection: letterbox preprocessing, inference,
/// confidence filtering and NMS. Keypoint columns in the model output are
/// ignored; the 68-point model supplies the landmarks.
use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;

use crate::detection::infrastructure::math::{nms, FaceBox};
use crate::detection::infrastructure::session::{load_session, static_input_size};
use crate::shared::frame::Frame;

/// Fallback input resolution when the model shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face boxes.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

const NMS_IOU_THRESH: f64 = 0.45;

/// Letterbox padding level (YOLO convention).
const PAD_LEVEL: f32 = 114.0 / 255.0;

pub struct OnnxFaceLocator {
    session: Mutex<ort::session::Session>,
    confidence: f64,
    input_size: u32,
}

impl OnnxFaceLocator {
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = static_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        Ok(Self {
            session: Mutex::new(session),
            confidence,
            input_size,
        })
    }

    /// Face boxes in frame coordinates, highest confidence first.
    pub fn locate(&self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let letterboxed = letterbox(frame, self.input_size);
        let input_value = ort::value::Tensor::from_array(letterboxed.tensor.clone())?;

        let (shape, data) = {
            let mut session = self
                .session
                .lock()
                .map_err(|_| "face locator session lock poisoned")?;
            let outputs = session.run(ort::inputs![input_value])?;
            if outputs.len() == 0 {
                return Err("face model produced no outputs".into());
            }
            let tensor = outputs[0].try_extract_array::<f32>()?;
            let shape = tensor.shape().to_vec();
            let data: Vec<f32> = tensor.iter().copied().collect();
            (shape, data)
        };

        let boxes = parse_detections(&shape, &data, self.confidence, &letterboxed)?;
        Ok(nms(boxes, NMS_IOU_THRESH))
    }
}

struct Letterboxed {
    tensor: Array4<f32>,
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

/// Aspect-preserving resize into a `target` square, NCHW float32 in [0,1].
fn letterbox(frame: &Frame, target: u32) -> Letterboxed {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let t = target as f64;

    let scale = (t / fw).min(t / fh);
    let new_w = ((fw * scale).round() as u32).min(target);
    let new_h = ((fh * scale).round() as u32).min(target);
    let pad_x = (target - new_w) / 2;
    let pad_y = (target - new_h) / 2;

    let mut tensor =
        Array4::<f32>::from_elem((1, 3, target as usize, target as usize), PAD_LEVEL);
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let gray = frame.channels() < 3;

    for y in 0..new_h as usize {
        let sy = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let sx = ((x as f64 / scale) as usize).min(src_w - 1);
            for c in 0..3 {
                let channel = if gray { 0 } else { c };
                tensor[[0, c, pad_y as usize + y, pad_x as usize + x]] =
                    src[[sy, sx, channel]] as f32 / 255.0;
            }
        }
    }

    Letterboxed {
        tensor,
        scale,
        pad_x,
        pad_y,
    }
}

/// Parses `[1, features, detections]` or `[1, detections, features]` output
/// rows of `[cx, cy, w, h, conf, ...]` in letterbox coordinates.
fn parse_detections(
    shape: &[usize],
    data: &[f32],
    confidence: f64,
    lb: &Letterboxed,
) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
    if shape.len() != 3 {
        return Err(format!("Unexpected face model output shape: {shape:?}").into());
    }
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats < 5 {
        return Ok(Vec::new());
    }

    let at = |det: usize, feat: usize| -> f64 {
        let idx = if transposed {
            feat * num_dets + det
        } else {
            det * num_feats + feat
        };
        data[idx] as f64
    };

    let mut boxes = Vec::new();
    for i in 0..num_dets {
        let conf = at(i, 4);
        if conf < confidence {
            continue;
        }
        let (cx, cy, w, h) = (at(i, 0), at(i, 1), at(i, 2), at(i, 3));
        let to_frame_x = |v: f64| (v - lb.pad_x as f64) / lb.scale;
        let to_frame_y = |v: f64| (v - lb.pad_y as f64) / lb.scale;
        boxes.push(FaceBox {
            x1: to_frame_x(cx - w / 2.0),
            y1: to_frame_y(cy - h / 2.0),
            x2: to_frame_x(cx + w / 2.0),
            y2: to_frame_y(cy + h / 2.0),
            confidence: conf,
        });
    }
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 -> 640: scale 3.2, content 640x320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100, 3);
        let lb = letterbox(&frame, 640);
        assert_eq!(lb.tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(lb.scale, 3.2, epsilon = 0.01);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 160);
    }

    #[test]
    fn test_letterbox_values_and_padding() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50, 3);
        let lb = letterbox(&frame, 640);
        let y = lb.pad_y as usize + 1;
        assert!((lb.tensor[[0, 0, y, 1]] - 1.0).abs() < 0.01);
        assert!((lb.tensor[[0, 0, 0, 0]] - PAD_LEVEL).abs() < 0.01);
    }

    #[test]
    fn test_letterbox_gray_frame_fills_all_channels() {
        let frame = Frame::new(vec![255u8; 10 * 10], 10, 10, 1);
        let lb = letterbox(&frame, 20);
        for c in 0..3 {
            assert!((lb.tensor[[0, c, 5, 5]] - 1.0).abs() < 0.01);
        }
    }

    fn identity_letterbox() -> Letterboxed {
        Letterboxed {
            tensor: Array4::zeros((1, 3, 1, 1)),
            scale: 2.0,
            pad_x: 10,
            pad_y: 20,
        }
    }

    #[test]
    fn test_parse_rows_maps_back_to_frame() {
        // 8 rows x 6 features; row 0: cx=110, cy=120, w=40, h=60, conf=0.9
        let mut data = vec![0.0f32; 8 * 6];
        data[..5].copy_from_slice(&[110.0, 120.0, 40.0, 60.0, 0.9]);
        let boxes = parse_detections(&[1, 8, 6], &data, 0.5, &identity_letterbox()).unwrap();
        assert_eq!(boxes.len(), 1);
        let b = boxes[0];
        assert_relative_eq!(b.x1, (90.0 - 10.0) / 2.0);
        assert_relative_eq!(b.y1, (90.0 - 20.0) / 2.0);
        assert_relative_eq!(b.x2, (130.0 - 10.0) / 2.0);
        assert_relative_eq!(b.y2, (150.0 - 20.0) / 2.0);
    }

    #[test]
    fn test_parse_transposed_layout() {
        // 5 features x 8 detections; only detection 3 is confident
        let mut data = vec![0.0f32; 5 * 8];
        let det = 3;
        for (feat, v) in [50.0, 50.0, 10.0, 10.0, 0.8].into_iter().enumerate() {
            data[feat * 8 + det] = v;
        }
        let boxes = parse_detections(&[1, 5, 8], &data, 0.5, &identity_letterbox()).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_relative_eq!(boxes[0].confidence, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_filters_low_confidence() {
        let mut data = vec![0.0f32; 8 * 5];
        data[..5].copy_from_slice(&[110.0, 120.0, 40.0, 60.0, 0.2]);
        let boxes = parse_detections(&[1, 8, 5], &data, 0.5, &identity_letterbox()).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_rank() {
        assert!(parse_detections(&[5, 8], &[0.0; 40], 0.5, &identity_letterbox()).is_err());
    }
}
