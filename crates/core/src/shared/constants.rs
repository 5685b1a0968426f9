/// YOLO face detector used to locate face boxes before landmarking.
pub const FACE_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// 68-point landmark regressor (112x112 input, 136 outputs). No public
/// download is configured; it must be bundled, cached or passed explicitly.
pub const LANDMARK_MODEL_NAME: &str = "landmarks_68.onnx";

/// Directory name under the platform cache/data dir.
pub const APP_DIR_NAME: &str = "Face Score";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
