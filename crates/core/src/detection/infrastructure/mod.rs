pub mod availability_detector;
pub mod math;
pub mod onnx_face_locator;
pub mod onnx_landmark_detector;
pub mod session;
