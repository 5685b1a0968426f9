use crate::shared::frame::Frame;

/// Decodes an encoded photograph (JPEG, PNG, ...) into a [`Frame`].
///
/// Any failure (empty, corrupt or unsupported input) is reported as an
/// error; the pipeline does not distinguish between causes.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>>;
}
