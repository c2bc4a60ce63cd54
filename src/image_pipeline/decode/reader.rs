use crate::image_pipeline::decode::types::Frame;

pub trait FrameDecoder {
    /// Decodes a raw buffer. Problems are reported through an empty [`Frame`], never a panic.
    fn decode(&self, data: &[u8]) -> Frame;
}
