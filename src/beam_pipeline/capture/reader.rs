use crate::beam_pipeline::capture::types::Capture;
use crate::beam_pipeline::common::error::Result;

pub trait CaptureReader {
    fn read_capture(&self, data: &[u8]) -> Result<Capture>;
}
