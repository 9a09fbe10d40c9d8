//! Bincode Report Codec

use crate::domain::{CodecError, CommitPluginReport};
use crate::ports::outbound::ReportCodec;

/// [`ReportCodec`] using bincode.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeReportCodec;

impl BincodeReportCodec {
    /// Create a codec.
    pub fn new() -> Self {
        Self
    }
}

impl ReportCodec for BincodeReportCodec {
    fn encode(&self, report: &CommitPluginReport) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(report).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<CommitPluginReport, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
