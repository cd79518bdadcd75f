use std::collections::HashMap;

use crate::config::PayloadConfig;
use crate::rtp::Ssrc;
use crate::video::{CodecSpecificInfo, EncodedFrame, RtpVideoHeader};

use super::{FrameDependencyTranslator, PayloadError, PayloadState};

/// Routes encoded frames to the translator of their RTP stream.
///
/// One stream per SSRC, in simulcast order. With a single stream, all frames
/// go to it regardless of spatial index since spatial scalability is then
/// covered by one stream.
#[derive(Debug)]
pub struct PayloadRouter {
    streams: Vec<FrameDependencyTranslator>,
}

impl PayloadRouter {
    /// Creates a router with one stream per SSRC, restoring any previously
    /// persisted state found in `states`.
    pub fn new(
        ssrcs: &[Ssrc],
        states: &HashMap<Ssrc, PayloadState>,
        config: &PayloadConfig,
    ) -> Result<Self, PayloadError> {
        if ssrcs.is_empty() {
            return Err(PayloadError::NoStreams);
        }

        let mut streams: Vec<FrameDependencyTranslator> = Vec::with_capacity(ssrcs.len());

        for ssrc in ssrcs {
            if streams.iter().any(|s| s.ssrc() == *ssrc) {
                return Err(PayloadError::DuplicateSsrc(*ssrc));
            }

            let state = states.get(ssrc).copied();
            if let Some(state) = &state {
                debug!("Restore payload state for {}: {:?}", ssrc, state);
            }

            streams.push(FrameDependencyTranslator::new(*ssrc, state, config));
        }

        Ok(PayloadRouter { streams })
    }

    /// Number of configured streams.
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Translator of a stream.
    pub fn stream(&self, ssrc: Ssrc) -> Option<&FrameDependencyTranslator> {
        self.streams.iter().find(|s| s.ssrc() == ssrc)
    }

    /// Produces the RTP video header for a frame, and the SSRC it is to be
    /// sent on.
    pub fn rtp_video_header(
        &mut self,
        frame: &EncodedFrame,
        info: &CodecSpecificInfo,
        shared_frame_id: i64,
    ) -> Result<(Ssrc, RtpVideoHeader), PayloadError> {
        let streams = self.streams.len();

        let index = if streams == 1 {
            0
        } else {
            frame.spatial_index.unwrap_or(0)
        };

        let translator = self
            .streams
            .get_mut(index)
            .ok_or(PayloadError::StreamIndexOutOfRange { index, streams })?;

        let header = translator.rtp_video_header(frame, info, shared_frame_id);

        Ok((translator.ssrc(), header))
    }

    /// Current state of every stream, for restoring in a later router.
    pub fn payload_states(&self) -> HashMap<Ssrc, PayloadState> {
        self.streams.iter().map(|s| (s.ssrc(), s.state())).collect()
    }
}
