//! Picture id bookkeeping and generic frame descriptors for outgoing video.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rtp::MAX_TWO_BYTE_PICTURE_ID;

mod buffers;
pub use buffers::LayerId;
pub(crate) use buffers::{BufferReferenceTable, LayerFrameIds};

mod translator;
pub use translator::FrameDependencyTranslator;

mod router;
pub use router::PayloadRouter;

/// Per stream state that survives encoder reconfiguration.
///
/// Save it with [`FrameDependencyTranslator::state()`] and hand it back when
/// recreating the translator to keep picture ids continuous for receivers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SerializedPayloadState")]
pub struct PayloadState {
    picture_id: u16,
    tl0_pic_idx: u8,
}

/// Wire form of [`PayloadState`]. Deserializes through
/// [`PayloadState::new`] to keep the picture id within 15 bits.
#[derive(Deserialize)]
struct SerializedPayloadState {
    picture_id: u16,
    tl0_pic_idx: u8,
}

impl From<SerializedPayloadState> for PayloadState {
    fn from(v: SerializedPayloadState) -> Self {
        PayloadState::new(v.picture_id, v.tl0_pic_idx)
    }
}

impl PayloadState {
    /// Creates a state. The picture id is masked to 15 bits.
    pub fn new(picture_id: u16, tl0_pic_idx: u8) -> Self {
        PayloadState {
            picture_id: picture_id & MAX_TWO_BYTE_PICTURE_ID,
            tl0_pic_idx,
        }
    }

    /// Last used picture id.
    pub fn picture_id(&self) -> u16 {
        self.picture_id
    }

    /// Last used tl0 pic idx.
    pub fn tl0_pic_idx(&self) -> u8 {
        self.tl0_pic_idx
    }

    pub(crate) fn increment_picture_id(&mut self) -> u16 {
        self.picture_id = self.picture_id.wrapping_add(1) & MAX_TWO_BYTE_PICTURE_ID;
        self.picture_id
    }

    pub(crate) fn increment_tl0_pic_idx(&mut self) -> u8 {
        self.tl0_pic_idx = self.tl0_pic_idx.wrapping_add(1);
        self.tl0_pic_idx
    }
}

/// Errors arising when routing encoded frames to RTP streams.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// A router needs at least one stream.
    #[error("No RTP streams configured")]
    NoStreams,

    /// The same SSRC was given for more than one stream.
    #[error("Duplicate SSRC: {0}")]
    DuplicateSsrc(crate::rtp::Ssrc),

    /// The frame's simulcast index has no corresponding stream.
    #[error("Stream index {index} out of range, have {streams} streams")]
    StreamIndexOutOfRange {
        /// Index of the frame.
        index: usize,
        /// Number of configured streams.
        streams: usize,
    },
}
