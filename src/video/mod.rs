//! Encoder output as seen by the payload layer.
//!
//! The encoder hands over an [`EncodedFrame`] describing the frame itself and
//! a [`CodecSpecificInfo`] describing how the frame fits into the codec's
//! prediction structure. Both are consumed read only.

use crate::rtp::Bitrate;

mod header;
pub use header::{GenericDescriptorInfo, H264Header, RtpVideoHeader};
pub use header::{VideoTypeHeader, Vp8Header, Vp9Header};

/// Maximum number of temporal layers a generic frame descriptor can express.
pub const MAX_TEMPORAL_LAYERS: usize = 4;

/// Maximum number of spatial layers a generic frame descriptor can express.
pub const MAX_SPATIAL_LAYERS: usize = 3;

/// Number of VP8 reference buffers (last, golden and altref).
pub const VP8_NUM_BUFFERS: usize = 3;

/// Codec family of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// VP8, optionally with temporal layers.
    Vp8,
    /// VP9, optionally with temporal and spatial layers.
    Vp9,
    /// H.264/AVC.
    H264,
    /// Codec without any codec specific RTP payload descriptor.
    Generic,
}

/// Whether a frame can be decoded on its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Independently decodable frame.
    Key,
    /// Frame predicted from earlier frames.
    #[default]
    Delta,
}

/// Rotation to apply to the frame before rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum VideoRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Hint about the kind of content in the frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Camera or unknown source.
    #[default]
    Unspecified,
    /// Screen capture.
    Screenshare,
}

/// Metadata of one encoded frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Key or delta frame.
    pub frame_type: FrameType,
    /// Encoded width in pixels.
    pub width: u16,
    /// Encoded height in pixels.
    pub height: u16,
    /// Rotation carried to the receiver.
    pub rotation: VideoRotation,
    /// Content type carried to the receiver.
    pub content_type: ContentType,
    /// Spatial (or simulcast) index of the frame, if the encoder is layered.
    pub spatial_index: Option<usize>,
    /// Bitrate the encoder targeted for this frame's layer.
    pub target_bitrate: Option<Bitrate>,
}

impl EncodedFrame {
    /// A frame of the given type with everything else defaulted.
    pub fn new(frame_type: FrameType) -> Self {
        EncodedFrame {
            frame_type,
            ..Default::default()
        }
    }

    /// Shorthand for checking the frame type.
    pub fn is_keyframe(&self) -> bool {
        self.frame_type == FrameType::Key
    }
}

/// VP8 reference buffer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Vp8Buffer {
    Last = 0,
    Golden = 1,
    Altref = 2,
}

/// VP8 layering information reported by the encoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vp8Info {
    /// Temporal layer of the frame. `None` when the stream has no temporal layering.
    pub temporal_idx: Option<u8>,
    /// The frame only depends on the base layer, i.e. it is a switching point
    /// up to this temporal layer.
    pub layer_sync: bool,
    /// No other frame references this frame.
    pub non_reference: bool,
    /// Key index for the TID/KEYIDX field, if used.
    pub key_idx: Option<u8>,
    /// Buffers the frame predicts from, indexed by [`Vp8Buffer`].
    pub referenced_buffers: [bool; VP8_NUM_BUFFERS],
    /// Buffers the frame is stored into after decoding, indexed by [`Vp8Buffer`].
    pub updated_buffers: [bool; VP8_NUM_BUFFERS],
}

impl Vp8Info {
    /// Layering info for a single temporal layer.
    pub fn with_temporal_idx(temporal_idx: u8) -> Self {
        Vp8Info {
            temporal_idx: Some(temporal_idx),
            ..Default::default()
        }
    }
}

/// VP9 layering information reported by the encoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vp9Info {
    /// This is the first (lowest) spatial layer of a picture.
    pub first_frame_in_picture: bool,
    /// This is the last spatial layer of a picture.
    pub end_of_picture: bool,
    /// Temporal layer of the frame. `None` when the stream has no temporal layering.
    pub temporal_idx: Option<u8>,
    /// Number of spatial layers in the picture.
    pub num_spatial_layers: u8,
    /// The frame predicts from earlier pictures.
    pub inter_pic_predicted: bool,
    /// Flexible mode (explicit reference indices) is in use.
    pub flexible_mode: bool,
    /// Switching up to a higher temporal layer is possible at this frame.
    pub temporal_up_switch: bool,
    /// The frame predicts from a lower spatial layer of the same picture.
    pub inter_layer_predicted: bool,
    /// Higher spatial layers of the same picture do not predict from this frame.
    pub non_ref_for_inter_layer_pred: bool,
}

/// H.264 packetization modes, RFC 6184.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum H264PacketizationMode {
    /// Mode 1, STAP-A and FU-A allowed.
    #[default]
    NonInterleaved,
    /// Mode 0, one NAL unit per packet.
    SingleNalUnit,
}

/// H.264 information reported by the encoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct H264Info {
    /// How the frame is going to be packetized.
    pub packetization_mode: H264PacketizationMode,
}

/// Codec specific description of an encoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CodecSpecificInfo {
    Vp8(Vp8Info),
    Vp9(Vp9Info),
    H264(H264Info),
    Generic,
}

impl CodecSpecificInfo {
    /// The codec family of this info.
    pub fn codec(&self) -> Codec {
        match self {
            CodecSpecificInfo::Vp8(_) => Codec::Vp8,
            CodecSpecificInfo::Vp9(_) => Codec::Vp9,
            CodecSpecificInfo::H264(_) => Codec::H264,
            CodecSpecificInfo::Generic => Codec::Generic,
        }
    }
}
