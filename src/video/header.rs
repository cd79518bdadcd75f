use std::collections::BTreeSet;

use super::{Codec, ContentType, FrameType, H264PacketizationMode, VideoRotation};
use crate::rtp::Bitrate;

/// Everything the packetizer needs to know about a frame to fill in RTP
/// payload descriptors and header extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpVideoHeader {
    /// Codec family of the frame.
    pub codec: Codec,
    /// Codec specific payload descriptor fields.
    pub video_type: VideoTypeHeader,
    /// Generic frame descriptor. Absent when the dependency structure can't be
    /// expressed, in which case receivers rely on the codec specific fields.
    pub generic: Option<GenericDescriptorInfo>,
    /// Key or delta frame.
    pub frame_type: FrameType,
    /// Rotation of the frame.
    pub rotation: VideoRotation,
    /// Content type of the frame.
    pub content_type: ContentType,
    /// Index of the RTP stream (simulcast layer) the frame goes out on.
    pub simulcast_idx: usize,
    /// Encoded width in pixels.
    pub width: u16,
    /// Encoded height in pixels.
    pub height: u16,
    /// Target bitrate of the frame's layer.
    pub target_bitrate: Option<Bitrate>,
}

/// Codec specific part of [`RtpVideoHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum VideoTypeHeader {
    None,
    Vp8(Vp8Header),
    Vp9(Vp9Header),
    H264(H264Header),
}

impl VideoTypeHeader {
    /// The VP8 descriptor, if this is VP8.
    pub fn vp8(&self) -> Option<&Vp8Header> {
        match self {
            VideoTypeHeader::Vp8(v) => Some(v),
            _ => None,
        }
    }

    /// The VP9 descriptor, if this is VP9.
    pub fn vp9(&self) -> Option<&Vp9Header> {
        match self {
            VideoTypeHeader::Vp9(v) => Some(v),
            _ => None,
        }
    }

    /// The H.264 descriptor, if this is H.264.
    pub fn h264(&self) -> Option<&H264Header> {
        match self {
            VideoTypeHeader::H264(v) => Some(v),
            _ => None,
        }
    }
}

/// VP8 payload descriptor fields, RFC 7741.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vp8Header {
    /// 15 bit picture id.
    pub picture_id: Option<u16>,
    /// Index of the last temporal layer 0 frame. Only set with temporal layering.
    pub tl0_pic_idx: Option<u8>,
    /// Temporal layer of the frame.
    pub temporal_idx: Option<u8>,
    /// The Y bit, frame is a layer sync point.
    pub layer_sync: bool,
    /// Key index.
    pub key_idx: Option<u8>,
    /// The N bit, frame can be discarded.
    pub non_reference: bool,
}

/// VP9 payload descriptor fields, RFC 9628.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vp9Header {
    /// 15 bit picture id, shared by all spatial layers of a picture.
    pub picture_id: Option<u16>,
    /// Index of the last temporal layer 0 picture. Only set with layering.
    pub tl0_pic_idx: Option<u8>,
    /// Temporal layer of the frame.
    pub temporal_idx: Option<u8>,
    /// Spatial layer of the frame.
    pub spatial_idx: Option<u8>,
    /// Number of spatial layers in the picture.
    pub num_spatial_layers: u8,
    /// First spatial layer of the picture.
    pub first_frame_in_picture: bool,
    /// Last spatial layer of the picture.
    pub end_of_picture: bool,
    /// The P bit.
    pub inter_pic_predicted: bool,
    /// The F bit.
    pub flexible_mode: bool,
    /// The U bit.
    pub temporal_up_switch: bool,
    /// The D bit.
    pub inter_layer_predicted: bool,
    /// The Z bit.
    pub non_ref_for_inter_layer_pred: bool,
}

/// H.264 payload fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct H264Header {
    /// Packetization mode to use for the frame.
    pub packetization_mode: H264PacketizationMode,
}

/// Codec agnostic description of a frame and the frames it depends on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenericDescriptorInfo {
    /// Id of the frame, from the shared frame id space of the call.
    pub frame_id: i64,
    /// Spatial layer of the frame.
    pub spatial_index: usize,
    /// Temporal layer of the frame.
    pub temporal_index: usize,
    /// Frame ids this frame needs to be decodable. Empty for keyframes.
    pub dependencies: BTreeSet<i64>,
    /// Spatial layers above this one that exist in the same picture.
    pub higher_spatial_layers: BTreeSet<usize>,
}
