use crate::config::PayloadConfig;
use crate::rtp::Ssrc;
use crate::video::{CodecSpecificInfo, EncodedFrame, GenericDescriptorInfo, H264Header};
use crate::video::{RtpVideoHeader, VideoTypeHeader, Vp8Header, Vp8Info, Vp9Header, Vp9Info};
use crate::video::{MAX_TEMPORAL_LAYERS, VP8_NUM_BUFFERS};

use super::{BufferReferenceTable, LayerFrameIds, LayerId, PayloadState};

/// Derives RTP video headers for the frames of one outgoing stream.
///
/// Keeps the picture id and tl0 pic idx sequences continuous, and for VP8
/// translates the encoder's reference buffer usage into explicit frame
/// dependencies expressed in the shared frame id space of the call.
///
/// ```
/// use str0m_framedeps::{FrameDependencyTranslator, PayloadConfig, PayloadState};
/// use str0m_framedeps::video::{CodecSpecificInfo, EncodedFrame, FrameType, Vp8Info};
///
/// let state = PayloadState::new(222, 99);
/// let mut t = FrameDependencyTranslator::new(1.into(), Some(state), &PayloadConfig::new());
///
/// let frame = EncodedFrame::new(FrameType::Key);
/// let info = CodecSpecificInfo::Vp8(Vp8Info::default());
/// let header = t.rtp_video_header(&frame, &info, 0);
///
/// assert_eq!(header.video_type.vp8().unwrap().picture_id, Some(223));
/// assert_eq!(t.state(), PayloadState::new(223, 100));
/// ```
///
/// Not synchronized. Each outgoing stream owns its translator.
#[derive(Debug)]
pub struct FrameDependencyTranslator {
    ssrc: Ssrc,
    state: PayloadState,
    buffers: BufferReferenceTable,
    layers: LayerFrameIds,
    generic_frame_id: i64,
    generic_descriptor: bool,
    generic_picture_id: bool,
}

impl FrameDependencyTranslator {
    /// Creates a translator for `ssrc`, continuing from `state` if given.
    pub fn new(ssrc: Ssrc, state: Option<PayloadState>, config: &PayloadConfig) -> Self {
        let state = state.unwrap_or_else(|| config.initial_state(ssrc));

        FrameDependencyTranslator {
            ssrc,
            state,
            buffers: BufferReferenceTable::default(),
            layers: LayerFrameIds::default(),
            generic_frame_id: 0,
            generic_descriptor: config.generic_descriptor,
            generic_picture_id: config.generic_picture_id,
        }
    }

    /// The stream this translator belongs to.
    pub fn ssrc(&self) -> Ssrc {
        self.ssrc
    }

    /// Snapshot of the picture id and tl0 pic idx last handed out.
    pub fn state(&self) -> PayloadState {
        self.state
    }

    /// Produces the RTP video header for an encoded frame.
    ///
    /// `shared_frame_id` is the id of the frame in the call wide frame id
    /// space, used to express dependencies in the generic frame descriptor.
    pub fn rtp_video_header(
        &mut self,
        frame: &EncodedFrame,
        info: &CodecSpecificInfo,
        shared_frame_id: i64,
    ) -> RtpVideoHeader {
        let mut header = RtpVideoHeader {
            codec: info.codec(),
            video_type: VideoTypeHeader::None,
            generic: None,
            frame_type: frame.frame_type,
            rotation: frame.rotation,
            content_type: frame.content_type,
            simulcast_idx: frame.spatial_index.unwrap_or(0),
            width: frame.width,
            height: frame.height,
            target_bitrate: frame.target_bitrate,
        };

        match info {
            CodecSpecificInfo::Vp8(vp8) => {
                header.video_type = VideoTypeHeader::Vp8(self.vp8_header(vp8));

                if self.generic_descriptor {
                    header.generic = self.vp8_to_generic(vp8, shared_frame_id, frame.is_keyframe());
                }
            }
            CodecSpecificInfo::Vp9(vp9) => {
                header.video_type = VideoTypeHeader::Vp9(self.vp9_header(vp9, frame.spatial_index));
            }
            CodecSpecificInfo::H264(h264) => {
                header.video_type = VideoTypeHeader::H264(H264Header {
                    packetization_mode: h264.packetization_mode,
                });
            }
            CodecSpecificInfo::Generic => {
                if self.generic_picture_id {
                    let frame_id = self.generic_frame_id;
                    self.generic_frame_id += 1;

                    header.generic = Some(GenericDescriptorInfo {
                        frame_id,
                        ..Default::default()
                    });
                }
            }
        }

        trace!(
            "Frame {} on {}: {:?} {:?}",
            shared_frame_id,
            self.ssrc,
            header.video_type,
            header.generic
        );

        header
    }

    fn vp8_header(&mut self, vp8: &Vp8Info) -> Vp8Header {
        // Picture id moves on every frame, tl0 pic idx only on the base layer.
        let picture_id = self.state.increment_picture_id();

        if matches!(vp8.temporal_idx, None | Some(0)) {
            self.state.increment_tl0_pic_idx();
        }

        Vp8Header {
            picture_id: Some(picture_id),
            tl0_pic_idx: vp8.temporal_idx.map(|_| self.state.tl0_pic_idx()),
            temporal_idx: vp8.temporal_idx,
            layer_sync: vp8.layer_sync,
            key_idx: vp8.key_idx,
            non_reference: vp8.non_reference,
        }
    }

    fn vp9_header(&mut self, vp9: &Vp9Info, spatial_index: Option<usize>) -> Vp9Header {
        // All spatial layers of a picture share picture id.
        if vp9.first_frame_in_picture {
            self.state.increment_picture_id();
        }

        let spatial_idx = spatial_index.and_then(|s| match u8::try_from(s) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Spatial index {} doesn't fit the VP9 descriptor", s);
                None
            }
        });

        // Without temporal layers but with spatial layers, packets still carry
        // layer info with temporal index 0, which means tl0 pic idx is needed.
        let tl0_pic_idx = if vp9.temporal_idx.is_some() || spatial_index.is_some() {
            if vp9.first_frame_in_picture && matches!(vp9.temporal_idx, None | Some(0)) {
                self.state.increment_tl0_pic_idx();
            }
            Some(self.state.tl0_pic_idx())
        } else {
            None
        };

        Vp9Header {
            picture_id: Some(self.state.picture_id()),
            tl0_pic_idx,
            temporal_idx: vp9.temporal_idx,
            spatial_idx,
            num_spatial_layers: vp9.num_spatial_layers,
            first_frame_in_picture: vp9.first_frame_in_picture,
            end_of_picture: vp9.end_of_picture,
            inter_pic_predicted: vp9.inter_pic_predicted,
            flexible_mode: vp9.flexible_mode,
            temporal_up_switch: vp9.temporal_up_switch,
            inter_layer_predicted: vp9.inter_layer_predicted,
            non_ref_for_inter_layer_pred: vp9.non_ref_for_inter_layer_pred,
        }
    }

    fn vp8_to_generic(
        &mut self,
        vp8: &Vp8Info,
        shared_frame_id: i64,
        is_keyframe: bool,
    ) -> Option<GenericDescriptorInfo> {
        // VP8 without SVC, everything is on spatial layer 0.
        const SPATIAL_INDEX: usize = 0;

        let temporal_index = vp8.temporal_idx.unwrap_or(0) as usize;

        if temporal_index >= MAX_TEMPORAL_LAYERS {
            warn!(
                "Temporal index {} too high for generic frame descriptor (max {})",
                temporal_index, MAX_TEMPORAL_LAYERS
            );
            return None;
        }

        let mut generic = GenericDescriptorInfo {
            frame_id: shared_frame_id,
            spatial_index: SPATIAL_INDEX,
            temporal_index,
            ..Default::default()
        };

        if is_keyframe {
            if temporal_index != 0 {
                debug!("Keyframe {} on temporal layer {}", shared_frame_id, temporal_index);
            }
            // A keyframe refreshes every reference buffer.
            self.buffers.fill(shared_frame_id);
            self.layers.clear_spatial(SPATIAL_INDEX);
        } else {
            for buffer in (0..VP8_NUM_BUFFERS).filter(|i| vp8.referenced_buffers[*i]) {
                let Some(frame_id) = self.buffers.get(buffer) else {
                    warn!(
                        "Frame {} references VP8 buffer {} that was never updated",
                        shared_frame_id, buffer
                    );
                    continue;
                };

                if frame_id >= shared_frame_id {
                    warn!(
                        "Frame {} references buffer {} holding later frame {}",
                        shared_frame_id, buffer, frame_id
                    );
                }

                generic.dependencies.insert(frame_id);
            }

            if vp8.layer_sync {
                let tl0 = self.layers.get(LayerId::new(SPATIAL_INDEX, 0));
                if generic.dependencies.iter().any(|d| Some(*d) != tl0) {
                    debug!(
                        "Layer sync frame {} depends on more than base layer frame {:?}: {:?}",
                        shared_frame_id, tl0, generic.dependencies
                    );
                }
            }
        }

        for buffer in (0..VP8_NUM_BUFFERS).filter(|i| vp8.updated_buffers[*i]) {
            self.buffers.update(buffer, shared_frame_id);
        }

        self.layers
            .update(LayerId::new(SPATIAL_INDEX, temporal_index), shared_frame_id);

        Some(generic)
    }
}
