#![allow(unused)]
use std::sync::Once;

use str0m_framedeps::video::{CodecSpecificInfo, EncodedFrame, FrameType, Vp8Info};
use str0m_framedeps::video::VP8_NUM_BUFFERS;

pub fn init_log() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    static START: Once = Once::new();

    START.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter)
            .init();
    });
}

pub fn frame(frame_type: FrameType, width: u16, height: u16) -> EncodedFrame {
    EncodedFrame {
        width,
        height,
        ..EncodedFrame::new(frame_type)
    }
}

/// VP8 info where the frame references at most one buffer and updates the
/// buffer with the same index as its temporal layer. Keyframes update all.
pub fn vp8_layered(
    temporal_idx: u8,
    layer_sync: bool,
    referenced_buffer: Option<usize>,
) -> CodecSpecificInfo {
    let is_key = referenced_buffer.is_none();

    let mut info = Vp8Info {
        layer_sync,
        ..Vp8Info::with_temporal_idx(temporal_idx)
    };

    for i in 0..VP8_NUM_BUFFERS {
        info.referenced_buffers[i] = referenced_buffer == Some(i);
        info.updated_buffers[i] = is_key || i == temporal_idx as usize;
    }

    CodecSpecificInfo::Vp8(info)
}
