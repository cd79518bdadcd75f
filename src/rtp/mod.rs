//! RTP level primitives shared by the payload and event log modules.

mod id;
pub use id::Ssrc;

mod seq;
pub use seq::SeqNoUnwrapper;

mod bandwidth;
pub use bandwidth::Bitrate;

/// Largest two byte picture id. VP8 and VP9 picture ids wrap to 0 after this.
pub const MAX_TWO_BYTE_PICTURE_ID: u16 = 0x7fff;
