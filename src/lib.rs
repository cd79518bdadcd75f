//! RTP payload descriptors for outgoing video and ordered processing of RTC
//! event logs, in [Sans I/O][sansio] style.
//!
//! Nothing in this crate does network talking, owns threads or reads the
//! clock. All operations happen from calls of the public API.
//!
//! # Frame dependencies
//!
//! A video encoder hands over an [`EncodedFrame`][video::EncodedFrame] and a
//! [`CodecSpecificInfo`][video::CodecSpecificInfo] for every frame. The
//! [`FrameDependencyTranslator`] of the RTP stream turns these into an
//! [`RtpVideoHeader`][video::RtpVideoHeader] carrying
//!
//! * codec specific payload descriptor fields, such as VP8/VP9 picture id
//!   and tl0 pic idx, which continue across encoder reconfiguration,
//! * a generic frame descriptor for VP8, which lists the frame ids each
//!   frame depends on in place of the codec's reference buffers.
//!
//! ```
//! use str0m_framedeps::{FrameDependencyTranslator, PayloadConfig, PayloadState};
//! use str0m_framedeps::video::{CodecSpecificInfo, EncodedFrame, FrameType, Vp8Info};
//!
//! let config = PayloadConfig::new();
//! let mut translator = FrameDependencyTranslator::new(1.into(), None, &config);
//!
//! let frame = EncodedFrame::new(FrameType::Key);
//! let info = CodecSpecificInfo::Vp8(Vp8Info::with_temporal_idx(0));
//!
//! let header = translator.rtp_video_header(&frame, &info, 0);
//!
//! let generic = header.generic.unwrap();
//! assert_eq!(generic.frame_id, 0);
//! assert!(generic.dependencies.is_empty());
//! assert_eq!(translator.state(), PayloadState::new(1, 1));
//! ```
//!
//! With simulcast, a [`PayloadRouter`] holds one translator per SSRC and
//! picks the stream from the frame's spatial index.
//!
//! # Event logs
//!
//! The [`event_log`] module merges the per type event lists of a parsed RTC
//! event log and feeds every event to its handler in a deterministic global
//! order. See [`EventProcessor`][event_log::EventProcessor].
//!
//! # Logging
//!
//! The crate logs through [`tracing`]. Anomalies in the encoder's output,
//! such as references to reference buffers that were never written, are
//! logged at `warn` and otherwise ignored.
//!
//! [sansio]: https://sans-io.readthedocs.io

#![forbid(unsafe_code)]
#![allow(clippy::new_without_default)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

use thiserror::Error;

mod config;
pub use config::PayloadConfig;

pub mod rtp;

pub mod video;

mod payload;
pub use payload::{FrameDependencyTranslator, LayerId, PayloadRouter, PayloadState};

pub mod event_log;

/// Various error types.
pub mod error {
    pub use crate::payload::PayloadError;
}

/// Errors for the whole crate.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameDepsError {
    /// Payload routing errors.
    #[error("{0}")]
    Payload(#[from] error::PayloadError),
}
