use crate::rtp::{Bitrate, Ssrc};
use crate::video::Codec;

use super::LoggedEvent;

macro_rules! logged_event {
    ($($t:ty),* $(,)?) => {
        $(
            impl LoggedEvent for $t {
                fn log_time_us(&self) -> i64 {
                    self.log_time_us
                }
            }
        )*
    };
}

/// Start of logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedStartEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Wall clock time logging started, if known.
    pub utc_start_time_ms: Option<i64>,
}

/// End of logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedStopEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
}

/// SSRCs of a configured media stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Our SSRC.
    pub local_ssrc: Ssrc,
    /// The remote peer's SSRC.
    pub remote_ssrc: Ssrc,
    /// SSRC used for retransmissions, if any.
    pub rtx_ssrc: Option<Ssrc>,
}

/// Configuration of an audio receive stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAudioRecvConfig {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The stream.
    pub config: StreamConfig,
}

/// Configuration of an audio send stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAudioSendConfig {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The stream.
    pub config: StreamConfig,
}

/// Configuration of a video receive stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedVideoRecvConfig {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The stream.
    pub config: StreamConfig,
}

/// Configuration of a video send stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedVideoSendConfig {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The stream.
    pub config: StreamConfig,
}

/// An ICE candidate pair was added, updated or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedIceCandidatePairConfig {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Id of the pair.
    pub candidate_pair_id: u32,
}

/// Connectivity check activity on an ICE candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedIceCandidatePairEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Id of the pair.
    pub candidate_pair_id: u32,
    /// STUN transaction id of the check.
    pub transaction_id: u32,
}

/// State of the DTLS transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DtlsTransportState {
    New,
    Connecting,
    Connected,
    Closed,
    Failed,
}

/// The DTLS transport changed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedDtlsTransportState {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// New state.
    pub state: DtlsTransportState,
}

/// The DTLS transport became (un)writable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedDtlsWritableState {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Whether it's writable.
    pub writable: bool,
}

/// The network route changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRouteChangeEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Whether the route is connected.
    pub connected: bool,
    /// Per packet overhead of the route in bytes.
    pub overhead: u32,
}

/// Link capacity estimate received from the remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRemoteEstimateEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Lower bound of the link capacity.
    pub link_capacity_lower: Option<Bitrate>,
    /// Upper bound of the link capacity.
    pub link_capacity_upper: Option<Bitrate>,
}

/// Why a bandwidth probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProbeFailureReason {
    InvalidSendReceiveInterval,
    InvalidSendReceiveRatio,
    Timeout,
}

/// A bandwidth probe cluster failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedBweProbeFailureEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Probe cluster id.
    pub id: i32,
    /// Why it failed.
    pub failure_reason: ProbeFailureReason,
}

/// A bandwidth probe cluster finished with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedBweProbeSuccessEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Probe cluster id.
    pub id: i32,
    /// Estimated bitrate.
    pub bitrate: Bitrate,
}

/// Detector state of the delay based estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BandwidthUsage {
    Normal,
    Underusing,
    Overusing,
}

/// The delay based estimator produced a new estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedBweDelayBasedUpdate {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The estimate.
    pub bitrate: Bitrate,
    /// Detector state.
    pub detector_state: BandwidthUsage,
}

/// The loss based estimator produced a new estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedBweLossBasedUpdate {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The estimate.
    pub bitrate: Bitrate,
    /// Loss fraction in 1/256.
    pub fraction_lost: u8,
    /// Packets expected in the reporting interval.
    pub expected_packets: i32,
}

/// A bandwidth probe cluster was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedBweProbeClusterCreatedEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Probe cluster id.
    pub id: i32,
    /// Target bitrate of the probe.
    pub bitrate: Bitrate,
    /// Minimum number of packets to send.
    pub min_packets: u32,
    /// Minimum number of bytes to send.
    pub min_bytes: u32,
}

/// The audio network adaptor changed encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAudioNetworkAdaptationEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// New encoder bitrate.
    pub bitrate: Option<Bitrate>,
    /// New frame length.
    pub frame_length_ms: Option<i32>,
}

/// NetEq minimum delay was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedNetEqSetMinimumDelayEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Stream the delay applies to.
    pub remote_ssrc: Ssrc,
    /// Minimum delay.
    pub minimum_delay_ms: i32,
}

/// Audio was played out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAudioPlayoutEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Stream played out.
    pub ssrc: Ssrc,
}

/// A video frame was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedFrameDecoded {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Time the frame is to be rendered.
    pub render_time_ms: i64,
    /// Stream of the frame.
    pub ssrc: Ssrc,
    /// Decoded width.
    pub width: u16,
    /// Decoded height.
    pub height: u16,
    /// Codec of the frame.
    pub codec: Codec,
    /// Quantizer of the frame.
    pub qp: u8,
}

/// A non-RTP packet was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedGenericPacketReceived {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Sequence number of the packet.
    pub packet_number: i64,
    /// Size of the packet.
    pub packet_length: usize,
}

/// A non-RTP packet was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedGenericPacketSent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Sequence number of the packet.
    pub packet_number: i64,
    /// Overhead bytes.
    pub overhead_length: usize,
    /// Payload bytes.
    pub payload_length: usize,
    /// Padding bytes.
    pub padding_length: usize,
}

/// An acknowledgement for a non-RTP packet was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedGenericAckReceived {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Sequence number of the packet carrying the ack.
    pub packet_number: i64,
    /// Sequence number acknowledged.
    pub acked_packet_number: i64,
    /// Time the acked packet was received by the remote peer.
    pub receive_acked_packet_time_ms: Option<i64>,
}

/// The pacer entered or left application limited region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAlrStateEvent {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Whether we are application limited.
    pub in_alr: bool,
}

/// Header of a logged RTP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtpPacket {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Stream of the packet.
    pub ssrc: Ssrc,
    /// RTP sequence number.
    pub sequence_number: u16,
    /// RTP timestamp.
    pub timestamp: u32,
    /// Payload type.
    pub payload_type: u8,
    /// Marker bit.
    pub marker: bool,
    /// Transport-wide sequence number header extension, if present.
    pub transport_sequence_number: Option<u16>,
    /// Size of the whole packet including headers.
    pub total_length: usize,
}

impl LoggedRtpPacket {
    /// A packet with the given identity and everything else defaulted.
    pub fn new(log_time_us: i64, ssrc: Ssrc, sequence_number: u16) -> Self {
        LoggedRtpPacket {
            log_time_us,
            ssrc,
            sequence_number,
            timestamp: 0,
            payload_type: 0,
            marker: false,
            transport_sequence_number: None,
            total_length: 0,
        }
    }

    /// Sets the transport-wide sequence number.
    pub fn with_transport_sequence_number(mut self, seq: u16) -> Self {
        self.transport_sequence_number = Some(seq);
        self
    }
}

/// Summary of an RTP packet in either direction, as used for transport
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedPacketInfo {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Stream of the packet.
    pub ssrc: Ssrc,
    /// RTP sequence number.
    pub stream_seq_no: u16,
    /// Size of the whole packet including headers.
    pub size: usize,
    /// Size of the payload.
    pub payload_size: usize,
    /// Size of the padding.
    pub padding_size: usize,
    /// Whether the packet was a retransmission.
    pub rtx: bool,
    /// Transport-wide sequence number, if the packet carried one.
    pub transport_seq_no: Option<u16>,
}

/// A received RTP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtpPacketIncoming {
    /// The packet.
    pub rtp: LoggedRtpPacket,
}

impl LoggedRtpPacketIncoming {
    /// Wraps a packet.
    pub fn new(rtp: LoggedRtpPacket) -> Self {
        LoggedRtpPacketIncoming { rtp }
    }
}

/// A sent RTP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtpPacketOutgoing {
    /// The packet.
    pub rtp: LoggedRtpPacket,
}

impl LoggedRtpPacketOutgoing {
    /// Wraps a packet.
    pub fn new(rtp: LoggedRtpPacket) -> Self {
        LoggedRtpPacketOutgoing { rtp }
    }
}

/// A logged RTCP packet, kept in wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtcpPacket {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// The serialized packet.
    pub raw_data: Vec<u8>,
}

/// A received RTCP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtcpPacketIncoming {
    /// The packet.
    pub rtcp: LoggedRtcpPacket,
}

impl LoggedRtcpPacketIncoming {
    /// Creates an incoming packet.
    pub fn new(log_time_us: i64, raw_data: Vec<u8>) -> Self {
        LoggedRtcpPacketIncoming {
            rtcp: LoggedRtcpPacket {
                log_time_us,
                raw_data,
            },
        }
    }
}

/// A sent RTCP packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtcpPacketOutgoing {
    /// The packet.
    pub rtcp: LoggedRtcpPacket,
}

impl LoggedRtcpPacketOutgoing {
    /// Creates an outgoing packet.
    pub fn new(log_time_us: i64, raw_data: Vec<u8>) -> Self {
        LoggedRtcpPacketOutgoing {
            rtcp: LoggedRtcpPacket {
                log_time_us,
                raw_data,
            },
        }
    }
}

/// A transport-wide congestion control feedback packet, either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtcpPacketTransportFeedback {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// First transport-wide sequence number covered.
    pub base_sequence_number: u16,
    /// Number of packets covered.
    pub packet_status_count: u16,
}

/// A receiver report, either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRtcpPacketReceiverReport {
    /// Log time in microseconds.
    pub log_time_us: i64,
    /// Sender of the report.
    pub sender_ssrc: Ssrc,
    /// Number of report blocks.
    pub report_blocks: u8,
}

logged_event!(
    LoggedStartEvent,
    LoggedStopEvent,
    LoggedAudioRecvConfig,
    LoggedAudioSendConfig,
    LoggedVideoRecvConfig,
    LoggedVideoSendConfig,
    LoggedIceCandidatePairConfig,
    LoggedIceCandidatePairEvent,
    LoggedDtlsTransportState,
    LoggedDtlsWritableState,
    LoggedRouteChangeEvent,
    LoggedRemoteEstimateEvent,
    LoggedBweProbeFailureEvent,
    LoggedBweProbeSuccessEvent,
    LoggedBweDelayBasedUpdate,
    LoggedBweLossBasedUpdate,
    LoggedBweProbeClusterCreatedEvent,
    LoggedAudioNetworkAdaptationEvent,
    LoggedNetEqSetMinimumDelayEvent,
    LoggedAudioPlayoutEvent,
    LoggedFrameDecoded,
    LoggedGenericPacketReceived,
    LoggedGenericPacketSent,
    LoggedGenericAckReceived,
    LoggedAlrStateEvent,
    LoggedRtpPacket,
    LoggedPacketInfo,
    LoggedRtcpPacket,
    LoggedRtcpPacketTransportFeedback,
    LoggedRtcpPacketReceiverReport,
);

impl LoggedEvent for LoggedRtpPacketIncoming {
    fn log_time_us(&self) -> i64 {
        self.rtp.log_time_us
    }
}

impl LoggedEvent for LoggedRtpPacketOutgoing {
    fn log_time_us(&self) -> i64 {
        self.rtp.log_time_us
    }
}

impl LoggedEvent for LoggedRtcpPacketIncoming {
    fn log_time_us(&self) -> i64 {
        self.rtcp.log_time_us
    }
}

impl LoggedEvent for LoggedRtcpPacketOutgoing {
    fn log_time_us(&self) -> i64 {
        self.rtcp.log_time_us
    }
}
