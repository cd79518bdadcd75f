use super::events::*;
use super::{LoggedEvent, PacketDirection};

/// Tie breaking rank of an event type.
///
/// Events logged at the same time are processed in the declaration order of
/// their type. The order puts configuration before the traffic it applies
/// to, incoming packets before the estimates they cause, and those before
/// the outgoing packets sent as a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TypeOrder {
    Start,
    // Configuration and connectivity
    StreamConfig,
    IceCandidateConfig,
    IceCandidateEvent,
    DtlsTransportState,
    DtlsWritable,
    RouteChange,
    // Incoming packets
    RtpIn,
    RtcpIn,
    GenericPacketIn,
    GenericAckIn,
    // Bandwidth estimation
    BweRemoteEstimate,
    BweProbeFailure,
    BweProbeSuccess,
    BweDelayBased,
    BweLossBased,
    BweProbeCreated,
    // Audio and video
    AudioNetworkAdaptation,
    NetEqSetMinDelay,
    AudioPlayout,
    FrameDecoded,
    // Outgoing packets
    RtpOut,
    RtcpOut,
    GenericPacketOut,
    // Other
    AlrState,
    Stop,
}

/// Event type with a fixed place in the processing order.
pub trait MergeOrder: LoggedEvent {
    /// Tie breaking rank of the type.
    const TYPE_ORDER: TypeOrder;

    /// Transport-wide sequence number, if the event carries one.
    fn transport_seq_num(&self) -> Option<u16> {
        None
    }
}

/// Event type whose place in the processing order depends on whether it
/// was received or sent.
pub trait DirectedMergeOrder: LoggedEvent {
    /// Tie breaking rank of the type in the given direction.
    fn type_order(direction: PacketDirection) -> TypeOrder;

    /// Transport-wide sequence number, if the event carries one.
    fn transport_seq_num(&self) -> Option<u16> {
        None
    }
}

macro_rules! merge_order {
    ($($t:ty => $order:ident),* $(,)?) => {
        $(
            impl MergeOrder for $t {
                const TYPE_ORDER: TypeOrder = TypeOrder::$order;
            }
        )*
    };
}

macro_rules! directed_merge_order {
    ($($t:ty => $in:ident, $out:ident),* $(,)?) => {
        $(
            impl DirectedMergeOrder for $t {
                fn type_order(direction: PacketDirection) -> TypeOrder {
                    match direction {
                        PacketDirection::Incoming => TypeOrder::$in,
                        PacketDirection::Outgoing => TypeOrder::$out,
                    }
                }
            }
        )*
    };
}

merge_order!(
    LoggedStartEvent => Start,
    LoggedStopEvent => Stop,
    LoggedAudioRecvConfig => StreamConfig,
    LoggedAudioSendConfig => StreamConfig,
    LoggedVideoRecvConfig => StreamConfig,
    LoggedVideoSendConfig => StreamConfig,
    LoggedIceCandidatePairConfig => IceCandidateConfig,
    LoggedIceCandidatePairEvent => IceCandidateEvent,
    LoggedDtlsTransportState => DtlsTransportState,
    LoggedDtlsWritableState => DtlsWritable,
    LoggedRouteChangeEvent => RouteChange,
    LoggedRemoteEstimateEvent => BweRemoteEstimate,
    LoggedBweProbeFailureEvent => BweProbeFailure,
    LoggedBweProbeSuccessEvent => BweProbeSuccess,
    LoggedBweDelayBasedUpdate => BweDelayBased,
    LoggedBweLossBasedUpdate => BweLossBased,
    LoggedBweProbeClusterCreatedEvent => BweProbeCreated,
    LoggedAudioNetworkAdaptationEvent => AudioNetworkAdaptation,
    LoggedNetEqSetMinimumDelayEvent => NetEqSetMinDelay,
    LoggedAudioPlayoutEvent => AudioPlayout,
    LoggedFrameDecoded => FrameDecoded,
    LoggedGenericPacketReceived => GenericPacketIn,
    LoggedGenericPacketSent => GenericPacketOut,
    LoggedGenericAckReceived => GenericAckIn,
    LoggedAlrStateEvent => AlrState,
    LoggedRtcpPacketIncoming => RtcpIn,
    LoggedRtcpPacketOutgoing => RtcpOut,
);

directed_merge_order!(
    LoggedRtcpPacket => RtcpIn, RtcpOut,
    LoggedRtcpPacketTransportFeedback => RtcpIn, RtcpOut,
    LoggedRtcpPacketReceiverReport => RtcpIn, RtcpOut,
);

impl MergeOrder for LoggedRtpPacketIncoming {
    const TYPE_ORDER: TypeOrder = TypeOrder::RtpIn;

    fn transport_seq_num(&self) -> Option<u16> {
        self.rtp.transport_sequence_number
    }
}

impl MergeOrder for LoggedRtpPacketOutgoing {
    const TYPE_ORDER: TypeOrder = TypeOrder::RtpOut;

    fn transport_seq_num(&self) -> Option<u16> {
        self.rtp.transport_sequence_number
    }
}

impl DirectedMergeOrder for LoggedRtpPacket {
    fn type_order(direction: PacketDirection) -> TypeOrder {
        match direction {
            PacketDirection::Incoming => TypeOrder::RtpIn,
            PacketDirection::Outgoing => TypeOrder::RtpOut,
        }
    }

    fn transport_seq_num(&self) -> Option<u16> {
        self.transport_sequence_number
    }
}

impl DirectedMergeOrder for LoggedPacketInfo {
    fn type_order(direction: PacketDirection) -> TypeOrder {
        match direction {
            PacketDirection::Incoming => TypeOrder::RtpIn,
            PacketDirection::Outgoing => TypeOrder::RtpOut,
        }
    }

    fn transport_seq_num(&self) -> Option<u16> {
        self.transport_seq_no
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn incoming_before_outgoing() {
        assert!(TypeOrder::Start < TypeOrder::StreamConfig);
        assert!(TypeOrder::RtpIn < TypeOrder::RtcpIn);
        assert!(TypeOrder::RtcpIn < TypeOrder::BweDelayBased);
        assert!(TypeOrder::BweDelayBased < TypeOrder::RtpOut);
        assert!(TypeOrder::RtpOut < TypeOrder::Stop);
    }

    #[test]
    fn stop_is_last() {
        assert_eq!(LoggedStopEvent::TYPE_ORDER, TypeOrder::Stop);
        assert_eq!(LoggedStartEvent::TYPE_ORDER, TypeOrder::Start);
    }

    #[test]
    fn directed_types() {
        assert_eq!(
            LoggedRtpPacket::type_order(PacketDirection::Incoming),
            TypeOrder::RtpIn
        );
        assert_eq!(
            LoggedRtcpPacketTransportFeedback::type_order(PacketDirection::Outgoing),
            TypeOrder::RtcpOut
        );
    }

    #[test]
    fn rtp_carries_transport_seq_num() {
        let rtp = LoggedRtpPacket::new(0, 1.into(), 7).with_transport_sequence_number(42);
        assert_eq!(DirectedMergeOrder::transport_seq_num(&rtp), Some(42));

        let incoming = LoggedRtpPacketIncoming::new(rtp);
        assert_eq!(MergeOrder::transport_seq_num(&incoming), Some(42));

        let info = LoggedPacketInfo {
            log_time_us: 0,
            ssrc: 1.into(),
            stream_seq_no: 7,
            size: 1200,
            payload_size: 1100,
            padding_size: 0,
            rtx: false,
            transport_seq_no: Some(43),
        };
        assert_eq!(info.transport_seq_num(), Some(43));
        assert_eq!(
            LoggedPacketInfo::type_order(PacketDirection::Outgoing),
            TypeOrder::RtpOut
        );

        let rtcp = LoggedRtcpPacketIncoming::new(0, vec![]);
        assert_eq!(rtcp.transport_seq_num(), None);
    }
}
