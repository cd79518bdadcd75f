//! Processing of RTC event logs in global order.
//!
//! An event log is parsed into one list per event type, each sorted by log
//! time. Log times only have millisecond precision and batches of different
//! types are not ordered with respect to each other, so treating the lists as
//! one sequence needs a tie breaking rule. [`EventProcessor`] merges the lists
//! the way a merge sort would, without copying or modifying them, and breaks
//! ties with [`TypeOrder`], transport-wide sequence numbers and finally the
//! order the lists were added in.
//!
//! ```
//! use std::cell::RefCell;
//! use str0m_framedeps::event_log::{EventProcessor, LoggedRtcpPacketIncoming};
//! use str0m_framedeps::event_log::{LoggedRtpPacket, LoggedRtpPacketIncoming};
//!
//! let rtcp = vec![LoggedRtcpPacketIncoming::new(10, vec![0x80, 0xc9, 0, 1])];
//! let rtp = vec![LoggedRtpPacketIncoming::new(LoggedRtpPacket::new(10, 1.into(), 0))];
//!
//! let order = RefCell::new(vec![]);
//!
//! let mut processor = EventProcessor::new();
//! processor.add_events(&rtcp, |_| order.borrow_mut().push("rtcp"));
//! processor.add_events(&rtp, |_| order.borrow_mut().push("rtp"));
//! processor.process_events_in_order();
//!
//! // Same log time, but incoming RTP is ordered before incoming RTCP.
//! assert_eq!(*order.borrow(), ["rtp", "rtcp"]);
//! ```

mod events;
pub use events::*;

mod order;
pub use order::{DirectedMergeOrder, MergeOrder, TypeOrder};

mod processor;
pub use processor::EventProcessor;

/// An entry in the event log.
pub trait LoggedEvent {
    /// Time the event was logged, in microseconds.
    fn log_time_us(&self) -> i64;
}

/// Direction of a logged packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketDirection {
    /// Received from the remote peer.
    Incoming,
    /// Sent to the remote peer.
    Outgoing,
}
