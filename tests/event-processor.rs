use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use str0m_framedeps::event_log::*;
use str0m_framedeps::rtp::Ssrc;

mod common;
use common::init_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    Start,
    Config,
    RtpIn(u16),
    RtcpIn,
    DelayBased,
    RtpOut(u16),
    Stop,
}

fn rtp(time: i64, tseq: u16) -> LoggedRtpPacket {
    LoggedRtpPacket::new(time, Ssrc::from(1), tseq).with_transport_sequence_number(tseq)
}

#[test]
fn same_time_rtp_in_before_rtcp_in() {
    init_log();

    let a = vec![LoggedRtpPacketIncoming::new(rtp(10, 0))];
    let b = vec![LoggedRtcpPacketIncoming::new(10, vec![0x80, 0xc8, 0, 6])];

    // Registration order does not matter.
    for rtp_first in [true, false] {
        let seen = RefCell::new(vec![]);
        let mut p = EventProcessor::new();

        if rtp_first {
            p.add_events(&a, |e| seen.borrow_mut().push(Seen::RtpIn(e.rtp.sequence_number)));
            p.add_events(&b, |_| seen.borrow_mut().push(Seen::RtcpIn));
        } else {
            p.add_events(&b, |_| seen.borrow_mut().push(Seen::RtcpIn));
            p.add_events(&a, |e| seen.borrow_mut().push(Seen::RtpIn(e.rtp.sequence_number)));
        }

        p.process_events_in_order();
        assert_eq!(seen.into_inner(), [Seen::RtpIn(0), Seen::RtcpIn]);
    }
}

#[test]
fn call_log_in_type_order() {
    init_log();

    let start = vec![LoggedStartEvent {
        log_time_us: 0,
        utc_start_time_ms: Some(1_600_000_000_000),
    }];
    let stop = vec![LoggedStopEvent { log_time_us: 3000 }];
    let config = vec![LoggedVideoSendConfig {
        log_time_us: 0,
        config: StreamConfig {
            local_ssrc: Ssrc::from(1),
            remote_ssrc: Ssrc::from(2),
            rtx_ssrc: None,
        },
    }];
    let rtp_in = vec![rtp(1000, 7), rtp(2000, 8)];
    let rtp_out = vec![rtp(1000, 100), rtp(3000, 101)];
    let delay_based = vec![LoggedBweDelayBasedUpdate {
        log_time_us: 1000,
        bitrate: 300_000.into(),
        detector_state: BandwidthUsage::Normal,
    }];

    let seen = RefCell::new(vec![]);
    let mut p = EventProcessor::new();

    // Registered in reverse of the expected order on purpose.
    p.add_events(&stop, |_| seen.borrow_mut().push(Seen::Stop));
    p.add_events_dir(
        &rtp_out,
        |e| seen.borrow_mut().push(Seen::RtpOut(e.sequence_number)),
        PacketDirection::Outgoing,
    );
    p.add_events(&delay_based, |_| seen.borrow_mut().push(Seen::DelayBased));
    p.add_events_dir(
        &rtp_in,
        |e| seen.borrow_mut().push(Seen::RtpIn(e.sequence_number)),
        PacketDirection::Incoming,
    );
    p.add_events(&config, |_| seen.borrow_mut().push(Seen::Config));
    p.add_events(&start, |_| seen.borrow_mut().push(Seen::Start));

    assert_eq!(p.sequence_count(), 6);
    p.process_events_in_order();

    assert_eq!(
        seen.into_inner(),
        [
            Seen::Start,
            Seen::Config,
            Seen::RtpIn(7),
            Seen::DelayBased,
            Seen::RtpOut(100),
            Seen::RtpIn(8),
            Seen::RtpOut(101),
            Seen::Stop,
        ]
    );
}

#[test]
fn explicit_type_order_and_accessor() {
    init_log();

    // Raw tuples of (log time, transport seq num).
    struct Raw(i64, u16);
    impl LoggedEvent for Raw {
        fn log_time_us(&self) -> i64 {
            self.0
        }
    }

    let a = vec![Raw(5, 11)];
    let b = vec![Raw(5, 10)];
    let seen = RefCell::new(vec![]);

    let mut p = EventProcessor::new();
    p.add_events_with(&a, |e| seen.borrow_mut().push(e.1), TypeOrder::RtpIn, |e| Some(e.1));
    p.add_events_with(&b, |e| seen.borrow_mut().push(e.1), TypeOrder::RtpIn, |e| Some(e.1));
    p.process_events_in_order();

    // Same time and type, the lower sequence number wins over insertion order.
    assert_eq!(seen.into_inner(), [10, 11]);
}

#[test]
fn randomized_merge_visits_everything_in_order() {
    init_log();

    let mut rng = StdRng::seed_from_u64(42);

    // Several lists of outgoing RTP with a shared, increasing transport seq
    // num space that wraps, as a pacer spreading packets over streams would.
    let mut next_tseq: u16 = 65000;
    let mut lists: Vec<Vec<LoggedRtpPacketOutgoing>> = vec![vec![]; 4];

    let mut time = 0;
    for _ in 0..1000 {
        time += rng.random_range(0..3) * 1000;
        let list = rng.random_range(0..lists.len());
        lists[list].push(LoggedRtpPacketOutgoing::new(rtp(time, next_tseq)));
        next_tseq = next_tseq.wrapping_add(1);
    }

    let seen = RefCell::new(vec![]);
    let mut p = EventProcessor::new();
    for list in &lists {
        p.add_events(list, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number.unwrap())
        });
    }
    p.process_events_in_order();

    // Transport seq nums were handed out in processing order.
    let seen = seen.into_inner();
    assert_eq!(seen.len(), 1000);
    for (i, tseq) in seen.iter().enumerate() {
        assert_eq!(*tseq, 65000_u16.wrapping_add(i as u16));
    }
}
