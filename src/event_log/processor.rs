use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::rtp::SeqNoUnwrapper;

use super::{DirectedMergeOrder, LoggedEvent, MergeOrder, PacketDirection, TypeOrder};

/// A list of events being consumed in order, with the handler to call for
/// each event.
trait ProcessableEvents {
    /// Log time of the next event, `None` once all are processed.
    fn next_time(&self) -> Option<i64>;

    /// Transport-wide sequence number of the next event.
    fn transport_seq_num(&self) -> Option<u16>;

    /// Calls the handler for the next event and moves past it.
    fn process_next(&mut self);

    fn is_empty(&self) -> bool;

    fn type_order(&self) -> TypeOrder;

    fn insertion_order(&self) -> usize;
}

struct EventList<'a, T, F, A> {
    events: &'a [T],
    pos: usize,
    handler: F,
    accessor: A,
    type_order: TypeOrder,
    insertion_order: usize,
}

impl<'a, T, F, A> ProcessableEvents for EventList<'a, T, F, A>
where
    T: LoggedEvent,
    F: FnMut(&T),
    A: Fn(&T) -> Option<u16>,
{
    fn next_time(&self) -> Option<i64> {
        self.events.get(self.pos).map(|e| e.log_time_us())
    }

    fn transport_seq_num(&self) -> Option<u16> {
        self.events.get(self.pos).and_then(|e| (self.accessor)(e))
    }

    fn process_next(&mut self) {
        let Some(event) = self.events.get(self.pos) else {
            return;
        };
        (self.handler)(event);
        self.pos += 1;
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.events.len()
    }

    fn type_order(&self) -> TypeOrder {
        self.type_order
    }

    fn insertion_order(&self) -> usize {
        self.insertion_order
    }
}

/// Rank of the transport-wide sequence number. Events carrying one come
/// before events that don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SeqRank {
    Sequenced(i64),
    Unsequenced,
}

/// Processing order of the head of one list. Compared field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapKey {
    time: i64,
    type_order: TypeOrder,
    seq: SeqRank,
    insertion_order: usize,
}

/// Merges several time sorted lists of logged events and calls each list's
/// handler for every event in global order.
///
/// Events are ordered by
///
/// 1. log time,
/// 2. [`TypeOrder`] of the event type,
/// 3. unwrapped transport-wide sequence number, events without one last,
/// 4. the order the lists were added in.
///
/// The lists are borrowed and never copied. Each list must be sorted by log
/// time.
pub struct EventProcessor<'a> {
    lists: Vec<Box<dyn ProcessableEvents + 'a>>,
    unwrappers: HashMap<TypeOrder, SeqNoUnwrapper>,
    num_insertions: usize,
}

impl<'a> EventProcessor<'a> {
    /// Creates an empty processor.
    pub fn new() -> Self {
        EventProcessor {
            lists: vec![],
            unwrappers: HashMap::new(),
            num_insertions: 0,
        }
    }

    /// Adds a list of events of a type with a fixed place in the order.
    pub fn add_events<T, F>(&mut self, events: &'a [T], handler: F)
    where
        T: MergeOrder,
        F: FnMut(&T) + 'a,
    {
        self.add_events_with(
            events,
            handler,
            T::TYPE_ORDER,
            <T as MergeOrder>::transport_seq_num,
        );
    }

    /// Adds a list of events whose place in the order depends on the
    /// direction they travelled in.
    pub fn add_events_dir<T, F>(&mut self, events: &'a [T], handler: F, direction: PacketDirection)
    where
        T: DirectedMergeOrder,
        F: FnMut(&T) + 'a,
    {
        self.add_events_with(
            events,
            handler,
            T::type_order(direction),
            <T as DirectedMergeOrder>::transport_seq_num,
        );
    }

    /// Adds a list of events with an explicit type order and accessor of
    /// the transport-wide sequence number.
    ///
    /// An empty list is ignored.
    pub fn add_events_with<T, F, A>(
        &mut self,
        events: &'a [T],
        handler: F,
        type_order: TypeOrder,
        accessor: A,
    ) where
        T: LoggedEvent,
        F: FnMut(&T) + 'a,
        A: Fn(&T) -> Option<u16> + 'a,
    {
        if events.is_empty() {
            return;
        }

        debug_assert!(
            events
                .windows(2)
                .all(|w| w[0].log_time_us() <= w[1].log_time_us()),
            "Events must be sorted by log time"
        );

        let insertion_order = self.num_insertions;
        self.num_insertions += 1;

        trace!(
            "Add {} events of {:?} as list {}",
            events.len(),
            type_order,
            insertion_order
        );

        self.lists.push(Box::new(EventList {
            events,
            pos: 0,
            handler,
            accessor,
            type_order,
            insertion_order,
        }));
    }

    /// Number of event lists added so far. Empty lists are not counted.
    pub fn sequence_count(&self) -> usize {
        self.num_insertions
    }

    /// Calls the handlers for all events in global order.
    pub fn process_events_in_order(self) {
        let EventProcessor {
            mut lists,
            mut unwrappers,
            ..
        } = self;

        let mut heap = BinaryHeap::with_capacity(lists.len());

        for (idx, list) in lists.iter().enumerate() {
            if let Some(key) = heap_key(&**list, &unwrappers) {
                heap.push(Reverse((key, idx)));
            }
        }

        let mut processed = 0_usize;

        while let Some(Reverse(first)) = heap.pop() {
            // Sequence numbers of heads pushed earlier were unwrapped against
            // an older state. Rank every head tied on time and type again.
            let mut tied = vec![first];
            while let Some(Reverse((next, _))) = heap.peek().copied() {
                if next.time != first.0.time || next.type_order != first.0.type_order {
                    break;
                }
                if let Some(Reverse(entry)) = heap.pop() {
                    tied.push(entry);
                }
            }

            if tied.len() > 1 {
                for (key, i) in &mut tied {
                    if let Some(k) = heap_key(&*lists[*i], &unwrappers) {
                        *key = k;
                    }
                }
                tied.sort();
            }

            let mut tied = tied.into_iter();
            let Some((key, idx)) = tied.next() else {
                continue;
            };
            heap.extend(tied.map(Reverse));

            let list = &mut lists[idx];

            if let Some(seq) = list.transport_seq_num() {
                unwrappers.entry(key.type_order).or_default().unwrap(seq);
            }

            list.process_next();
            processed += 1;

            if list.is_empty() {
                trace!("List {} of {:?} done", key.insertion_order, key.type_order);
                continue;
            }

            if let Some(key) = heap_key(&**list, &unwrappers) {
                heap.push(Reverse((key, idx)));
            }
        }

        debug!("Processed {} events from {} lists", processed, lists.len());
    }
}

impl<'a> Default for EventProcessor<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn heap_key(
    list: &dyn ProcessableEvents,
    unwrappers: &HashMap<TypeOrder, SeqNoUnwrapper>,
) -> Option<HeapKey> {
    let time = list.next_time()?;
    let type_order = list.type_order();

    let seq = match list.transport_seq_num() {
        Some(seq) => {
            let unwrapped = unwrappers
                .get(&type_order)
                .map(|u| u.peek_unwrap(seq))
                .unwrap_or(seq as i64);
            SeqRank::Sequenced(unwrapped)
        }
        None => SeqRank::Unsequenced,
    };

    Some(HeapKey {
        time,
        type_order,
        seq,
        insertion_order: list.insertion_order(),
    })
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::event_log::*;

    fn rtp_in(time: i64, tseq: Option<u16>) -> LoggedRtpPacketIncoming {
        let mut rtp = LoggedRtpPacket::new(time, 1.into(), 0);
        rtp.transport_sequence_number = tseq;
        LoggedRtpPacketIncoming::new(rtp)
    }

    fn alr(time: i64) -> LoggedAlrStateEvent {
        LoggedAlrStateEvent {
            log_time_us: time,
            in_alr: true,
        }
    }

    #[test]
    fn empty_lists_are_not_registered() {
        let empty: Vec<LoggedAlrStateEvent> = vec![];
        let one = vec![alr(1)];

        let mut p = EventProcessor::new();
        p.add_events(&empty, |_| {});
        assert_eq!(p.sequence_count(), 0);
        p.add_events(&one, |_| {});
        assert_eq!(p.sequence_count(), 1);
        p.process_events_in_order();
    }

    #[test]
    fn nothing_to_process() {
        EventProcessor::new().process_events_in_order();
    }

    #[test]
    fn same_time_rtp_before_rtcp() {
        let rtcp = vec![LoggedRtcpPacketIncoming::new(5, vec![])];
        let rtp = vec![rtp_in(5, None)];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&rtcp, |_| seen.borrow_mut().push(TypeOrder::RtcpIn));
        p.add_events(&rtp, |_| seen.borrow_mut().push(TypeOrder::RtpIn));
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [TypeOrder::RtpIn, TypeOrder::RtcpIn]);
    }

    #[test]
    fn time_wins_over_type() {
        let stop = vec![LoggedStopEvent { log_time_us: 1 }];
        let start = vec![LoggedStartEvent {
            log_time_us: 2,
            utc_start_time_ms: None,
        }];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&start, |e| seen.borrow_mut().push(e.log_time_us));
        p.add_events(&stop, |e| seen.borrow_mut().push(e.log_time_us));
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [1, 2]);
    }

    #[test]
    fn insertion_order_breaks_remaining_ties() {
        let a = vec![alr(3), alr(3)];
        let b = vec![alr(3)];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&b, |_| seen.borrow_mut().push("b"));
        p.add_events(&a, |_| seen.borrow_mut().push("a"));
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), ["b", "a", "a"]);
    }

    #[test]
    fn sequenced_before_unsequenced() {
        let unsequenced = vec![rtp_in(7, None)];
        let sequenced = vec![rtp_in(7, Some(500))];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&unsequenced, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.add_events(&sequenced, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [Some(500), None]);
    }

    #[test]
    fn transport_seq_num_across_wrap_around() {
        // Two lists of the same type, same time. 0 follows 65535 so it must
        // be processed after it despite the smaller raw value.
        let a = vec![rtp_in(1, Some(65534)), rtp_in(2, Some(0))];
        let b = vec![rtp_in(2, Some(65535))];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&a, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.add_events(&b, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [Some(65534), Some(65535), Some(0)]);
    }

    #[test]
    fn wrap_while_head_waits_in_heap() {
        // The head of `a` is ranked before `b` crosses the wrap. Once it has,
        // 1 follows 65535 and comes before 2.
        let a = vec![rtp_in(5, Some(2))];
        let b = vec![
            rtp_in(1, Some(65530)),
            rtp_in(2, Some(65535)),
            rtp_in(5, Some(1)),
        ];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&a, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.add_events(&b, |e| {
            seen.borrow_mut().push(e.rtp.transport_sequence_number)
        });
        p.process_events_in_order();

        assert_eq!(
            *seen.borrow(),
            [Some(65530), Some(65535), Some(1), Some(2)]
        );
    }

    #[test]
    fn tied_heads_keep_insertion_order_without_seq() {
        let a = vec![rtp_in(5, None), rtp_in(6, None)];
        let b = vec![rtp_in(5, None)];
        let c = vec![rtp_in(5, Some(9))];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events(&a, |e| seen.borrow_mut().push(("a", e.rtp.log_time_us)));
        p.add_events(&b, |e| seen.borrow_mut().push(("b", e.rtp.log_time_us)));
        p.add_events(&c, |e| seen.borrow_mut().push(("c", e.rtp.log_time_us)));
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [("c", 5), ("a", 5), ("b", 5), ("a", 6)]);
    }

    #[test]
    fn directed_lists_use_direction() {
        let rtcp_out = vec![LoggedRtcpPacketReceiverReport {
            log_time_us: 4,
            sender_ssrc: 1.into(),
            report_blocks: 0,
        }];
        let rtp = vec![LoggedRtpPacket::new(4, 2.into(), 0)];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        p.add_events_dir(
            &rtcp_out,
            |_| seen.borrow_mut().push("rtcp out"),
            PacketDirection::Outgoing,
        );
        p.add_events_dir(
            &rtp,
            |_| seen.borrow_mut().push("rtp in"),
            PacketDirection::Incoming,
        );
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), ["rtp in", "rtcp out"]);
    }

    #[test]
    fn packet_info_by_transport_seq_num() {
        let info = |time: i64, seq: u16, tseq: Option<u16>| LoggedPacketInfo {
            log_time_us: time,
            ssrc: 1.into(),
            stream_seq_no: seq,
            size: 100,
            payload_size: 88,
            padding_size: 0,
            rtx: false,
            transport_seq_no: tseq,
        };
        let a = vec![info(3, 10, Some(2)), info(3, 12, None)];
        let b = vec![info(3, 11, Some(1))];
        let out = vec![info(3, 13, Some(0))];
        let seen = RefCell::new(vec![]);

        let mut p = EventProcessor::new();
        for list in [&a, &b] {
            p.add_events_dir(
                list,
                |e: &LoggedPacketInfo| seen.borrow_mut().push(e.stream_seq_no),
                PacketDirection::Incoming,
            );
        }
        p.add_events_dir(
            &out,
            |e: &LoggedPacketInfo| seen.borrow_mut().push(e.stream_seq_no),
            PacketDirection::Outgoing,
        );
        p.process_events_in_order();

        assert_eq!(*seen.borrow(), [11, 10, 12, 13]);
    }

    #[test]
    fn all_events_once_in_global_order() {
        let mut rng = StdRng::seed_from_u64(1234);

        let mut lists: Vec<Vec<LoggedAlrStateEvent>> = vec![];
        for _ in 0..10 {
            let len = rng.random_range(0..50);
            let mut times: Vec<i64> = (0..len).map(|_| rng.random_range(0..200)).collect();
            times.sort();
            lists.push(times.into_iter().map(alr).collect());
        }

        let seen = RefCell::new(vec![]);
        let mut p = EventProcessor::new();
        for (i, list) in lists.iter().enumerate() {
            let seen = &seen;
            p.add_events(list, move |e| seen.borrow_mut().push((e.log_time_us, i)));
        }
        p.process_events_in_order();

        let seen = seen.into_inner();
        let total: usize = lists.iter().map(|l| l.len()).sum();
        assert_eq!(seen.len(), total);

        // Time first, then insertion order. Skipping empty lists keeps the
        // relative order of the rest.
        for w in seen.windows(2) {
            assert!(w[0] <= w[1], "out of order: {:?}", w);
        }

        for (i, list) in lists.iter().enumerate() {
            let n = seen.iter().filter(|(_, idx)| *idx == i).count();
            assert_eq!(n, list.len());
        }
    }

    #[test]
    fn deterministic() {
        let a = vec![alr(1), alr(2), alr(2)];
        let b = vec![rtp_in(2, Some(3)), rtp_in(2, Some(1))];

        let run = || {
            let seen = RefCell::new(vec![]);
            let mut p = EventProcessor::new();
            p.add_events(&a, |e| seen.borrow_mut().push((e.log_time_us, 0)));
            p.add_events(&b, |e| seen.borrow_mut().push((e.log_time_us(), 1)));
            p.process_events_in_order();
            seen.into_inner()
        };

        assert_eq!(run(), run());
    }
}
