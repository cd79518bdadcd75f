/// Unwraps a 16 bit wrapping counter into a monotonic 64 bit value.
///
/// Going backwards past the first observed value yields negative numbers.
/// A step of exactly half the range is treated as going backwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeqNoUnwrapper {
    last: Option<i64>,
}

impl SeqNoUnwrapper {
    /// Creates an unwrapper that hasn't seen any value yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The unwrapped value of `seq` relative to the last unwrapped value,
    /// without remembering it.
    pub fn peek_unwrap(&self, seq: u16) -> i64 {
        let Some(last) = self.last else {
            return seq as i64;
        };

        let last_seq = last.rem_euclid(1 << 16) as u16;
        let diff = seq.wrapping_sub(last_seq) as i16;

        last + diff as i64
    }

    /// Unwraps `seq` and makes it the reference for following values.
    pub fn unwrap(&mut self, seq: u16) -> i64 {
        let v = self.peek_unwrap(seq);
        self.last = Some(v);
        v
    }

    /// The last value passed through [`SeqNoUnwrapper::unwrap`].
    pub fn last(&self) -> Option<i64> {
        self.last
    }
}
