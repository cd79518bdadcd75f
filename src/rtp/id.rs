use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Synchronization source, the id of one RTP stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ssrc(u32);

impl Ssrc {
    /// Creates a random SSRC.
    pub fn new() -> Self {
        Ssrc(fastrand::u32(..))
    }
}

impl Deref for Ssrc {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Ssrc {
    fn from(v: u32) -> Self {
        Ssrc(v)
    }
}

impl fmt::Display for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
