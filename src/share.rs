use crate::error::{Result, TshareError};
use serde::Serialize;
use std::fmt;

/// Number of shares produced by every split
pub const SHARE_COUNT: usize = 3;

/// Number of distinct shares needed to recover the secret
pub const THRESHOLD: usize = 2;

/// Size of the tag prefix on every share
pub const TAG_SIZE: usize = 1;

/// Share slot identifier, stored as the first byte of a share
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// High nibble of each secret byte, masked
    S0,
    /// Low nibble of each secret byte, masked
    S1,
    /// Full secret byte, masked
    S2,
}

impl Tag {
    pub const ALL: [Tag; SHARE_COUNT] = [Tag::S0, Tag::S1, Tag::S2];

    /// Wire value of this tag
    pub fn index(self) -> u8 {
        match self {
            Tag::S0 => 0,
            Tag::S1 => 1,
            Tag::S2 => 2,
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = TshareError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Tag::S0),
            1 => Ok(Tag::S1),
            2 => Ok(Tag::S2),
            other => Err(TshareError::InvalidShares(format!(
                "unknown share tag {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.index())
    }
}

/// The three share combinations that can recover a secret.
/// Order of the two tags does not matter; each variant names the sorted pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPair {
    S0S1,
    S0S2,
    S1S2,
}

impl TagPair {
    /// Classify two tags. Returns the pair and whether the inputs were
    /// given in reverse (larger tag first) order.
    pub fn from_tags(a: Tag, b: Tag) -> Result<(Self, bool)> {
        let swapped = a > b;
        let (lo, hi) = if swapped { (b, a) } else { (a, b) };
        let pair = match (lo, hi) {
            (Tag::S0, Tag::S1) => TagPair::S0S1,
            (Tag::S0, Tag::S2) => TagPair::S0S2,
            (Tag::S1, Tag::S2) => TagPair::S1S2,
            _ => {
                return Err(TshareError::InvalidShares(format!(
                    "both shares carry tag {}",
                    lo
                )))
            }
        };
        Ok((pair, swapped))
    }
}

/// Split a share into its tag and payload.
/// Layout: [tag: 1][payload: n]
pub fn parse_share(share: &[u8]) -> Result<(Tag, &[u8])> {
    match share.split_first() {
        Some((&tag, payload)) => Ok((Tag::try_from(tag)?, payload)),
        None => Err(TshareError::InvalidShares("share is empty".into())),
    }
}
