//! TShare - (2,3) Threshold Secret Sharing
//!
//! Splits a secret into three shares. No single share reveals anything
//! about the secret other than its length, while any two shares recover
//! it exactly.
//!
//! ## Share Format
//!
//! ```text
//! [tag: 1][payload: n]
//! ```
//!
//! The tag (0, 1 or 2) names the share slot; the payload has the same
//! length as the secret. There is no checksum: a corrupted share silently
//! produces a wrong secret.
//!
//! ## Construction
//!
//! For each secret byte `m` a fresh random byte `r` is drawn:
//!
//! - **s0**: high nibble of `m`, right-aligned, XOR `r`
//! - **s1**: low nibble of `m`, left-aligned, XOR `r`
//! - **s2**: `m` XOR `r`
//!
//! XORing any two payloads cancels `r`; each pair then has its own
//! recombination of the nibble fragments.
//!
//! ## Example
//!
//! ```
//! let shares = tshare::split(b"launch codes").unwrap();
//! let secret = tshare::join(&shares[2], &shares[0]).unwrap();
//! assert_eq!(secret, b"launch codes");
//! ```

pub mod cli;
pub mod error;
pub mod join;
pub mod share;
pub mod split;
pub mod stream;

pub use error::{Result, TshareError};
pub use join::join;
pub use share::{parse_share, Tag, TagPair, SHARE_COUNT, THRESHOLD};
pub use split::{split, split_with_rng};
pub use stream::{join_stream, split_stream, StreamOptions};
