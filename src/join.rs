use crate::error::{Result, TshareError};
use crate::share::{parse_share, TagPair};

/// Recover a secret from any two distinct shares produced by one split.
///
/// Argument order does not matter. Fails with `InvalidShares` when either
/// share is empty, carries an unknown tag, or both carry the same tag, and
/// with `SizeMismatch` when the payload lengths differ.
pub fn join(share_a: &[u8], share_b: &[u8]) -> Result<Vec<u8>> {
    let (tag_a, payload_a) = parse_share(share_a)?;
    let (tag_b, payload_b) = parse_share(share_b)?;

    let (pair, swapped) = TagPair::from_tags(tag_a, tag_b)?;
    let (a, b) = if swapped {
        (payload_b, payload_a)
    } else {
        (payload_a, payload_b)
    };

    if a.len() != b.len() {
        return Err(TshareError::SizeMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut secret = vec![0u8; a.len()];
    join_payloads(pair, a, b, &mut secret);
    Ok(secret)
}

/// Recover secret bytes from two untagged payloads.
/// `a` must be the payload of the lower tag in `pair`; all slices share one length.
pub(crate) fn join_payloads(pair: TagPair, a: &[u8], b: &[u8], out: &mut [u8]) {
    debug_assert!(a.len() == b.len() && out.len() == a.len());

    let kernel: fn(u8) -> u8 = match pair {
        TagPair::S0S1 => recover_01,
        TagPair::S0S2 => recover_02,
        TagPair::S1S2 => recover_12,
    };
    for ((m, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *m = kernel(x ^ y);
    }
}

/// s0 ^ s1: c = [m3 m2 m1 m0 m7 m6 m5 m4], swap the nibbles back
#[inline]
fn recover_01(c: u8) -> u8 {
    ((c << 4) & 0xf0) | ((c >> 4) & 0x0f)
}

/// s0 ^ s2: c = [m7 m6 m5 m4 (m3^m7) (m2^m6) (m1^m5) (m0^m4)]
#[inline]
fn recover_02(c: u8) -> u8 {
    ((c & 0xf0) >> 4) ^ c
}

/// s1 ^ s2: c = [(m7^m3) (m6^m2) (m5^m1) (m4^m0) m3 m2 m1 m0]
#[inline]
fn recover_12(c: u8) -> u8 {
    ((c & 0x0f) << 4) ^ c
}
