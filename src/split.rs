use crate::error::{Result, TshareError};
use crate::share::{Tag, SHARE_COUNT, TAG_SIZE};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Split a secret into three tagged shares using the system CSPRNG.
///
/// Any two of the returned shares recover the secret with [`crate::join`];
/// each share alone is uniformly random apart from its length.
pub fn split(secret: &[u8]) -> Result<[Vec<u8>; SHARE_COUNT]> {
    split_with_rng(secret, &mut OsRng)
}

/// Split a secret using a caller-supplied cryptographically secure RNG.
///
/// One mask byte is drawn per secret byte and shared by all three slots:
///
/// ```text
/// m  = [m7 m6 m5 m4 m3 m2 m1 m0]
/// s0 = [ 0  0  0  0 m7 m6 m5 m4] ^ r
/// s1 = [m3 m2 m1 m0  0  0  0  0] ^ r
/// s2 = [m7 m6 m5 m4 m3 m2 m1 m0] ^ r
/// ```
pub fn split_with_rng<R>(secret: &[u8], rng: &mut R) -> Result<[Vec<u8>; SHARE_COUNT]>
where
    R: RngCore + CryptoRng,
{
    let mask = generate_mask(rng, secret.len())?;

    let mut shares = Tag::ALL.map(|tag| {
        let mut share = vec![0u8; TAG_SIZE + secret.len()];
        share[0] = tag.index();
        share
    });

    let [s0, s1, s2] = &mut shares;
    split_into(
        secret,
        &mask,
        &mut s0[TAG_SIZE..],
        &mut s1[TAG_SIZE..],
        &mut s2[TAG_SIZE..],
    );

    Ok(shares)
}

/// Draw a fresh mask of `len` bytes. Wiped when dropped.
pub(crate) fn generate_mask<R>(rng: &mut R, len: usize) -> Result<Zeroizing<Vec<u8>>>
where
    R: RngCore + CryptoRng,
{
    let mut mask = Zeroizing::new(vec![0u8; len]);
    rng.try_fill_bytes(&mut mask)
        .map_err(|e| TshareError::RandomSourceFailure(e.to_string()))?;
    Ok(mask)
}

/// Write untagged payloads for one run of secret bytes.
/// All slices must have the same length as `secret`.
pub(crate) fn split_into(
    secret: &[u8],
    mask: &[u8],
    s0: &mut [u8],
    s1: &mut [u8],
    s2: &mut [u8],
) {
    debug_assert_eq!(secret.len(), mask.len());
    debug_assert!(s0.len() == secret.len() && s1.len() == secret.len() && s2.len() == secret.len());

    for (i, (&m, &r)) in secret.iter().zip(mask.iter()).enumerate() {
        s0[i] = ((m & 0xf0) >> 4) ^ r;
        s1[i] = ((m & 0x0f) << 4) ^ r;
        s2[i] = m ^ r;
    }
}
