use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::error::Error;
use std::io::Cursor;
use tshare::{join, join_stream, split, split_stream, split_with_rng, StreamOptions, TshareError};

const ORDERINGS: [(usize, usize); 6] = [(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)];

#[test]
fn roundtrip_across_lengths() -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    for len in [0usize, 1, 2, 15, 16, 255, 1024, 1025, 4096] {
        let mut secret = vec![0u8; len];
        rng.fill_bytes(&mut secret);

        let shares = split(&secret)?;
        for share in &shares {
            assert_eq!(share.len(), len + 1);
        }
        for (i, j) in ORDERINGS {
            assert_eq!(join(&shares[i], &shares[j])?, secret, "len {} pair ({}, {})", len, i, j);
        }
    }
    Ok(())
}

#[test]
fn single_byte_scenario() -> Result<(), Box<dyn Error>> {
    let shares = split(&[0x4B])?;
    assert_eq!([shares[0][0], shares[1][0], shares[2][0]], [0, 1, 2]);
    assert_eq!(join(&shares[0], &shares[1])?, vec![0x4B]);
    assert_eq!(join(&shares[0], &shares[2])?, vec![0x4B]);
    assert_eq!(join(&shares[1], &shares[2])?, vec![0x4B]);
    Ok(())
}

#[test]
fn injected_rng_shares_still_join() -> Result<(), Box<dyn Error>> {
    let secret = b"custodian key material".to_vec();
    let shares = split_with_rng(&secret, &mut StdRng::seed_from_u64(99))?;
    assert_eq!(join(&shares[1], &shares[0])?, secret);
    Ok(())
}

#[test]
fn shares_from_different_splits_do_not_mix() -> Result<(), Box<dyn Error>> {
    // Masks differ per split, so cross-split pairs are well formed but wrong
    let secret = vec![0xA5u8; 64];
    let first = split(&secret)?;
    let second = split(&secret)?;
    assert_ne!(join(&first[0], &second[2])?, secret);
    Ok(())
}

#[test]
fn invalid_combinations_are_rejected() -> Result<(), Box<dyn Error>> {
    let shares = split(b"secret")?;
    assert!(matches!(join(&shares[0], &shares[0]), Err(TshareError::InvalidShares(_))));
    assert!(matches!(join(&[], &shares[1]), Err(TshareError::InvalidShares(_))));
    assert!(matches!(
        join(&shares[0], &shares[1][..3]),
        Err(TshareError::SizeMismatch { left: 6, right: 2 })
    ));
    Ok(())
}

#[test]
fn stream_and_memory_formats_interoperate() -> Result<(), Box<dyn Error>> {
    let secret: Vec<u8> = (0..10_000).map(|i| (i % 253) as u8).collect();

    // Stream split, in-memory join
    let mut streamed: [Vec<u8>; 3] = Default::default();
    split_stream(&mut Cursor::new(&secret), &mut streamed, &StreamOptions::default())?;
    assert_eq!(join(&streamed[1], &streamed[2])?, secret);

    // In-memory split, stream join
    let shares = split(&secret)?;
    let mut readers = [Cursor::new(&shares[2]), Cursor::new(&shares[0])];
    let mut recovered = Vec::new();
    join_stream(&mut readers, &mut recovered, &StreamOptions::new(333)?)?;
    assert_eq!(recovered, secret);
    Ok(())
}
