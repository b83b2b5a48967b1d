use crate::error::{Result, TshareError};
use crate::share::{Tag, SHARE_COUNT, TAG_SIZE};
use serde::Serialize;
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Summary of a single share file
#[derive(Debug, Clone, Serialize)]
pub struct ShareInfo {
    pub file: PathBuf,
    pub tag: Tag,
    pub payload_bytes: u64,
    /// Hex SHA3-256 of the whole share file, for comparing copies
    pub fingerprint: String,
}

impl ShareInfo {
    /// Tags of the shares that can be combined with this one
    pub fn partners(&self) -> Vec<Tag> {
        Tag::ALL.into_iter().filter(|t| *t != self.tag).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ShareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TShare Share Information")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "File: {}", self.file.display())?;
        writeln!(f, "Tag: {} (slot {} of {})", self.tag, self.tag.index(), SHARE_COUNT)?;
        writeln!(
            f,
            "Secret size: {} ({} bytes)",
            format_size(self.payload_bytes),
            self.payload_bytes
        )?;
        writeln!(f, "Fingerprint: {}", self.fingerprint)?;
        writeln!(f)?;
        let partners: Vec<String> = self.partners().iter().map(Tag::to_string).collect();
        writeln!(f, "Combine with: {}", partners.join(" or "))?;
        writeln!(f, "This share alone reveals nothing but the secret's length.")
    }
}

/// Inspect a share file without needing its partner
pub fn show_info(path: &Path) -> Result<ShareInfo> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha3_256::new();

    let mut tag = [0u8; TAG_SIZE];
    let read = reader.read(&mut tag)?;
    if read == 0 {
        return Err(TshareError::InvalidShares(format!(
            "{} is empty",
            path.display()
        )));
    }
    let tag = Tag::try_from(tag[0])?;
    hasher.update([tag.index()]);

    let mut payload_bytes = 0u64;
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        payload_bytes += n as u64;
    }

    Ok(ShareInfo {
        file: path.to_path_buf(),
        tag,
        payload_bytes,
        fingerprint: hex::encode(hasher.finalize()),
    })
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::split;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let shares = split(&[0x55u8; 2048]).unwrap();
        let path = dir.path().join("key.s2");
        std::fs::write(&path, &shares[2]).unwrap();

        let info = show_info(&path).unwrap();
        assert_eq!(info.tag, Tag::S2);
        assert_eq!(info.payload_bytes, 2048);
        assert_eq!(info.fingerprint.len(), 64);
        assert_eq!(info.partners(), vec![Tag::S0, Tag::S1]);

        let text = info.to_string();
        assert!(text.contains("Tag: s2"));
        assert!(text.contains("Secret size: 2.0 KB (2048 bytes)"));
        assert!(text.contains("Combine with: s0 or s1"));
    }

    #[test]
    fn test_show_info_fingerprint_matches_contents() {
        let dir = tempdir().unwrap();
        let shares = split(b"fingerprint me").unwrap();
        let path = dir.path().join("key.s0");
        std::fs::write(&path, &shares[0]).unwrap();

        let info = show_info(&path).unwrap();
        assert_eq!(info.fingerprint, hex::encode(Sha3_256::digest(&shares[0])));
    }

    #[test]
    fn test_show_info_json() {
        let dir = tempdir().unwrap();
        let shares = split(b"abc").unwrap();
        let path = dir.path().join("key.s1");
        std::fs::write(&path, &shares[1]).unwrap();

        let json = show_info(&path).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tag"], "s1");
        assert_eq!(value["payload_bytes"], 3);
    }

    #[test]
    fn test_show_info_rejects_bad_shares() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(show_info(&empty), Err(TshareError::InvalidShares(_))));

        let bad_tag = dir.path().join("bad");
        std::fs::write(&bad_tag, [9u8, 1, 2, 3]).unwrap();
        assert!(matches!(show_info(&bad_tag), Err(TshareError::InvalidShares(_))));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
    }
}
