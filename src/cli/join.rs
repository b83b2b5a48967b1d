use crate::error::{Result, TshareError};
use crate::share::{SHARE_COUNT, THRESHOLD};
use crate::stream::{join_tagged_streams, read_stream_tags, StreamOptions, DEFAULT_BUFFER_SIZE};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options for the join command
#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub buffer_size: usize,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Recover a secret from two or three share files, writing it to `output_path`.
///
/// Share tags are checked before the output is opened, and the output may not
/// be one of the shares. If joining fails after the output was created by this
/// call, the partial file is removed; a pre-existing output is left in place.
/// Returns the number of secret bytes written.
pub fn join_files(share_paths: &[PathBuf], output_path: &Path, options: &JoinOptions) -> Result<u64> {
    let stream_options = StreamOptions::new(options.buffer_size)?;

    if share_paths.len() < THRESHOLD {
        return Err(TshareError::InsufficientShares(share_paths.len()));
    }
    if share_paths.len() > SHARE_COUNT {
        return Err(TshareError::InvalidShares(format!(
            "{} share files given, at most {} exist",
            share_paths.len(),
            SHARE_COUNT
        )));
    }
    for share in share_paths {
        if is_same_file(share, output_path)? {
            return Err(TshareError::OutputIsShare(output_path.to_path_buf()));
        }
    }

    let mut readers = share_paths
        .iter()
        .map(|path| -> Result<BufReader<File>> { Ok(BufReader::new(File::open(path)?)) })
        .collect::<Result<Vec<_>>>()?;
    let tags = read_stream_tags(&mut readers)?;

    let created = !output_path.exists();
    let mut writer = BufWriter::new(File::create(output_path)?);
    match join_tagged_streams(&mut readers, &tags, &mut writer, &stream_options) {
        Ok(bytes) => {
            info!(output = %output_path.display(), bytes, "Joined shares");
            Ok(bytes)
        }
        Err(e) => {
            drop(writer);
            if created {
                if let Err(remove_err) = std::fs::remove_file(output_path) {
                    warn!(
                        output = %output_path.display(),
                        error = %remove_err,
                        "Could not remove partial output"
                    );
                }
            }
            Err(e)
        }
    }
}

/// Whether two paths name the same existing file
fn is_same_file(a: &Path, b: &Path) -> Result<bool> {
    if !a.exists() || !b.exists() {
        return Ok(false);
    }
    Ok(a.canonicalize()? == b.canonicalize()?)
}
