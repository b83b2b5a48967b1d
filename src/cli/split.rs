use crate::error::{Result, TshareError};
use crate::share::{Tag, SHARE_COUNT};
use crate::stream::{split_stream, StreamOptions, DEFAULT_BUFFER_SIZE};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options for the split command
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Directory for the share files; defaults to the input's directory
    pub output_dir: Option<PathBuf>,
    pub buffer_size: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Path of the share file for `tag`: `<dir>/<input name>.s<tag>`
pub fn share_path(input_path: &Path, output_dir: Option<&Path>, tag: Tag) -> Result<PathBuf> {
    let name = input_path.file_name().ok_or_else(|| {
        TshareError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no file name", input_path.display()),
        ))
    })?;

    let mut file_name = name.to_os_string();
    file_name.push(format!(".{}", tag));

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    Ok(dir.join(file_name))
}

/// Split a file into three share files.
/// Returns the share paths in tag order.
pub fn split_file(input_path: &Path, options: &SplitOptions) -> Result<[PathBuf; SHARE_COUNT]> {
    let stream_options = StreamOptions::new(options.buffer_size)?;

    let paths = [
        share_path(input_path, options.output_dir.as_deref(), Tag::S0)?,
        share_path(input_path, options.output_dir.as_deref(), Tag::S1)?,
        share_path(input_path, options.output_dir.as_deref(), Tag::S2)?,
    ];

    let mut reader = BufReader::new(File::open(input_path)?);
    let mut created = 0;
    let bytes = match write_shares(&mut reader, &paths, &mut created, &stream_options) {
        Ok(bytes) => bytes,
        Err(e) => {
            // A truncated share still carries a valid tag, so never leave one behind
            for path in &paths[..created] {
                if let Err(remove_err) = std::fs::remove_file(path) {
                    warn!(
                        share = %path.display(),
                        error = %remove_err,
                        "Could not remove partial share"
                    );
                }
            }
            return Err(e);
        }
    };
    info!(
        input = %input_path.display(),
        bytes,
        "Split file into {} shares",
        SHARE_COUNT
    );

    Ok(paths)
}

/// Create the share files in tag order and fill them.
/// `created` counts the files opened so far, for cleanup on failure.
fn write_shares<R: Read>(
    reader: &mut R,
    paths: &[PathBuf; SHARE_COUNT],
    created: &mut usize,
    options: &StreamOptions,
) -> Result<u64> {
    let mut open = |path: &PathBuf| -> Result<BufWriter<File>> {
        let file = File::create(path)?;
        *created += 1;
        Ok(BufWriter::new(file))
    };
    let mut writers = [open(&paths[0])?, open(&paths[1])?, open(&paths[2])?];
    split_stream(reader, &mut writers, options)
}
