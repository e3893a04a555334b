//! Converting many buffers at once.
//!
//! Each buffer gets its own [`Session`](crate::session::Session) on a scoped
//! worker thread. Workers share only the immutable inputs and options, and
//! the results come back in input order.

use std::thread;
use std::time::{Duration, Instant};

use crate::encoding::{self, Charset};
use crate::error::Result;
use crate::options::Options;
use crate::sauce::{self, Record};
use crate::session::{self, Mode};

/// Upper bound on worker threads.
const MAX_WORKERS: usize = 8;

/// Below this many inputs the batch runs on the calling thread.
const PARALLEL_THRESHOLD: usize = 5;

/// Result of converting one buffer of a batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Position of the buffer in the input.
    pub index: usize,
    /// Converted code points, or why conversion failed.
    pub runes: Result<Vec<char>>,
    /// SAUCE record of the buffer, if it has one.
    pub sauce: Option<Record>,
    /// Time spent on this buffer.
    pub elapsed: Duration,
}

/// Results of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchResults {
    /// One entry per input buffer.
    pub results: Vec<BatchResult>,
    /// Buffers converted.
    pub success: usize,
    /// Buffers that failed.
    pub failed: usize,
}

impl BatchResults {
    /// Number of buffers processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    fn collect(results: Vec<BatchResult>) -> Self {
        let success = results.iter().filter(|r| r.runes.is_ok()).count();
        let failed = results.len() - success;
        tracing::debug!(total = results.len(), success, failed, "batch complete");
        Self {
            results,
            success,
            failed,
        }
    }
}

fn convert_one(index: usize, bytes: &[u8], charset: Charset, mode: Mode, options: &Options) -> BatchResult {
    let start = Instant::now();
    let (runes, sauce) = match session::convert_charset(bytes, charset, mode, options) {
        Ok(conversion) => (Ok(conversion.runes), conversion.sauce),
        Err(e) => {
            tracing::warn!(index, error = %e, "conversion failed");
            (Err(e), sauce::parse(bytes))
        }
    };
    BatchResult {
        index,
        runes,
        sauce,
        elapsed: start.elapsed(),
    }
}

/// Convert every buffer in order on the calling thread.
///
/// # Errors
///
/// Returns [`crate::Error::UnresolvedEncoding`] when the encoding in
/// `options` is unknown. Per-buffer failures are reported in the results.
pub fn convert_sequential<B: AsRef<[u8]>>(files: &[B], mode: Mode, options: &Options) -> Result<BatchResults> {
    let charset = encoding::resolve(&options.encoding)?;
    let results = files
        .iter()
        .enumerate()
        .map(|(i, file)| convert_one(i, file.as_ref(), charset, mode, options))
        .collect();
    Ok(BatchResults::collect(results))
}

/// Convert every buffer, spreading the work over scoped threads.
///
/// Small batches run sequentially. One failing buffer never stops its
/// siblings.
///
/// # Errors
///
/// Returns [`crate::Error::UnresolvedEncoding`] when the encoding in
/// `options` is unknown. Per-buffer failures are reported in the results.
///
/// # Example
///
/// ```rust
/// use retrotext::batch::convert_all;
/// use retrotext::{Mode, Options};
///
/// let files: Vec<&[u8]> = vec![b"one", b"two\x01"];
/// let options = Options { encoding: "cp437".into(), ..Options::default() };
/// let batch = convert_all(&files, Mode::Text, &options)?;
/// assert_eq!(batch.success, 2);
/// # Ok::<(), retrotext::Error>(())
/// ```
pub fn convert_all<B: AsRef<[u8]> + Sync>(files: &[B], mode: Mode, options: &Options) -> Result<BatchResults> {
    if files.len() < PARALLEL_THRESHOLD {
        return convert_sequential(files, mode, options);
    }
    let charset = encoding::resolve(&options.encoding)?;
    let workers = thread::available_parallelism()
        .map_or(1, usize::from)
        .clamp(1, MAX_WORKERS)
        .min(files.len());
    let per_worker = files.len().div_ceil(workers);
    tracing::debug!(files = files.len(), workers, %charset, "batch start");

    let results = thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(per_worker)
            .enumerate()
            .map(|(n, chunk)| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, file)| convert_one(n * per_worker + i, file.as_ref(), charset, mode, options))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect::<Vec<_>>()
    });
    Ok(BatchResults::collect(results))
}
