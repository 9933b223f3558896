use rayon::prelude::*;
use thiserror::Error;

use pixgrid_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The strategy name could not be parsed.
    #[error("unknown execution strategy: {0}")]
    InvalidStrategy(String),
}

/// Controls how the rows of an image are processed.
///
/// Every strategy produces the same output. Each worker owns a disjoint set of
/// output rows and only reads from the source snapshot, so no locking is
/// involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl std::str::FromStr for ExecutionStrategy {
    type Err = ParallelError;

    /// Parse `serial`, `rows` or a thread count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serial" => Ok(ExecutionStrategy::Serial),
            "rows" | "parallel" => Ok(ExecutionStrategy::ParallelRows),
            other => other
                .parse::<usize>()
                .map(ExecutionStrategy::Fixed)
                .map_err(|_| ParallelError::InvalidStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionStrategy::ParallelRows => write!(f, "rows"),
            ExecutionStrategy::Serial => write!(f, "serial"),
            ExecutionStrategy::Fixed(n) => write!(f, "fixed({n})"),
        }
    }
}

/// Apply a function to every row of the image with the given strategy.
///
/// The closure receives the row index and the mutable row slice of
/// `width * C` elements. Images without pixels are left untouched.
///
/// # Errors
///
/// Returns an error if the strategy asks for zero threads or the local thread
/// pool cannot be built.
pub fn for_each_row<T, const C: usize, F>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if let ExecutionStrategy::Fixed(0) = strategy {
        return Err(ParallelError::InvalidThreadCount(0));
    }

    let stride = dst.row_stride();
    if stride == 0 || dst.rows() == 0 {
        return Ok(());
    }

    let rows = dst.as_slice_mut();

    match strategy {
        ExecutionStrategy::Serial => {
            rows.chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            rows.par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                rows.par_chunks_exact_mut(stride)
                    .enumerate()
                    .for_each(|(r, row)| f(r, row));
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixgrid_image::ImageSize;

    fn row_index_image(strategy: ExecutionStrategy) -> Result<Image<u8, 3>, ParallelError> {
        let mut image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )
        .unwrap();
        for_each_row(&mut image, strategy, |r, row| {
            row.iter_mut().for_each(|v| *v = r as u8);
        })?;
        Ok(image)
    }

    #[test]
    fn test_for_each_row_strategies() -> Result<(), ParallelError> {
        let expected = vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2];
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Fixed(2),
        ] {
            let image = row_index_image(strategy)?;
            assert_eq!(image.as_slice(), expected.as_slice(), "{strategy}");
        }
        Ok(())
    }

    #[test]
    fn test_for_each_row_fixed_error() {
        let res = row_index_image(ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_for_each_row_empty() -> Result<(), ParallelError> {
        let mut image = Image::<u8, 3>::new([0, 3].into(), vec![]).unwrap();
        for_each_row(&mut image, ExecutionStrategy::ParallelRows, |_, _| {
            panic!("no rows expected")
        })?;
        Ok(())
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("serial".parse::<ExecutionStrategy>(), Ok(ExecutionStrategy::Serial));
        assert_eq!("Rows".parse::<ExecutionStrategy>(), Ok(ExecutionStrategy::ParallelRows));
        assert_eq!("4".parse::<ExecutionStrategy>(), Ok(ExecutionStrategy::Fixed(4)));
        assert_eq!(
            "fast".parse::<ExecutionStrategy>(),
            Err(ParallelError::InvalidStrategy("fast".to_string()))
        );
    }
}
