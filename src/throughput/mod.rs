//! Throughput measurement for scoring functions.
//!
//! The harness takes a pre-generated workload and a scoring callable, runs one
//! unit of work per catalog on a fixed-size rayon pool, and returns a
//! [`Measurement`]. Workload generation, pool construction and pool warm-up all
//! happen before the clock starts, so the elapsed time covers only dispatching
//! and joining the units.

use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{CatalogGenerator, CatalogRecord};
use crate::scoring::Scorer;

pub const DEFAULT_ITERATIONS: usize = 1000;

/// Errors that abort a throughput measurement
#[derive(Error, Debug)]
pub enum ThroughputError {
    #[error("Invalid worker count: must be at least 1")]
    InvalidWorkers,

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("Unit {index} failed: {source}")]
    UnitFailed {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unit {index} panicked: {message}")]
    UnitPanicked { index: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputOptions {
    /// Number of catalogs to generate for [`benchmark_scorer`]
    pub iterations: usize,
    pub workers: usize,
    /// Touch every worker thread once before timing
    pub warmup: bool,
    /// Seed for the synthetic workload; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ThroughputOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            workers: default_workers(),
            warmup: true,
            seed: None,
        }
    }
}

/// Host parallelism, or 1 when it cannot be determined.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Outcome of one throughput run.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub iterations: usize,
    pub completed: usize,
    pub workers: usize,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Completed units per second
    pub throughput: f64,
}

impl Measurement {
    pub fn new(iterations: usize, completed: usize, workers: usize, elapsed: Duration) -> Self {
        // A batch can finish inside the clock's resolution; clamp so the rate stays finite.
        let secs = elapsed.max(Duration::from_nanos(1)).as_secs_f64();
        let throughput = if completed == 0 {
            0.0
        } else {
            completed as f64 / secs
        };
        Self {
            iterations,
            completed,
            workers,
            elapsed,
            throughput,
        }
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Run `f` once per catalog in `workload` on a pool of `options.workers` threads.
///
/// The first failing or panicking unit aborts the batch and is returned as the
/// error. On success every unit has completed, so
/// `measurement.completed == workload.len()`.
pub fn measure_throughput<F>(
    workload: &[CatalogRecord],
    options: &ThroughputOptions,
    f: F,
) -> Result<Measurement, ThroughputError>
where
    F: Fn(&CatalogRecord) -> anyhow::Result<f64> + Sync,
{
    if options.workers == 0 {
        return Err(ThroughputError::InvalidWorkers);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .thread_name(|i| format!("catalog-bench-{}", i))
        .build()?;

    if options.warmup {
        pool.broadcast(|_| ());
        debug!("Warmed {} workers", pool.current_num_threads());
    }

    let completed = AtomicUsize::new(0);
    let start = Instant::now();

    let outcome = pool.install(|| {
        workload
            .par_iter()
            .enumerate()
            .try_for_each(|(index, catalog)| {
                let score = run_unit(index, catalog, &f)?;
                std::hint::black_box(score);
                completed.fetch_add(1, Ordering::Relaxed);
                Ok::<(), ThroughputError>(())
            })
    });

    let elapsed = start.elapsed();
    outcome?;

    let measurement = Measurement::new(
        workload.len(),
        completed.into_inner(),
        options.workers,
        elapsed,
    );
    info!(
        "Scored {} catalogs on {} workers in {:?} ({:.0}/s)",
        measurement.completed, measurement.workers, measurement.elapsed, measurement.throughput
    );

    Ok(measurement)
}

/// Measure `scorer` against `options.iterations` synthetic catalogs.
pub fn benchmark_scorer(
    scorer: &Scorer,
    options: &ThroughputOptions,
) -> Result<Measurement, ThroughputError> {
    let mut generator = match options.seed {
        Some(seed) => CatalogGenerator::seeded(seed),
        None => CatalogGenerator::from_entropy(),
    };
    let workload = generator.generate_batch(options.iterations);
    debug!(
        "Generated {} catalogs (seed: {:?})",
        workload.len(),
        options.seed
    );

    measure_throughput(&workload, options, |catalog| Ok(scorer.score(catalog)))
}

fn run_unit<F>(index: usize, catalog: &CatalogRecord, f: &F) -> Result<f64, ThroughputError>
where
    F: Fn(&CatalogRecord) -> anyhow::Result<f64>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| f(catalog))) {
        Ok(Ok(score)) => Ok(score),
        Ok(Err(source)) => Err(ThroughputError::UnitFailed { index, source }),
        Err(payload) => Err(ThroughputError::UnitPanicked {
            index,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
