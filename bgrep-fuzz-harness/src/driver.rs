//! The fuzzing loop.
//!
//! Each iteration draws a case seed from the master RNG, samples size bounds
//! and a case from it, runs the tool and compares its output with the
//! oracle. The loop has no normal exit; it stops on the first error or when
//! the shutdown future resolves.
//!
//! Shutdown can interrupt the tool run but never the comparison: once output
//! has been captured, a mismatch is always recorded before the loop stops.

use std::future::Future;

use bgrep_fuzz_core::{RunId, SizeBounds, TestCase};
use bgrep_fuzz_executor::{CaseRunner, SearchTool};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::comparator::{CaseContext, Comparator};
use crate::HarnessError;

/// Regenerate the case a given case seed produces under `bounds`.
///
/// The per-iteration size bounds are sampled from the same RNG, so the case
/// seed alone reproduces the case.
///
/// # Errors
/// Returns [`HarnessError::Core`] if `bounds` is unusable.
pub fn case_from_seed(case_seed: u64, bounds: SizeBounds) -> Result<TestCase, HarnessError> {
    let mut rng = StdRng::seed_from_u64(case_seed);
    let inner = bounds.sample(&mut rng);
    Ok(TestCase::generate(&mut rng, inner)?)
}

/// A case whose tool output has been captured but not yet compared.
struct Searched {
    case_seed: u64,
    case: TestCase,
    stdout: Vec<u8>,
}

/// Drives generate/search/compare rounds against one tool.
pub struct Driver<T: SearchTool> {
    runner: CaseRunner<T>,
    comparator: Comparator,
    bounds: SizeBounds,
    master: StdRng,
    run_id: RunId,
    iteration: u64,
    progress_every: u64,
}

impl<T: SearchTool> Driver<T> {
    /// Create a driver.
    ///
    /// # Arguments
    /// - `runner`: writes cases and invokes the tool
    /// - `comparator`: checks output and records failures
    /// - `bounds`: outer size bounds sampled every iteration
    /// - `seed`: master seed for the case-seed stream
    #[must_use]
    pub fn new(
        runner: CaseRunner<T>,
        comparator: Comparator,
        bounds: SizeBounds,
        seed: u64,
    ) -> Self {
        Self {
            runner,
            comparator,
            bounds,
            master: StdRng::seed_from_u64(seed),
            run_id: RunId::new(),
            iteration: 0,
            progress_every: 0,
        }
    }

    /// Log a progress line every `every` iterations; 0 disables.
    #[must_use]
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every;
        self
    }

    /// This session's id.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Iterations started so far.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    /// Run one iteration with a fresh case seed.
    ///
    /// # Errors
    /// Returns [`HarnessError::Mismatch`] if the outputs differ and
    /// [`HarnessError::Tool`] if the tool could not be run.
    pub async fn step(&mut self) -> Result<(), HarnessError> {
        let case_seed = self.next_case_seed();
        let searched = self.search(case_seed).await?;
        self.compare(searched).await?;
        self.log_progress();
        Ok(())
    }

    /// Run the single case produced by `case_seed`.
    ///
    /// # Errors
    /// Same as [`step`](Self::step).
    pub async fn replay(&mut self, case_seed: u64) -> Result<(), HarnessError> {
        tracing::info!(run_id = %self.run_id, case_seed, "replaying case");
        let searched = self.search(case_seed).await?;
        self.compare(searched).await
    }

    fn next_case_seed(&mut self) -> u64 {
        self.master.random()
    }

    async fn search(&mut self, case_seed: u64) -> Result<Searched, HarnessError> {
        self.iteration += 1;

        let case = case_from_seed(case_seed, self.bounds)?;
        let output = self.runner.run(&case).await?;
        Ok(Searched { case_seed, case, stdout: output.stdout })
    }

    async fn compare(&self, searched: Searched) -> Result<(), HarnessError> {
        let ctx = CaseContext {
            run_id: self.run_id,
            iteration: self.iteration,
            case_seed: searched.case_seed,
            filename: self.runner.data_file().name(),
            case: &searched.case,
        };
        self.comparator.check(&ctx, searched.case.expected_matches(), &searched.stdout).await
    }

    fn log_progress(&self) {
        if self.progress_every > 0 && self.iteration % self.progress_every == 0 {
            tracing::info!(run_id = %self.run_id, iterations = self.iteration, "fuzzing progress");
        }
    }

    /// Loop until an iteration fails or `shutdown` resolves.
    ///
    /// Shutdown is honoured while the tool runs; the in-flight process is
    /// killed. Output that was already captured is still compared, so a
    /// detected mismatch always leaves its artifacts. Returns the number of
    /// iterations started.
    ///
    /// # Errors
    /// The first error any iteration produces.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<u64, HarnessError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(run_id = %self.run_id, bounds = ?self.bounds, "fuzzing started");

        loop {
            let case_seed = self.next_case_seed();
            let searched = tokio::select! {
                biased;
                () = &mut shutdown => None,
                result = self.search(case_seed) => Some(result?),
            };
            let Some(searched) = searched else {
                tracing::info!(
                    run_id = %self.run_id,
                    iterations = self.iteration,
                    "shutdown requested, stopping"
                );
                return Ok(self.iteration);
            };

            self.compare(searched).await?;
            self.log_progress();
        }
    }
}
