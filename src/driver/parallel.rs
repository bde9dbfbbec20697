use super::{partition, BlockSpan, KeystreamPlan};
use crate::block::apply_block;
use crate::error::{ChaChaError, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use tracing::{debug, trace, warn};

/// Bounded set of worker threads that block jobs are queued onto
///
/// Owned by the caller and handed to the driver explicitly; nothing here is
/// shared between pools.
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
    blocks_per_job: usize,
}

impl WorkerPool {
    /// Pool with exactly `workers` threads, one block per job
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ChaChaError::InvalidWorkerCount(workers));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("parchacha-worker-{}", i))
            .build()
            .map_err(|e| ChaChaError::ThreadPool(e.to_string()))?;
        debug!(workers, "worker pool started");
        Ok(Self {
            pool,
            workers,
            blocks_per_job: 1,
        })
    }

    /// Pool sized to the hardware parallelism reported by the OS
    pub fn with_available_parallelism() -> Result<Self> {
        Self::new(available_workers())
    }

    /// Group `blocks` consecutive blocks into each job
    pub fn with_blocks_per_job(mut self, blocks: usize) -> Result<Self> {
        if blocks == 0 {
            return Err(ChaChaError::InvalidConfig(
                "blocks_per_job must be at least 1".into(),
            ));
        }
        self.blocks_per_job = blocks;
        Ok(self)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn blocks_per_job(&self) -> usize {
        self.blocks_per_job
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .field("blocks_per_job", &self.blocks_per_job)
            .finish()
    }
}

/// Threads the OS reports as available, at least 1
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Result of one job, tagged with where it belongs in the output
#[derive(Debug)]
pub struct BlockOutput {
    pub offset: usize,
    pub blocks: usize,
    pub data: Vec<u8>,
}

/// Apply keystream with every block computed as an independent job
///
/// Output is identical to [`apply_sequential`](super::apply_sequential).
pub fn apply_parallel(pool: &WorkerPool, plan: &KeystreamPlan, text: &[u8]) -> Result<Vec<u8>> {
    let spans = partition(text.len());
    plan.check_blocks(spans.len())?;
    debug!(
        bytes = text.len(),
        blocks = spans.len(),
        workers = pool.workers(),
        blocks_per_job = pool.blocks_per_job(),
        "parallel keystream"
    );

    fan_out(pool, text.len(), &spans, |run| cipher_run(plan, text, run))
}

/// Keystream for a run of consecutive blocks, each computed from its own counter
fn cipher_run(plan: &KeystreamPlan, text: &[u8], run: &[BlockSpan]) -> Result<BlockOutput> {
    let offset = run.first().map_or(0, |s| s.offset);
    let mut data = Vec::with_capacity(run.iter().map(|s| s.len).sum());
    for span in run {
        let counter = plan.counter_for(span.index)?;
        data.extend(apply_block(plan.state(), counter, &text[span.range()])?);
    }
    Ok(BlockOutput {
        offset,
        blocks: run.len(),
        data,
    })
}

/// Dispatch `job` over runs of `spans`, join, then place results by offset
///
/// Any failed or panicked job fails the whole call; the partially filled
/// buffer is dropped.
pub fn fan_out<F>(pool: &WorkerPool, len: usize, spans: &[BlockSpan], job: F) -> Result<Vec<u8>>
where
    F: Fn(&[BlockSpan]) -> Result<BlockOutput> + Sync,
{
    if spans.is_empty() {
        return Ok(Vec::new());
    }

    let (tx, rx) = mpsc::channel::<Result<BlockOutput>>();
    let job = &job;
    pool.pool.scope(|s| {
        for run in spans.chunks(pool.blocks_per_job) {
            let tx = tx.clone();
            s.spawn(move |_| {
                trace!(first_block = run[0].index, blocks = run.len(), "job start");
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(run)))
                    .unwrap_or_else(|payload| {
                        Err(ChaChaError::TaskFailure(format!(
                            "job for block {} panicked: {}",
                            run[0].index,
                            panic_message(&*payload)
                        )))
                    });
                // The receiver lives past the scope, so this only fails if the
                // coordinator is already gone.
                let _ = tx.send(outcome);
            });
        }
    });
    drop(tx);

    // Join barrier passed: every job has reported or died
    let mut out = vec![0u8; len];
    let mut placed = 0;
    for outcome in rx {
        let output = match outcome {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "block job failed, discarding output");
                return Err(e);
            }
        };
        let end = output.offset + output.data.len();
        if end > len {
            return Err(ChaChaError::LengthMismatch {
                data: end,
                keystream: len,
            });
        }
        out[output.offset..end].copy_from_slice(&output.data);
        placed += output.blocks;
    }

    if placed != spans.len() {
        return Err(ChaChaError::TaskFailure(format!(
            "{} of {} blocks reported",
            placed,
            spans.len()
        )));
    }
    Ok(out)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
