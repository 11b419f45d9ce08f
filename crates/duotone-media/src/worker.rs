use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use duotone_core::pipeline::{Execution, PixelBuffer, transform_with};
use duotone_core::settings::Settings;

/// A finished background transform.
#[derive(Debug)]
pub struct PreviewResult {
    pub generation: u64,
    pub settings: Settings,
    pub buffer: PixelBuffer,
}

/// Runs transforms on the rayon pool and hands back only the newest result.
///
/// Every submission gets a higher generation than the one before. Results
/// from older generations are dropped when a newer one is available; the
/// engine itself is never interrupted.
pub struct PreviewWorker {
    source: Arc<PixelBuffer>,
    execution: Execution,
    submitted: u64,
    delivered: u64,
    tx: Sender<PreviewResult>,
    rx: Receiver<PreviewResult>,
}

impl PreviewWorker {
    pub fn new(source: PixelBuffer) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            execution: Execution::Parallel,
            submitted: 0,
            delivered: 0,
            tx,
            rx,
        }
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Replace the source image. Results still in flight for the previous
    /// image become stale.
    pub fn set_source(&mut self, source: PixelBuffer) {
        self.source = Arc::new(source);
        self.delivered = self.submitted;
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Queue a transform of the current source. Returns its generation.
    pub fn submit(&mut self, settings: Settings) -> u64 {
        self.submitted += 1;
        let generation = self.submitted;
        let source = Arc::clone(&self.source);
        let execution = self.execution;
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let buffer = transform_with(&source, &settings, execution);
            // The worker may have been dropped; nobody wants the result then.
            let _ = tx.send(PreviewResult {
                generation,
                settings,
                buffer,
            });
        });
        tracing::trace!(generation, "submitted preview transform");
        generation
    }

    /// Generation of the most recent submission, 0 before any.
    pub fn current_generation(&self) -> u64 {
        self.submitted
    }

    /// True when every submission has been delivered or superseded.
    pub fn is_idle(&self) -> bool {
        self.delivered == self.submitted
    }

    /// Non-blocking: the newest finished result not yet delivered, if any.
    pub fn latest(&mut self) -> Option<PreviewResult> {
        let mut newest: Option<PreviewResult> = None;
        while let Ok(result) = self.rx.try_recv() {
            newest = self.keep_newer(newest, result);
        }
        self.deliver(newest)
    }

    /// Block until the result of the most recent submission arrives,
    /// discarding anything older. Returns `None` if nothing is pending.
    pub fn wait_latest(&mut self) -> Option<PreviewResult> {
        if self.is_idle() {
            return None;
        }
        let mut newest: Option<PreviewResult> = None;
        while newest.as_ref().map(|r| r.generation) != Some(self.submitted) {
            // We hold a sender, so recv only fails if a job panicked.
            let result = self.rx.recv().ok()?;
            newest = self.keep_newer(newest, result);
        }
        self.deliver(newest)
    }

    fn keep_newer(
        &self,
        current: Option<PreviewResult>,
        candidate: PreviewResult,
    ) -> Option<PreviewResult> {
        match current {
            Some(current) if current.generation >= candidate.generation => {
                tracing::trace!(generation = candidate.generation, "discarded stale preview");
                Some(current)
            }
            Some(current) => {
                tracing::trace!(generation = current.generation, "discarded stale preview");
                Some(candidate)
            }
            None => Some(candidate),
        }
    }

    fn deliver(&mut self, newest: Option<PreviewResult>) -> Option<PreviewResult> {
        let result = newest.filter(|r| r.generation > self.delivered)?;
        self.delivered = result.generation;
        Some(result)
    }
}
