//! Single-flight, quota-aware scheduler for external reasoner calls
//!
//! One actor task owns the FIFO queue and the rolling window of call
//! instants. Callers hold cheap [`Scheduler`] handles and suspend in
//! [`Scheduler::submit`] until their job has been dispatched and answered.
//!
//! ```text
//!  submit ─┐
//!  submit ─┼─► mpsc (FIFO) ─► actor ─► wait for window slot + spacing ─► Reasoner
//!  submit ─┘                    │                                           │
//!                               └──────────── oneshot reply ◄───────────────┘
//! ```
//!
//! Every call to the reasoner, retries included, consumes one slot of the
//! window. At most one call is in flight at any instant.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, instrument, warn};

use crate::config::SchedulerConfig;
use crate::error::ExternalError;
use crate::reasoner::{PromptKind, Reasoner, ReasonerResponse};

struct Job {
    kind: PromptKind,
    payload: String,
    reply: oneshot::Sender<Result<ReasonerResponse, ExternalError>>,
}

/// Counters describing scheduler activity since start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// External calls made, retries included
    pub dispatched: u64,
    /// Calls that were retries of a transient failure
    pub retried: u64,
    /// Jobs that finished with an error
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicU64,
    retried: AtomicU64,
    failed: AtomicU64,
}

/// Handle to the scheduler actor; clone it to share the queue
#[derive(Debug, Clone)]
pub struct Scheduler {
    sender: mpsc::UnboundedSender<Job>,
    counters: Arc<Counters>,
}

impl Scheduler {
    /// Start the actor on the current tokio runtime
    ///
    /// A zero request budget is raised to one.
    pub fn spawn(reasoner: Arc<dyn Reasoner>, mut config: SchedulerConfig) -> Self {
        config.max_requests_per_window = config.max_requests_per_window.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());

        let actor = Actor {
            reasoner,
            config,
            receiver,
            window: RateWindow::default(),
            counters: Arc::clone(&counters),
        };
        tokio::spawn(actor.run());

        Self { sender, counters }
    }

    /// Queue a request and wait for its outcome
    pub async fn submit(
        &self,
        kind: PromptKind,
        payload: String,
    ) -> Result<ReasonerResponse, ExternalError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Job {
                kind,
                payload,
                reply,
            })
            .map_err(|_| ExternalError::OtherFailure("scheduler is not running".to_string()))?;

        response
            .await
            .map_err(|_| ExternalError::OtherFailure("scheduler dropped the request".to_string()))?
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            retried: self.counters.retried.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

/// Instants of recent calls, oldest first
#[derive(Debug, Default)]
struct RateWindow {
    calls: VecDeque<Instant>,
}

impl RateWindow {
    /// Earliest instant at which another call may start
    fn next_slot(&mut self, now: Instant, config: &SchedulerConfig) -> Instant {
        let window = config.window();
        while let Some(&oldest) = self.calls.front() {
            if now.duration_since(oldest) >= window {
                self.calls.pop_front();
            } else {
                break;
            }
        }

        let mut slot = now;
        let budget = config.max_requests_per_window as usize;
        if self.calls.len() >= budget {
            // The call `budget` positions back must leave the window first
            let blocking = self.calls[self.calls.len() - budget];
            slot = slot.max(blocking + window);
        }
        if let Some(&last) = self.calls.back() {
            slot = slot.max(last + config.min_spacing());
        }
        slot
    }

    fn record(&mut self, at: Instant) {
        self.calls.push_back(at);
    }
}

struct Actor {
    reasoner: Arc<dyn Reasoner>,
    config: SchedulerConfig,
    receiver: mpsc::UnboundedReceiver<Job>,
    window: RateWindow,
    counters: Arc<Counters>,
}

impl Actor {
    async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            let result = self.process(job.kind, &job.payload).await;
            if result.is_err() {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
            }
            if job.reply.send(result).is_err() {
                debug!("Submitter went away before its result was ready");
            }
        }
        debug!("Scheduler queue closed, actor stopping");
    }

    /// Run one job with bounded retries on transient failures
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn process(
        &mut self,
        kind: PromptKind,
        payload: &str,
    ) -> Result<ReasonerResponse, ExternalError> {
        let mut attempt = 0;
        loop {
            self.wait_for_slot().await;
            self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
            if attempt > 0 {
                self.counters.retried.fetch_add(1, Ordering::Relaxed);
            }

            match self.reasoner.reason(kind, payload).await {
                Ok(raw) => return Ok(ReasonerResponse::parse(&raw)),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let backoff = self.config.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Transient reasoner failure, retrying"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(error = %err, attempts = attempt + 1, "Reasoner call failed");
                    return Err(err);
                }
            }
        }
    }

    async fn wait_for_slot(&mut self) {
        let slot = self.window.next_slot(Instant::now(), &self.config);
        if slot > Instant::now() {
            debug!(
                wait_ms = slot.duration_since(Instant::now()).as_millis() as u64,
                "Pacing external call"
            );
            sleep_until(slot).await;
        }
        self.window.record(Instant::now());
    }
}
