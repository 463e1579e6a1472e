//! # Price Worker
//!
//! Recomputes prices in the background. Every submission gets the next
//! generation number; a result is only published if no newer submission
//! arrived while it was computing. Older callers get
//! [`PriceError::Superseded`] as soon as newer input is submitted.
//!
//! Progress is observable through a `watch` channel of [`PriceState`], so a
//! view can show a "calculating" indicator.

use super::{calculate, load_rates, PriceConfig, PriceError, RateSource};
use crate::model::{MaterialSpec, PriceBreakdown};
use atelier_framework::{ApiError, Response};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// What the worker is currently showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PriceState {
    #[default]
    Idle,
    Calculating {
        generation: u64,
    },
    Ready {
        generation: u64,
        breakdown: PriceBreakdown,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

impl PriceState {
    pub fn is_calculating(&self) -> bool {
        matches!(self, PriceState::Calculating { .. })
    }

    pub fn breakdown(&self) -> Option<&PriceBreakdown> {
        match self {
            PriceState::Ready { breakdown, .. } => Some(breakdown),
            _ => None,
        }
    }
}

pub enum PriceRequest {
    Calculate {
        spec: MaterialSpec,
        respond_to: Response<Result<PriceBreakdown, PriceError>>,
    },
}

type Completion = (u64, Result<PriceBreakdown, ApiError>);

pub struct PriceWorker {
    receiver: mpsc::Receiver<PriceRequest>,
    source: Arc<dyn RateSource>,
    config: PriceConfig,
    state: watch::Sender<PriceState>,
    latest: u64,
    pending: HashMap<u64, Response<Result<PriceBreakdown, PriceError>>>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
}

impl PriceWorker {
    pub fn new(
        source: Arc<dyn RateSource>,
        config: PriceConfig,
        buffer_size: usize,
    ) -> (Self, PriceHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (state, state_rx) = watch::channel(PriceState::Idle);
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let worker = Self {
            receiver,
            source,
            config,
            state,
            latest: 0,
            pending: HashMap::new(),
            done_tx,
            done_rx,
        };
        let handle = PriceHandle {
            sender,
            state: state_rx,
        };
        (worker, handle)
    }

    /// Runs until every [`PriceHandle`] is dropped.
    pub async fn run(mut self) {
        info!("Price worker started");
        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(PriceRequest::Calculate { spec, respond_to }) => self.submit(spec, respond_to),
                    None => break,
                },
                Some((generation, result)) = self.done_rx.recv() => self.complete(generation, result),
            }
        }
        info!(generation = self.latest, "Price worker shutdown");
    }

    fn submit(&mut self, spec: MaterialSpec, respond_to: Response<Result<PriceBreakdown, PriceError>>) {
        self.latest += 1;
        let generation = self.latest;
        debug!(generation, ?spec, "Price calculation submitted");

        for (older, responder) in self.pending.drain() {
            debug!(generation = older, "Superseded");
            let _ = responder.send(Err(PriceError::Superseded { generation: older }));
        }
        self.pending.insert(generation, respond_to);
        self.state.send_replace(PriceState::Calculating { generation });

        let source = self.source.clone();
        let config = self.config;
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let result = load_rates(source.as_ref())
                .await
                .map(|rates| calculate(&spec, &rates, &config));
            let _ = done.send((generation, result));
        });
    }

    fn complete(&mut self, generation: u64, result: Result<PriceBreakdown, ApiError>) {
        if generation != self.latest {
            debug!(generation, latest = self.latest, "Discarding stale price result");
            return;
        }
        let responder = self.pending.remove(&generation);
        match result {
            Ok(breakdown) => {
                info!(generation, total_inr = breakdown.total_inr, "Price ready");
                self.state.send_replace(PriceState::Ready {
                    generation,
                    breakdown: breakdown.clone(),
                });
                if let Some(responder) = responder {
                    let _ = responder.send(Ok(breakdown));
                }
            }
            Err(e) => {
                warn!(generation, error = %e, "Price calculation failed");
                self.state.send_replace(PriceState::Failed {
                    generation,
                    message: e.to_string(),
                });
                if let Some(responder) = responder {
                    let _ = responder.send(Err(PriceError::Rates(e)));
                }
            }
        }
    }
}

/// Cloneable handle to a running [`PriceWorker`].
#[derive(Clone, Debug)]
pub struct PriceHandle {
    sender: mpsc::Sender<PriceRequest>,
    state: watch::Receiver<PriceState>,
}

impl PriceHandle {
    /// Submits `spec` and waits for its result.
    ///
    /// Fails with [`PriceError::Superseded`] if newer input is submitted
    /// before this one completes.
    #[tracing::instrument(skip(self))]
    pub async fn calculate(&self, spec: MaterialSpec) -> Result<PriceBreakdown, PriceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PriceRequest::Calculate { spec, respond_to })
            .await
            .map_err(|_| PriceError::WorkerClosed)?;
        response.await.map_err(|_| PriceError::WorkerDropped)?
    }

    /// Submits `spec` without waiting. Watch [`state`](Self::state) for the outcome.
    pub async fn submit(&self, spec: MaterialSpec) -> Result<(), PriceError> {
        let (respond_to, _response) = oneshot::channel();
        self.sender
            .send(PriceRequest::Calculate { spec, respond_to })
            .await
            .map_err(|_| PriceError::WorkerClosed)
    }

    pub fn state(&self) -> PriceState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetalType, StoneType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Metal rates whose first fetch is slow, so the first calculation
    /// finishes after the second.
    struct SlowFirstFetch {
        calls: AtomicU32,
    }

    #[async_trait]
    impl RateSource for SlowFirstFetch {
        async fn metal_types(&self) -> Result<Vec<MetalType>, ApiError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Ok(vec![MetalType {
                id: 1,
                name: "Gold".into(),
                price_per_gram: 5000.0,
                description: None,
            }])
        }

        async fn stone_types(&self) -> Result<Vec<StoneType>, ApiError> {
            Ok(vec![])
        }
    }

    struct Offline;

    #[async_trait]
    impl RateSource for Offline {
        async fn metal_types(&self) -> Result<Vec<MetalType>, ApiError> {
            Err(ApiError::Server {
                status: 503,
                message: "maintenance".into(),
            })
        }

        async fn stone_types(&self) -> Result<Vec<StoneType>, ApiError> {
            Ok(vec![])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_never_overwrites_newer() {
        let source = Arc::new(SlowFirstFetch {
            calls: AtomicU32::new(0),
        });
        let (worker, handle) = PriceWorker::new(source, PriceConfig::default(), 8);
        tokio::spawn(worker.run());

        let first = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.calculate(MaterialSpec::new("Gold", 1.0)).await })
        };
        // Let the first submission reach the worker before the second.
        while !handle.state().is_calculating() {
            tokio::task::yield_now().await;
        }
        let second = handle.calculate(MaterialSpec::new("Gold", 2.0)).await.unwrap();
        assert_eq!(second.metal_cost, 10000.0);

        let first = first.await.unwrap();
        assert!(matches!(first, Err(PriceError::Superseded { generation: 1 })));

        // The slow first result lands later and must be ignored.
        tokio::time::sleep(Duration::from_millis(500)).await;
        match handle.state() {
            PriceState::Ready {
                generation,
                breakdown,
            } => {
                assert_eq!(generation, 2);
                assert_eq!(breakdown.metal_cost, 10000.0);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_state_reports_failure() {
        let (worker, handle) = PriceWorker::new(Arc::new(Offline), PriceConfig::default(), 8);
        tokio::spawn(worker.run());
        assert_eq!(handle.state(), PriceState::Idle);

        let result = handle.calculate(MaterialSpec::new("Gold", 1.0)).await;
        assert!(matches!(result, Err(PriceError::Rates(ApiError::Server { status: 503, .. }))));
        assert!(matches!(handle.state(), PriceState::Failed { generation: 1, .. }));
    }

    #[tokio::test]
    async fn test_closed_worker() {
        let (worker, handle) = PriceWorker::new(Arc::new(Offline), PriceConfig::default(), 8);
        drop(worker);
        let result = handle.calculate(MaterialSpec::default()).await;
        assert!(matches!(result, Err(PriceError::WorkerClosed)));
    }
}
