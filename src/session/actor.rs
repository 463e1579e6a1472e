//! # Session Actor
//!
//! One actor per open product editor. It owns what the editor displays and
//! serializes every change to it: user commands from the
//! [`SessionHandle`](super::SessionHandle), background refreshes, and the
//! completion of its own save.
//!
//! ## Save protocol
//!
//! ```text
//! Submit      Editing -> Saving       suppress cache key, apply draft optimistically,
//!                                     send the request from a spawned task
//! Success     Saving -> Reconciling   commit server response, recompute price
//!                                     (materials only), release key, refetch
//!             Reconciling -> Idle
//! Failure     Saving -> Editing       roll back, keep draft, release key, notify
//! ```
//!
//! The save runs in its own task so the actor keeps answering snapshot and
//! refresh commands while the request is in flight. Refreshes that arrive in
//! `Saving` or `Reconciling` are dropped.

use super::{Draft, Section, SessionError, SessionEvent, SessionHandle, SessionState};
use crate::clients::ProductClient;
use crate::model::{PriceBreakdown, Product, ProductId};
use crate::notify::Notifier;
use crate::pricing::PriceHandle;
use atelier_framework::{
    ApiError, ApiRequest, Optimistic, Resource, ResourceApi, Response, SuppressionGuard,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything an editor view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub product: Product,
    pub draft: Option<Draft>,
    pub price: Option<PriceBreakdown>,
}

pub enum SessionCommand {
    Open {
        section: Section,
        respond_to: Response<Result<Draft, SessionError>>,
    },
    UpdateDraft {
        draft: Draft,
        respond_to: Response<Result<(), SessionError>>,
    },
    Cancel {
        respond_to: Response<Result<(), SessionError>>,
    },
    /// Answered once the save has completed or failed.
    Submit {
        respond_to: Response<Result<Product, SessionError>>,
    },
    /// A background fetch of the product. Answers whether it was applied.
    Refresh {
        product: Product,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<SessionSnapshot>,
    },
}

struct SaveOutcome {
    section: Section,
    result: Result<Value, ApiError>,
}

struct InFlight {
    guard: SuppressionGuard,
    respond_to: Response<Result<Product, SessionError>>,
}

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionCommand>,
    product_id: ProductId,
    state: SessionState,
    displayed: Optimistic<Product>,
    draft: Option<Draft>,
    price: Option<PriceBreakdown>,
    products: ProductClient,
    pricing: PriceHandle,
    notifier: Notifier,
    in_flight: Option<InFlight>,
    saves_tx: mpsc::Sender<SaveOutcome>,
    saves_rx: mpsc::Receiver<SaveOutcome>,
}

impl SessionActor {
    pub fn new(
        product: Product,
        products: ProductClient,
        pricing: PriceHandle,
        notifier: Notifier,
    ) -> (Self, SessionHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let (saves_tx, saves_rx) = mpsc::channel(1);
        let product_id = product.id;
        let actor = Self {
            receiver,
            product_id,
            state: SessionState::Idle,
            displayed: Optimistic::new(product),
            draft: None,
            price: None,
            products,
            pricing,
            notifier,
            in_flight: None,
            saves_tx,
            saves_rx,
        };
        (actor, SessionHandle::new(sender, product_id))
    }

    /// Runs until the handle is dropped.
    pub async fn run(mut self) {
        info!(product_id = %self.product_id, "Edit session started");
        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                Some(outcome) = self.saves_rx.recv() => self.finish_save(outcome).await,
            }
        }
        if self.in_flight.is_some() {
            warn!(product_id = %self.product_id, "Edit session closed with a save in flight");
        }
        info!(product_id = %self.product_id, state = ?self.state, "Edit session closed");
    }

    fn transition(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        let next = self.state.on(event)?;
        debug!(product_id = %self.product_id, from = ?self.state, to = ?next, "Transition");
        self.state = next;
        Ok(())
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            product: self.displayed.current().clone(),
            draft: self.draft.clone(),
            price: self.price.clone(),
        }
    }

    async fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Open {
                section,
                respond_to,
            } => {
                let result = self.transition(SessionEvent::Open(section)).map(|()| {
                    let draft = Draft::from_product(section, self.displayed.current());
                    self.draft = Some(draft.clone());
                    draft
                });
                let _ = respond_to.send(result);
            }
            SessionCommand::UpdateDraft { draft, respond_to } => {
                let result = match self.state {
                    SessionState::Editing(section) if section == draft.section() => {
                        self.draft = Some(draft);
                        Ok(())
                    }
                    SessionState::Editing(expected) => Err(SessionError::SectionMismatch {
                        expected,
                        found: draft.section(),
                    }),
                    state => Err(SessionError::NotEditing { state }),
                };
                let _ = respond_to.send(result);
            }
            SessionCommand::Cancel { respond_to } => {
                let result = self.transition(SessionEvent::Cancel).map(|()| {
                    self.draft = None;
                });
                let _ = respond_to.send(result);
            }
            SessionCommand::Submit { respond_to } => match self.prepare_save().await {
                Ok((request, optimistic, guard)) => {
                    self.dispatch_save(request, optimistic, guard, respond_to)
                }
                Err(e) => {
                    debug!(product_id = %self.product_id, error = %e, "Save not started");
                    let _ = respond_to.send(Err(e));
                }
            },
            SessionCommand::Refresh {
                product,
                respond_to,
            } => {
                let applied = self.apply_refresh(product);
                let _ = respond_to.send(applied);
            }
            SessionCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
        }
    }

    fn apply_refresh(&mut self, product: Product) -> bool {
        if product.id != self.product_id {
            return false;
        }
        if self.state.suppresses_refresh() {
            debug!(product_id = %self.product_id, state = ?self.state, "Ignoring refresh during save");
            return false;
        }
        self.displayed.refresh(product)
    }

    /// Applies the optimistic value and sends the request from its own task.
    fn dispatch_save(
        &mut self,
        request: ApiRequest,
        optimistic: Product,
        guard: SuppressionGuard,
        respond_to: Response<Result<Product, SessionError>>,
    ) {
        self.displayed.apply(|shown| *shown = optimistic);
        self.in_flight = Some(InFlight { guard, respond_to });

        let section = self.state.section().unwrap_or(Section::Basic);
        info!(product_id = %self.product_id, %section, "Saving");
        let products = self.products.clone();
        let saves = self.saves_tx.clone();
        tokio::spawn(async move {
            let result = products.send(request).await;
            let _ = saves.send(SaveOutcome { section, result }).await;
        });
    }

    /// Validates the draft, freezes the cache key and enters `Saving`.
    /// Errors leave the session in `Editing`.
    async fn prepare_save(
        &mut self,
    ) -> Result<(ApiRequest, Product, SuppressionGuard), SessionError> {
        let section = match self.state {
            SessionState::Editing(section) => section,
            state => {
                return Err(SessionError::InvalidTransition {
                    state,
                    event: SessionEvent::Submit,
                })
            }
        };
        let draft = self.draft.as_ref().ok_or(SessionError::EmptyDraft(section))?;
        let prepared = draft.prepare(self.displayed.current())?;

        let key = Product::item_path(&self.product_id);
        let guard = self.products.inner().cache().suppress(&key).await?;
        self.transition(SessionEvent::Submit)?;
        Ok((prepared.request, prepared.optimistic, guard))
    }

    async fn finish_save(&mut self, outcome: SaveOutcome) {
        let Some(in_flight) = self.in_flight.take() else {
            warn!(product_id = %self.product_id, "Save result without a save in flight");
            return;
        };
        let SaveOutcome { section, result } = outcome;

        match result {
            Ok(response) => {
                self.advance(SessionEvent::SaveSucceeded);
                let confirmed = match serde_json::from_value::<Product>(response) {
                    Ok(product) if product.id == self.product_id => product,
                    _ => self.displayed.current().clone(),
                };
                self.displayed.commit(confirmed);

                if section == Section::Materials {
                    self.recompute_price().await;
                }

                drop(in_flight.guard);
                match self.products.refresh(self.product_id).await {
                    Ok(fresh) => {
                        self.displayed.refresh(fresh);
                    }
                    Err(e) => warn!(product_id = %self.product_id, error = %e, "Refetch after save failed"),
                }

                self.draft = None;
                self.advance(SessionEvent::Reconciled);
                info!(product_id = %self.product_id, %section, "Saved");
                self.notifier.success(format!("Saved {section}"));
                let _ = in_flight
                    .respond_to
                    .send(Ok(self.displayed.current().clone()));
            }
            Err(e) => {
                self.advance(SessionEvent::SaveFailed);
                self.displayed.rollback();
                drop(in_flight.guard);
                warn!(product_id = %self.product_id, %section, error = %e, "Save failed");
                self.notifier.api_error(&format!("Saving {section} failed"), &e);
                let _ = in_flight
                    .respond_to
                    .send(Err(SessionError::Save { section, source: e }));
            }
        }
    }

    /// Transitions that cannot fail given the save protocol.
    fn advance(&mut self, event: SessionEvent) {
        if let Err(e) = self.transition(event) {
            warn!(error = %e, "Unexpected session transition");
        }
    }

    async fn recompute_price(&mut self) {
        let spec = self.displayed.current().material_spec();
        match self.pricing.calculate(spec).await {
            Ok(breakdown) => self.price = Some(breakdown),
            Err(e) => {
                // The previous breakdown priced the old materials.
                self.price = None;
                warn!(product_id = %self.product_id, error = %e, "Price recompute failed");
            }
        }
    }
}
