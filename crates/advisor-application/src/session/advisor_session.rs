use advisor_core::advisory::{AdvisoryBackend, routine_request};
use advisor_core::catalog::{Catalog, Product, ProductId};
use advisor_core::conversation::{ConversationLog, Message, Transcript, TranscriptEntry};
use advisor_core::error::{AdvisorError, Result};
use advisor_core::selection::{SelectionRepository, SelectionSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, broadcast};
use tracing::Instrument;
use uuid::Uuid;

use super::event::SessionEvent;
use crate::catalog_store::CatalogStore;

pub const EMPTY_SELECTION_NOTICE: &str = "Please select one or more products first.";
pub const GENERATE_PROMPT: &str = "Generate a routine for my selected products.";
pub const WORKING_NOTICE: &str = "Working on your routine…";
pub const REQUEST_FAILED_NOTICE: &str = "Network error — please try again.";

const EVENT_CAPACITY: usize = 64;

struct SessionState {
    selection: SelectionSet,
    conversation: ConversationLog,
    transcript: Transcript,
    rehydrated: bool,
}

/// Releases the in-flight flag on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AdvisorError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns the catalog, selection set, conversation log and transcript of one
/// user session, and mediates every call to the advisory backend.
///
/// State locks are never held across a network await. At most one advisory
/// request is in flight; a second `generate_routine` or `ask` issued before
/// the first resolves fails with `AdvisorError::Busy` and changes nothing.
///
/// Events that carry state are published while the write lock is held, so
/// observers receive them in the order the state changed.
pub struct AdvisorSession {
    id: Uuid,
    catalog: CatalogStore,
    selection_repository: Arc<dyn SelectionRepository>,
    backend: Arc<dyn AdvisoryBackend>,
    state: RwLock<SessionState>,
    in_flight: AtomicBool,
    events: broadcast::Sender<SessionEvent>,
}

impl AdvisorSession {
    /// Creates a session with an empty selection and a conversation that
    /// starts with `system_directive`.
    ///
    /// Nothing is loaded yet: call [`AdvisorSession::start`] to fetch the
    /// catalog and restore the persisted selection eagerly, or let the first
    /// catalog-dependent operation do it.
    pub fn new(
        catalog: CatalogStore,
        selection_repository: Arc<dyn SelectionRepository>,
        backend: Arc<dyn AdvisoryBackend>,
        system_directive: &str,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id: Uuid::new_v4(),
            catalog,
            selection_repository: Arc::clone(&selection_repository),
            backend,
            state: RwLock::new(SessionState {
                selection: SelectionSet::new(selection_repository),
                conversation: ConversationLog::with_system_directive(system_directive),
                transcript: Transcript::new(),
                rehydrated: false,
            }),
            in_flight: AtomicBool::new(false),
            events,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribes to state-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Loads the catalog and rehydrates the persisted selection.
    ///
    /// On failure the session stays usable with an empty selection; the next
    /// catalog-dependent call retries the fetch.
    pub async fn start(&self) -> Result<()> {
        self.ensure_loaded().await.map(|_| ())
    }

    // ============================================================================
    // Catalog views
    // ============================================================================

    /// Products of `category` (exact match), in catalog order.
    pub async fn products_in(&self, category: &str) -> Result<Vec<Arc<Product>>> {
        Ok(self.ensure_loaded().await?.by_category(category))
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        Ok(self.ensure_loaded().await?.categories())
    }

    // ============================================================================
    // Selection
    // ============================================================================

    /// Adds the product to the selection. Returns `true` if it was not selected before.
    pub async fn select(&self, id: &ProductId) -> Result<bool> {
        let catalog = self.ensure_loaded().await?;
        let product = catalog.by_id(id)?;
        self.mutate_selection(|selection| selection.add(product)).await
    }

    /// Removes the product from the selection. Returns `true` if it was selected.
    pub async fn deselect(&self, id: &ProductId) -> Result<bool> {
        self.ensure_loaded().await?;
        self.mutate_selection(|selection| selection.remove(id)).await
    }

    /// Flips the product's selection. Returns `true` if it is selected afterwards.
    pub async fn toggle(&self, id: &ProductId) -> Result<bool> {
        let catalog = self.ensure_loaded().await?;
        let product = catalog.by_id(id)?;
        let mut state = self.state.write().await;
        let selected = state.selection.toggle(product)?;
        self.emit(SessionEvent::SelectionChanged {
            selected: state.selection.ids(),
        });
        drop(state);

        tracing::debug!("[AdvisorSession] Toggled {} -> selected={}", id, selected);
        Ok(selected)
    }

    pub async fn clear_selection(&self) -> Result<()> {
        self.ensure_loaded().await?;
        self.mutate_selection(|selection| selection.clear().map(|_| true))
            .await
            .map(|_| ())
    }

    /// Insertion-ordered snapshot of the selection.
    pub async fn selection(&self) -> Vec<Arc<Product>> {
        self.state.read().await.selection.values()
    }

    pub async fn is_selected(&self, id: &ProductId) -> bool {
        self.state.read().await.selection.has(id)
    }

    // ============================================================================
    // Conversation
    // ============================================================================

    /// Asks the advisor for a routine built from the current selection.
    ///
    /// # Errors
    ///
    /// - `Busy` if another request is in flight (nothing changes)
    /// - `Precondition` if the selection is empty (a notice is added to the
    ///   transcript, no request is made)
    /// - `Remote`, `Network`, `Configuration` if the round-trip fails (a
    ///   notice is added; the log keeps only the synthesized user message)
    pub async fn generate_routine(&self) -> Result<Message> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        if let Err(err) = self.ensure_loaded().await {
            tracing::warn!("[AdvisorSession] Generating without catalog: {}", err);
        }

        let mut state = self.state.write().await;
        if state.selection.is_empty() {
            let notice = state.transcript.push_notice(EMPTY_SELECTION_NOTICE).clone();
            self.emit(SessionEvent::TranscriptAppended { entry: notice });
            drop(state);
            return Err(AdvisorError::precondition(
                "Generating a routine requires at least one selected product",
            ));
        }

        let request = routine_request(&state.selection.values())?;
        state.conversation.push(request);
        let prompt = state.transcript.push_user(GENERATE_PROMPT).clone();
        self.emit(SessionEvent::TranscriptAppended { entry: prompt });
        let working = state.transcript.push_notice(WORKING_NOTICE).clone();
        self.emit(SessionEvent::TranscriptAppended { entry: working });
        let messages = state.conversation.snapshot().to_vec();
        drop(state);

        self.round_trip(messages).await
    }

    /// Sends a follow-up question.
    ///
    /// Blank input is ignored and returns `Ok(None)`. Errors are the same as
    /// for [`AdvisorSession::generate_routine`], minus `Precondition`.
    pub async fn ask(&self, text: &str) -> Result<Option<Message>> {
        let question = text.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let mut state = self.state.write().await;
        state.conversation.push(Message::user(question));
        let entry = state.transcript.push_user(question).clone();
        self.emit(SessionEvent::TranscriptAppended { entry });
        let messages = state.conversation.snapshot().to_vec();
        drop(state);

        self.round_trip(messages).await.map(Some)
    }

    /// Snapshot of the conversation log as it will be sent on the next request.
    pub async fn conversation(&self) -> Vec<Message> {
        self.state.read().await.conversation.snapshot().to_vec()
    }

    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.state.read().await.transcript.entries().to_vec()
    }

    /// True while an advisory request is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn ensure_loaded(&self) -> Result<Arc<Catalog>> {
        let catalog = self.catalog.load().await?;

        let mut state = self.state.write().await;
        if state.rehydrated {
            return Ok(catalog);
        }

        state.selection =
            SelectionSet::rehydrate(Arc::clone(&self.selection_repository), &catalog);
        state.rehydrated = true;
        let restored = state.selection.len();
        self.emit(SessionEvent::CatalogLoaded {
            product_count: catalog.len(),
        });
        self.emit(SessionEvent::SelectionChanged {
            selected: state.selection.ids(),
        });
        drop(state);

        tracing::info!(
            "[AdvisorSession] Session {} ready: {} product(s), {} restored selection(s)",
            self.id,
            catalog.len(),
            restored
        );
        Ok(catalog)
    }

    async fn mutate_selection<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut SelectionSet) -> Result<bool>,
    {
        let mut state = self.state.write().await;
        let changed = mutate(&mut state.selection)?;
        if changed {
            self.emit(SessionEvent::SelectionChanged {
                selected: state.selection.ids(),
            });
        }
        Ok(changed)
    }

    async fn round_trip(&self, messages: Vec<Message>) -> Result<Message> {
        let span = tracing::info_span!(
            "advisory_request",
            session_id = %self.id,
            message_count = messages.len()
        );

        self.emit(SessionEvent::RequestStarted);
        let result = self
            .backend
            .request_reply(&messages)
            .instrument(span)
            .await;

        let mut state = self.state.write().await;
        match result {
            Ok(reply) => {
                state.conversation.push(reply.clone());
                let entry = state.transcript.push_advisor(reply.content.clone()).clone();
                self.emit(SessionEvent::TranscriptAppended { entry });
                self.emit(SessionEvent::RequestFinished { succeeded: true });
                drop(state);

                tracing::info!("[AdvisorSession] Advisory reply received");
                Ok(reply)
            }
            Err(err) => {
                let entry = state.transcript.push_notice(REQUEST_FAILED_NOTICE).clone();
                self.emit(SessionEvent::TranscriptAppended { entry });
                self.emit(SessionEvent::RequestFinished { succeeded: false });
                drop(state);

                tracing::error!("[AdvisorSession] Advisory request failed: {}", err);
                Err(err)
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }
}
