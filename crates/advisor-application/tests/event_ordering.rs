use advisor_application::{AdvisorSession, CatalogStore, SessionEvent};
use advisor_core::advisory::AdvisoryBackend;
use advisor_core::catalog::{Catalog, CatalogSource, ProductId};
use advisor_core::conversation::Message;
use advisor_core::error::Result;
use advisor_infrastructure::StorageSelectionRepository;
use advisor_infrastructure::storage::MemoryKeyValueStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;

const PRODUCT_COUNT: usize = 4;
const ROUNDS: usize = 200;

struct ShelfSource;

#[async_trait]
impl CatalogSource for ShelfSource {
    async fn fetch(&self) -> Result<Catalog> {
        let products: Vec<String> = (1..=PRODUCT_COUNT)
            .map(|id| {
                format!(
                    r#"{{"id": {id}, "brand": "b", "name": "p{id}", "category": "c",
                        "description": "d", "image": "i"}}"#
                )
            })
            .collect();
        let document = format!(r#"{{"products": [{}]}}"#, products.join(","));
        Catalog::from_json("shelf", document.as_bytes())
    }

    fn describe(&self) -> String {
        "shelf".to_string()
    }
}

struct EchoBackend;

#[async_trait]
impl AdvisoryBackend for EchoBackend {
    async fn request_reply(&self, messages: &[Message]) -> Result<Message> {
        Ok(Message::assistant(format!("echo {}", messages.len())))
    }
}

fn session() -> Arc<AdvisorSession> {
    Arc::new(AdvisorSession::new(
        CatalogStore::new(Arc::new(ShelfSource)),
        Arc::new(StorageSelectionRepository::new(Arc::new(MemoryKeyValueStore::new()))),
        Arc::new(EchoBackend),
        "system",
    ))
}

fn last_selection_event(events: &mut Receiver<SessionEvent>) -> Option<Vec<ProductId>> {
    let mut last = None;
    while let Ok(event) = events.try_recv() {
        if let SessionEvent::SelectionChanged { selected } = event {
            last = Some(selected);
        }
    }
    last
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_selection_event_matches_state_under_concurrent_toggles() {
    let session = session();
    session.start().await.unwrap();
    let mut events = session.subscribe();

    for _ in 0..ROUNDS {
        let tasks: Vec<_> = (1..=PRODUCT_COUNT)
            .map(|id| {
                let session = Arc::clone(&session);
                tokio::spawn(async move {
                    session.toggle(&ProductId::from(id as u64)).await.unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let published = last_selection_event(&mut events).unwrap();
        let current: Vec<ProductId> = session
            .selection()
            .await
            .iter()
            .map(|product| product.id.clone())
            .collect();
        assert_eq!(published, current);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_transcript_events_follow_transcript_order() {
    let session = session();
    let mut events = session.subscribe();

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                // Concurrent asks may be rejected as busy; only accepted ones count.
                let _ = session.ask(&format!("question {n}")).await;
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let mut published = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let SessionEvent::TranscriptAppended { entry } = event {
            published.push(entry);
        }
    }
    assert_eq!(published, session.transcript().await);
}
