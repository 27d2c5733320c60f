use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// The events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Requisition events
    RequisitionCreated(i64),
    RequisitionUpdated(i64),
    RequisitionDeleted(i64),

    // Tender events
    TenderCreated(i64),
    TenderUpdated(i64),
    TenderDeleted(i64),
    TenderCommitteeMemberAdded {
        tender_id: i64,
        employee_id: i64,
        committee: String,
    },
    TenderCommitteeMemberRemoved {
        tender_id: i64,
        employee_id: i64,
        committee: String,
    },

    // Contract events
    ContractCreated(i64),
    ContractUpdated(i64),
    ContractDeleted(i64),

    // Directory events
    EmployeeCreated(i64),
    EmployeeUpdated(i64),
    EmployeeDeactivated(i64),

    // Bulk import events
    ImportCompleted {
        target: String,
        created: usize,
        updated: usize,
        skipped: usize,
    },

    // Account events
    UserRegistered(Uuid),
    UserLoggedIn(Uuid),
}

/// Drains the event channel and logs each event. Runs for the lifetime of
/// the server task it is spawned on.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::ImportCompleted {
                target,
                created,
                updated,
                skipped,
            } => {
                info!(
                    target_entity = %target,
                    created, updated, skipped,
                    "Bulk import completed"
                );
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}
