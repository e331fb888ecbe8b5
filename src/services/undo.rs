//! Undo-able Delete
//!
//! Deleting a prompt goes through two slots. The confirmation slot holds the
//! prompt the user asked to delete. Confirming moves it to the undo slot,
//! hides it from the in-memory list and starts a countdown. Only when the
//! countdown expires (or the slot is flushed) is the removal written to the
//! store. Undo before expiry puts the prompt back without touching storage.
//!
//! Each undo slot carries a ticket. A countdown that fires after its slot was
//! undone or superseded sees a different ticket and does nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::prompt::PromptRepository;
use crate::models::prompt::Prompt;
use crate::utils::error::AppResult;

/// The session's in-memory prompt list, shared with the delete flow
pub type SharedPrompts = Arc<RwLock<Vec<Prompt>>>;

struct PendingUndo {
    prompt: Prompt,
    ticket: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct DeleteSlot {
    confirm: Option<Prompt>,
    undo: Option<PendingUndo>,
    next_ticket: u64,
}

/// Delete state machine: `Active -> PendingConfirm -> PendingUndo ->
/// {Restored | Finalized}`
#[derive(Clone)]
pub struct DeleteFlow {
    slot: Arc<Mutex<DeleteSlot>>,
    prompts: SharedPrompts,
    repo: PromptRepository,
    window: Duration,
}

impl DeleteFlow {
    pub fn new(repo: PromptRepository, prompts: SharedPrompts, window: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(DeleteSlot::default())),
            prompts,
            repo,
            window,
        }
    }

    /// Length of the undo window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Ask for confirmation. Replaces any earlier unconfirmed request.
    ///
    /// A prompt still waiting in the undo slot is finalized first, so only
    /// one removal is ever undoable.
    pub async fn initiate(&self, prompt: Prompt) -> AppResult<()> {
        let mut slot = self.slot.lock().await;
        let superseded = slot.undo.as_ref().map(|p| p.ticket);
        if let Some(ticket) = superseded {
            if let Some(previous) = self.finalize_locked(&mut *slot, ticket).await? {
                info!(id = %previous.id, "finalized superseded delete");
            }
        }

        debug!(id = %prompt.id, "delete requested");
        slot.confirm = Some(prompt);
        Ok(())
    }

    /// Dismiss the confirmation without deleting
    pub async fn cancel(&self) -> Option<Prompt> {
        self.slot.lock().await.confirm.take()
    }

    /// Confirm the pending request: hide the prompt and start the countdown
    pub async fn confirm(&self) -> AppResult<Option<Prompt>> {
        let mut slot = self.slot.lock().await;
        let Some(prompt) = slot.confirm.take() else {
            return Ok(None);
        };
        self.prompts.write().await.retain(|p| p.id != prompt.id);

        slot.next_ticket += 1;
        let ticket = slot.next_ticket;
        let token = CancellationToken::new();
        slot.undo = Some(PendingUndo {
            prompt: prompt.clone(),
            ticket,
            token: token.clone(),
        });

        let flow = self.clone();
        let window = self.window;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => {
                    if let Err(e) = flow.finalize_ticket(ticket).await {
                        warn!(error = %e, "failed to finalize delete");
                    }
                }
            }
        });

        info!(id = %prompt.id, window_ms = window.as_millis() as u64, "delete pending undo");
        Ok(Some(prompt))
    }

    /// Restore the prompt in the undo slot. No store write.
    pub async fn undo(&self) -> Option<Prompt> {
        let mut slot = self.slot.lock().await;
        let pending = slot.undo.take()?;
        pending.token.cancel();

        self.prompts.write().await.push(pending.prompt.clone());
        info!(id = %pending.prompt.id, "delete undone");
        Some(pending.prompt)
    }

    /// Persist the pending removal now instead of waiting for the countdown
    pub async fn finalize(&self) -> AppResult<Option<Prompt>> {
        let mut slot = self.slot.lock().await;
        let Some(pending) = slot.undo.as_ref() else {
            return Ok(None);
        };
        let ticket = pending.ticket;
        self.finalize_locked(&mut *slot, ticket).await
    }

    async fn finalize_ticket(&self, ticket: u64) -> AppResult<Option<Prompt>> {
        let mut slot = self.slot.lock().await;
        self.finalize_locked(&mut *slot, ticket).await
    }

    async fn finalize_locked(
        &self,
        slot: &mut DeleteSlot,
        ticket: u64,
    ) -> AppResult<Option<Prompt>> {
        match slot.undo.as_ref() {
            Some(pending) if pending.ticket == ticket => {
                self.repo.remove(&pending.prompt.id).await?;
            }
            _ => {
                debug!(ticket, "stale delete countdown ignored");
                return Ok(None);
            }
        }

        let pending = slot.undo.take();
        Ok(pending.map(|p| {
            p.token.cancel();
            info!(id = %p.prompt.id, "delete finalized");
            p.prompt
        }))
    }

    /// Prompt awaiting confirmation, if any
    pub async fn pending_confirm(&self) -> Option<Prompt> {
        self.slot.lock().await.confirm.clone()
    }

    /// Prompt inside the undo window, if any
    pub async fn pending_undo(&self) -> Option<Prompt> {
        self.slot
            .lock()
            .await
            .undo
            .as_ref()
            .map(|p| p.prompt.clone())
    }
}
