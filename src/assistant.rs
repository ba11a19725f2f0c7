use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::resolver::{self, Resolution};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("still working on {0:?}")]
    Busy(String),
}

struct Pending {
    command: String,
    receiver: oneshot::Receiver<Resolution>,
}

/// Runs the resolver after a fixed "thinking" delay on the tokio runtime.
///
/// Only one command may be in flight. The answer lands in a single slot that
/// the UI drains with [`CodeAssistant::poll`] once per frame.
pub struct CodeAssistant {
    delay: Duration,
    pending: Option<Pending>,
}

impl CodeAssistant {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start resolving `command`. Must be called from inside a tokio runtime.
    pub fn request(&mut self, command: String) -> Result<(), AssistantError> {
        if let Some(pending) = &self.pending {
            return Err(AssistantError::Busy(pending.command.clone()));
        }

        let (sender, receiver) = oneshot::channel();
        let delay = self.delay;
        let input = command.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The UI may have closed in the meantime; nobody is left to tell.
            let _ = sender.send(resolver::resolve(&input));
        });

        debug!(delay_ms = delay.as_millis() as u64, "command dispatched");
        self.pending = Some(Pending { command, receiver });
        Ok(())
    }

    /// Take the finished resolution, if there is one.
    pub fn poll(&mut self) -> Option<Resolution> {
        let pending = self.pending.as_mut()?;
        match pending.receiver.try_recv() {
            Ok(resolution) => {
                self.pending = None;
                Some(resolution)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                let pending = self.pending.take()?;
                warn!(command = %pending.command, "resolver task went away, answering inline");
                Some(resolver::resolve(&pending.command))
            }
        }
    }
}
