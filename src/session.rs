//! Terminal session state.
//!
//! A [`Session`] is either idle or busy with exactly one command. Every
//! transition consumes the session and returns the next one, so the egui
//! front end never mutates the transcript directly.

use tracing::{debug, warn};

use crate::config::DEFAULT_BANNER;
use crate::resolver::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    System,
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    text: String,
}

impl Entry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only list of entries; only a full reset removes anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    fn starting_with(banner: &str) -> Self {
        Self {
            entries: vec![Entry::new(EntryKind::System, banner)],
        }
    }

    fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    banner: String,
    transcript: Transcript,
    busy: bool,
    pending_input: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_BANNER)
    }
}

impl Session {
    pub fn new(banner: impl Into<String>) -> Self {
        let banner = banner.into();
        Self {
            transcript: Transcript::starting_with(&banner),
            banner,
            busy: false,
            pending_input: String::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the text currently sitting in the prompt.
    #[must_use]
    pub fn edit(mut self, text: impl Into<String>) -> Self {
        self.pending_input = text.into();
        self
    }

    /// Accept `text` as the next command.
    ///
    /// Returns the accepted command alongside the busy session, or `None` when
    /// the text is blank or another command is still being resolved. In both
    /// of those cases the session comes back untouched.
    #[must_use]
    pub fn submit(mut self, text: &str) -> (Self, Option<String>) {
        if text.trim().is_empty() {
            return (self, None);
        }
        if self.busy {
            debug!("ignoring submission while a command is in flight");
            return (self, None);
        }

        self.transcript
            .push(Entry::new(EntryKind::Input, format!("> {text}")));
        self.pending_input.clear();
        self.busy = true;
        (self, Some(text.to_owned()))
    }

    /// Feed the resolver's answer back in and return to idle.
    #[must_use]
    pub fn complete(mut self, resolution: Resolution) -> Self {
        if !self.busy {
            warn!("dropping a resolution that arrived while idle");
            return self;
        }

        if resolution.reset_session {
            self.transcript = Transcript::starting_with(&self.banner);
        } else if !resolution.text.is_empty() {
            self.transcript
                .push(Entry::new(EntryKind::Output, resolution.text));
        }
        self.busy = false;
        self
    }
}
