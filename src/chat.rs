use crate::error::AResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bot text appended when an exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "Error fetching response.";

/// Backend behavior requested with every outbound message.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    ResumeJob,
    JobMatch,
    Info,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::ResumeJob, Mode::JobMatch, Mode::Info];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Mode::ResumeJob => "resume-job",
            Mode::JobMatch => "job-match",
            Mode::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::ResumeJob => "Resume-Job",
            Mode::JobMatch => "Job Match",
            Mode::Info => "Info",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Mode::ResumeJob => 0,
            Mode::JobMatch => 1,
            Mode::Info => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Role {
    User,
    Bot,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "[USER]"),
            Role::Bot => write!(f, "[BOT]"),
        }
    }
}

/// One transcript entry. Fields are private so entries cannot change after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    text: String,
    sender: Role,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Role::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Role::Bot,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Role {
        self.sender
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Expanded,
    Minimized,
}

/// A committed send, waiting to be handed to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outbound {
    pub seq: u64,
    pub text: String,
    pub mode: Mode,
}

/// Widget state for the lifetime of one UI instance.
///
/// All mutation happens through the methods below, called from a single event loop.
/// Network work is never done here: [`ChatSession::send_message`] returns an
/// [`Outbound`] and the caller reports the outcome with
/// [`ChatSession::receive_reply`].
#[derive(Debug, Default)]
pub struct ChatSession {
    visibility: Visibility,
    mode: Mode,
    transcript: Vec<Message>,
    draft: String,
    in_flight: BTreeSet<u64>,
    next_seq: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn toggle_open(&mut self) -> Visibility {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Expanded,
            Visibility::Expanded | Visibility::Minimized => Visibility::Closed,
        };
        tracing::debug!(visibility = ?self.visibility, "toggled open");
        self.visibility
    }

    pub fn toggle_minimize(&mut self) -> Visibility {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Closed,
            Visibility::Expanded => Visibility::Minimized,
            Visibility::Minimized => Visibility::Expanded,
        };
        tracing::debug!(visibility = ?self.visibility, "toggled minimize");
        self.visibility
    }

    /// Applies to future sends only. Requests already issued keep their mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commits the draft: appends the user message, clears the draft and returns the
    /// request to issue. `None` means nothing was committed.
    pub fn send_message(&mut self) -> Option<Outbound> {
        if self.visibility == Visibility::Closed {
            tracing::debug!("send ignored, widget closed");
            return None;
        }

        if self.draft.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.transcript.push(Message::user(text.clone()));

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq);

        tracing::info!(seq, mode = %self.mode, "message committed");

        Some(Outbound {
            seq,
            text,
            mode: self.mode,
        })
    }

    /// Appends the bot side of exchange `seq`. Failures become [`FALLBACK_REPLY`].
    /// Returns false when `seq` is not in flight; the transcript is left untouched.
    pub fn receive_reply(&mut self, seq: u64, result: AResult<String>) -> bool {
        if !self.in_flight.remove(&seq) {
            tracing::warn!(seq, "reply for unknown exchange dropped");
            return false;
        }

        let text = match result {
            Ok(text) => text,
            Err(err) if err.is_exchange_failure() => {
                tracing::warn!(seq, error = %err, "chat exchange failed");
                FALLBACK_REPLY.to_string()
            }
            Err(err) => {
                tracing::error!(seq, error = %err, "chat exchange aborted");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(Message::bot(text));
        true
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }
}
