//! The operation log: one file of JSONL, the only durable state.
//!
//! ```text
//! {"type":"push","occurred_at":"2006-01-02T15:04:05-0700","payload":"write docs"}
//! {"type":"focus","occurred_at":"2006-01-02T15:04:05-0700","payload":1}
//! {"type":"pop","occurred_at":"2006-01-02T15:04:05-0700"}
//! ```
//!
//! The stack itself is never stored; [`LogStore::current_list`] replays the
//! history every time. Appends go through [`durable::StagedAppend`], so the
//! file is always either the old history or the old history plus one line.
//! Nothing guards against two processes appending at once: the last rename
//! wins and the other operation is lost.

mod durable;

use std::path::{Path, PathBuf};
use std::{fs, io, str};

use crate::model::{DecodeError, Item, OccurredAt, Operation, Payload};
use crate::replay::{self, ReplayError};

use durable::StagedAppend;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt log at line {line}: {source}")]
    Corrupt { line: usize, source: DecodeError },

    #[error("failed to encode operation: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to read the clock: {0}")]
    Clock(#[from] jiff::Error),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// The operation history of one log file.
///
/// The in-memory history only ever grows after the file has been replaced,
/// so the two never diverge.
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    history: Vec<Operation>,
}

impl LogStore {
    /// Loads the history at `path`.
    ///
    /// A missing file is an empty history. Blank lines are skipped; any line
    /// that fails to decode rejects the whole file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut history = Vec::new();
        for (i, raw) in contents.split(|&b| b == b'\n').enumerate() {
            let corrupt = |source: DecodeError| StorageError::Corrupt { line: i + 1, source };
            let text = str::from_utf8(raw).map_err(|e| corrupt(e.into()))?;
            if text.trim().is_empty() {
                continue;
            }
            history.push(Operation::from_line(text).map_err(corrupt)?);
        }

        tracing::debug!(
            path = %path.display(),
            operations = history.len(),
            "loaded operation log"
        );
        Ok(Self { path, history })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The operations loaded or appended so far, oldest first.
    pub fn history(&self) -> &[Operation] {
        &self.history
    }

    /// Durably appends `op`, then records it in memory.
    pub fn append(&mut self, op: Operation) -> Result<()> {
        let line = op.to_line()?;
        StagedAppend::new(&self.path, &line)?.commit()?;
        tracing::debug!(kind = %op.kind(), path = %self.path.display(), "appended operation");
        self.history.push(op);
        Ok(())
    }

    pub fn append_push(&mut self, item: Item) -> Result<()> {
        self.append_now(Payload::Push(item))
    }

    pub fn append_pop(&mut self) -> Result<()> {
        self.append_now(Payload::Pop)
    }

    /// Appends a focus on the item `index` places below the top.
    ///
    /// The index is checked against the current list first, so a focus that
    /// replay would reject never reaches the log.
    pub fn append_focus(&mut self, index: u64) -> Result<()> {
        let len = self.current_list()?.len();
        if replay::position_of_depth(len, index).is_none() {
            return Err(ReplayError::FocusOutOfRange {
                position: self.history.len(),
                index,
                len,
            }
            .into());
        }
        self.append_now(Payload::Focus(index))
    }

    /// The current list, bottom to top.
    pub fn current_list(&self) -> core::result::Result<Vec<Item>, ReplayError> {
        replay::replay(self.history())
    }

    fn append_now(&mut self, payload: Payload) -> Result<()> {
        self.append(Operation::new(OccurredAt::now()?, payload))
    }
}
