//! Append-only log of listing events
//!
//! Input surfaces and the clock write here. The listing service follows
//! the log and is the only thing that mutates listing state.
mod in_memory;

pub use self::in_memory::*;

use crate::event::Event;
use anyhow::Result;
use std::{sync::Arc, time::Duration};

pub type Offset = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    pub offset: Offset,
    pub details: Event,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithOffset<T> {
    pub offset: Offset,
    pub data: T,
}

pub trait Reader {
    /// Read up to `limit` events starting at `offset`
    ///
    /// Blocks up to `timeout` (forever if `None`) when there is nothing new.
    /// The returned offset is where the next read should start.
    fn read(
        &self,
        offset: Offset,
        limit: usize,
        timeout: Option<Duration>,
    ) -> Result<WithOffset<Vec<LogEvent>>>;

    /// Oldest offset still available
    fn get_start_offset(&self) -> Result<Offset>;

    /// Record that `follower` is done with everything before `offset`
    ///
    /// Events that every follower that ever committed is done with are
    /// discarded, so a follower should commit its start offset before
    /// reading anything.
    fn commit(&self, follower: &str, offset: Offset) -> Result<()>;
}

pub trait Writer {
    /// Append `events`, returning the offset past the last one
    fn write(&self, events: &[Event]) -> Result<Offset>;
}

pub type SharedReader = Arc<dyn Reader + Sync + Send + 'static>;
pub type SharedWriter = Arc<dyn Writer + Sync + Send + 'static>;
