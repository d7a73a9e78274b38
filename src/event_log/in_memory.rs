use super::*;
use anyhow::{bail, format_err};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::{BTreeMap, VecDeque};

#[derive(Default)]
struct InMemoryLogInner {
    /// Offset of `events[0]`
    base: Offset,
    events: VecDeque<Event>,
    progress: BTreeMap<String, Offset>,
}

impl InMemoryLogInner {
    fn end(&self) -> Result<Offset> {
        Ok(self.base + u64::try_from(self.events.len())?)
    }

    /// Position of `offset` in `events`
    fn index(&self, offset: Offset) -> Result<usize> {
        if offset < self.base {
            bail!("offset {offset} already compacted, log starts at {}", self.base);
        }
        if self.end()? < offset {
            bail!("offset {offset} out of bounds");
        }
        Ok(usize::try_from(offset - self.base)?)
    }
}

pub struct InMemoryLog {
    inner: Mutex<InMemoryLogInner>,
    condvar: Condvar,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(InMemoryLogInner::default()),
            condvar: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryLogInner> {
        self.inner.lock()
    }
}

impl Default for InMemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for InMemoryLog {
    fn read(
        &self,
        offset: Offset,
        limit: usize,
        timeout: Option<Duration>,
    ) -> Result<WithOffset<Vec<LogEvent>>> {
        let mut read = self.lock();

        if read.end()? == offset {
            if let Some(timeout) = timeout {
                self.condvar.wait_for(&mut read, timeout);
            } else {
                self.condvar.wait(&mut read);
            }
        }

        // compaction may have run while waiting
        let skip = read.index(offset)?;

        let data: Vec<_> = read
            .events
            .iter()
            .skip(skip)
            .take(limit)
            .zip(offset..)
            .map(|(e, offset)| LogEvent {
                offset,
                details: e.clone(),
            })
            .collect();

        Ok(WithOffset {
            offset: offset + u64::try_from(data.len())?,
            data,
        })
    }

    fn get_start_offset(&self) -> Result<Offset> {
        Ok(self.lock().base)
    }

    fn commit(&self, follower: &str, offset: Offset) -> Result<()> {
        let mut inner = self.lock();
        inner.index(offset)?;
        inner.progress.insert(follower.to_owned(), offset);

        let low = inner
            .progress
            .values()
            .min()
            .copied()
            .ok_or_else(|| format_err!("no followers"))?;
        let done = usize::try_from(low - inner.base)?;
        inner.events.drain(..done);
        inner.base = low;
        Ok(())
    }
}

impl Writer for InMemoryLog {
    fn write(&self, events: &[Event]) -> Result<Offset> {
        let mut write = self.lock();

        write.events.extend(events.iter().cloned());
        self.condvar.notify_all();

        write.end()
    }
}

pub fn new_in_memory_shared() -> (SharedWriter, SharedReader) {
    let log = Arc::new(InMemoryLog::new());
    (log.clone(), log)
}
