use super::backend::{AccessMode, StorageBackend};
use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Mutex, MutexGuard};

/// Which kind of stream an [`OpenEvent`] recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    Read,
    Write(AccessMode),
}

/// A single `open_read` / `open_write` call observed by [`InMemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEvent {
    pub name: String,
    pub kind: OpenKind,
}

#[derive(Debug, Clone, Default)]
struct Entry {
    bytes: Vec<u8>,
    mode: AccessMode,
}

/// In-memory backend for tests and ephemeral use
///
/// Every open call is recorded in order, so a test can assert which name and
/// access mode an operation used. Failures can be injected with
/// [`InMemoryBackend::fail_with`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: Mutex<HashMap<String, Entry>>,
    events: Mutex<Vec<OpenEvent>>,
    failure: Mutex<Option<io::ErrorKind>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent open fail with `kind` (`None` clears it)
    pub fn fail_with(&self, kind: Option<io::ErrorKind>) {
        *relock(&self.failure) = kind;
    }

    /// Raw bytes stored under `name`
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        relock(&self.entries).get(name).map(|e| e.bytes.clone())
    }

    /// Size in bytes of `name`, if present
    pub fn size_of(&self, name: &str) -> Option<usize> {
        relock(&self.entries).get(name).map(|e| e.bytes.len())
    }

    /// Access mode `name` was last written with
    pub fn mode_of(&self, name: &str) -> Option<AccessMode> {
        relock(&self.entries).get(name).map(|e| e.mode)
    }

    pub fn contains(&self, name: &str) -> bool {
        relock(&self.entries).contains_key(name)
    }

    /// Store bytes directly, bypassing any codec
    pub fn insert_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        relock(&self.entries).insert(
            name.to_string(),
            Entry {
                bytes: bytes.into(),
                mode: AccessMode::Private,
            },
        );
    }

    /// All names currently stored, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = relock(&self.entries).keys().cloned().collect();
        names.sort();
        names
    }

    /// Every open call so far, oldest first
    pub fn opened(&self) -> Vec<OpenEvent> {
        relock(&self.events).clone()
    }

    pub fn clear_events(&self) {
        relock(&self.events).clear();
    }

    fn record(&self, name: &str, kind: OpenKind) -> io::Result<()> {
        relock(&self.events).push(OpenEvent {
            name: name.to_string(),
            kind,
        });
        match *relock(&self.failure) {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }
}

impl StorageBackend for InMemoryBackend {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        self.record(name, OpenKind::Read)?;
        let entries = relock(&self.entries);
        let entry = entries
            .get(name)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(Box::new(Cursor::new(entry.bytes.clone())))
    }

    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>> {
        self.record(name, OpenKind::Write(mode))?;
        relock(&self.entries).insert(
            name.to_string(),
            Entry {
                bytes: Vec::new(),
                mode,
            },
        );
        Ok(Box::new(MemoryWriter {
            backend: self,
            name: name.to_string(),
        }))
    }
}

/// Writes land directly in the shared map, like a truncated file would
struct MemoryWriter<'a> {
    backend: &'a InMemoryBackend,
    name: String,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut entries = relock(&self.backend.entries);
        entries
            .entry(self.name.clone())
            .or_default()
            .bytes
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
