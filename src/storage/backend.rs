use std::io::{self, Read, Write};
use std::sync::Arc;

/// Access level requested when opening a stream for writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Readable and writable only by the owning application
    #[default]
    Private,
    /// Readable by other local users or applications
    Shared,
}

/// Storage backend trait - supplies named byte streams
///
/// A backend is an opaque byte store keyed by name. It knows nothing about
/// entities, codecs or counters.
///
/// # Contract
///
/// - `open_read` on a name that was never written fails with
///   [`io::ErrorKind::NotFound`]. Any other error kind is a real failure.
/// - `open_write` creates the name if needed and truncates prior content, so
///   the stream replaces rather than appends.
/// - Dropping a returned handle releases it.
pub trait StorageBackend {
    /// Open `name` for reading
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Open `name` for writing in overwrite mode
    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        (**self).open_read(name)
    }

    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>> {
        (**self).open_write(name, mode)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        (**self).open_read(name)
    }

    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>> {
        (**self).open_write(name, mode)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        (**self).open_read(name)
    }

    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>> {
        (**self).open_write(name, mode)
    }
}
