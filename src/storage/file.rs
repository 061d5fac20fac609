//! Directory-backed storage for persistor namespaces

use super::backend::{AccessMode, StorageBackend};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

// ============================================================================
// Durability Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Flush and fsync when a write stream is flushed
    Sync,
    /// Flush to the OS only
    #[default]
    Flush,
}

// ============================================================================
// File Backend
// ============================================================================

/// Stores every name as a plain file directly under `root`
///
/// The root directory is created lazily on the first write, so constructing a
/// backend never touches the filesystem.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    durability_mode: DurabilityMode,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            durability_mode: DurabilityMode::default(),
        }
    }

    /// Set the durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability_mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn durability_mode(&self) -> DurabilityMode {
        self.durability_mode
    }

    /// Path a storage name maps to
    pub fn path_of(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("storage name '{}' is not a plain file name", name),
            ));
        }
        Ok(self.root.join(name))
    }
}

impl StorageBackend for FileBackend {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.path_of(name)?)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self, name: &str, mode: AccessMode) -> io::Result<Box<dyn Write + '_>> {
        let path = self.path_of(name)?;
        fs::create_dir_all(&self.root)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(unix_mode(mode));
        }
        let file = options.open(&path)?;

        // `mode` on OpenOptions only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(unix_mode(mode)))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(Box::new(FileWriter {
            inner: BufWriter::new(file),
            durability_mode: self.durability_mode,
        }))
    }
}

#[cfg(unix)]
fn unix_mode(mode: AccessMode) -> u32 {
    match mode {
        AccessMode::Private => 0o600,
        AccessMode::Shared => 0o644,
    }
}

struct FileWriter {
    inner: BufWriter<File>,
    durability_mode: DurabilityMode,
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        if self.durability_mode == DurabilityMode::Sync {
            self.inner.get_ref().sync_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path());
        let err = backend.open_read("missing.data").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("nested")).durability(DurabilityMode::Sync);

        {
            let mut writer = backend.open_write("a.data", AccessMode::Private).unwrap();
            writer.write_all(b"first version").unwrap();
            writer.flush().unwrap();
        }
        {
            let mut writer = backend.open_write("a.data", AccessMode::Private).unwrap();
            writer.write_all(b"second").unwrap();
            writer.flush().unwrap();
        }

        let mut data = Vec::new();
        backend.open_read("a.data").unwrap().read_to_end(&mut data).unwrap();
        assert_eq!(data, b"second");
    }

    #[test]
    fn test_builder_settings() {
        let backend = FileBackend::new("store");
        assert_eq!(backend.root(), Path::new("store"));
        assert_eq!(backend.durability_mode(), DurabilityMode::Flush);

        let backend = backend.durability(DurabilityMode::Sync);
        assert_eq!(backend.durability_mode(), DurabilityMode::Sync);
        assert_eq!(backend.path_of("a.id").unwrap(), backend.root().join("a.id"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let backend = FileBackend::new("unused");
        assert!(backend.path_of("../escape.data").is_err());
        assert!(backend.path_of("a/b.data").is_err());
        assert!(backend.path_of("").is_err());
        assert!(backend.path_of("ok.data").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_mode_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path());
        backend
            .open_write("p.data", AccessMode::Shared)
            .unwrap()
            .flush()
            .unwrap();
        backend
            .open_write("p.data", AccessMode::Private)
            .unwrap()
            .flush()
            .unwrap();

        let mode = fs::metadata(temp_dir.path().join("p.data")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
