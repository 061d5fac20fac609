use crate::core::{PersistError, Result};
use crate::storage::{AccessMode, StorageBackend};
use std::io::{self, Read, Write};

/// Read every byte stored under `name`, `None` when the name is absent
pub(crate) fn read_all<B: StorageBackend + ?Sized>(
    backend: &B,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut reader = match backend.open_read(name) {
        Ok(reader) => reader,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PersistError::io(name, e)),
    };
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| PersistError::io(name, e))?;
    Ok(Some(data))
}

/// Replace the content of `name` with `bytes`
pub(crate) fn write_all<B: StorageBackend + ?Sized>(
    backend: &B,
    name: &str,
    mode: AccessMode,
    bytes: &[u8],
) -> Result<()> {
    let mut writer = backend
        .open_write(name, mode)
        .map_err(|e| PersistError::io(name, e))?;
    writer
        .write_all(bytes)
        .map_err(|e| PersistError::io(name, e))?;
    writer.flush().map_err(|e| PersistError::io(name, e))?;
    Ok(())
}
