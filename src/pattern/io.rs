//! Table files: raw distance bytes in index order, no header.

use super::*;

use std::{fs, path::Path};

pub fn load(kind: PatternKind, path: &Path) -> Result<PatternDatabase, PatternError> {
    let bytes = fs::read(path).map_err(|source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PatternDatabase::from_bytes(kind, bytes)
}

pub fn save(db: &PatternDatabase, path: &Path) -> Result<(), PatternError> {
    let io_error = |source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, db.as_bytes()).map_err(io_error)?;

    log::info!(
        "Wrote {} table, {} bytes, to {}",
        db.kind(),
        db.as_bytes().len(),
        path.display()
    );
    Ok(())
}
