use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::host::MemoryDocument;
use crate::insights::InsightsDataset;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid {what} in {path}: {source}")]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String, InputError> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(read_err)
}

fn parse_json<T: DeserializeOwned>(
    raw: &str,
    what: &'static str,
    path: &Path,
) -> Result<T, InputError> {
    serde_json::from_str(raw).map_err(|source| InputError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_dataset(raw: &str, path: &Path) -> Result<InsightsDataset, InputError> {
    parse_json(raw, "insights dataset", path)
}

pub fn parse_document(raw: &str, path: &Path) -> Result<MemoryDocument, InputError> {
    parse_json(raw, "document snapshot", path)
}

pub fn load_dataset(path: &Path) -> Result<InsightsDataset, InputError> {
    parse_dataset(&read_source(path)?, path)
}

pub fn load_document(path: &Path) -> Result<MemoryDocument, InputError> {
    parse_document(&read_source(path)?, path)
}
