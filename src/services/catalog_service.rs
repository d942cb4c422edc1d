use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column holding the ticker in the catalog file
pub const SYMBOL_COLUMN: &str = "Symbol";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read symbol catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("symbol catalog {0} has no \"Symbol\" column")]
    MissingColumn(PathBuf),
}

/// Load every ticker from the catalog in file order, duplicates kept
pub fn load_symbols<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CatalogError> {
    let path = path.as_ref();
    let read_err = |source| CatalogError::Read { path: path.to_path_buf(), source };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .from_path(path)
        .map_err(read_err)?;

    let column = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .position(|h| h.trim() == SYMBOL_COLUMN)
        .ok_or_else(|| CatalogError::MissingColumn(path.to_path_buf()))?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        if let Some(symbol) = record.get(column) {
            symbols.push(symbol.to_string());
        }
    }

    tracing::debug!("Loaded {} symbols from {}", symbols.len(), path.display());
    Ok(symbols)
}
