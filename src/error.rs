use thiserror::Error;

use crate::column::{Capability, ColumnKey};

/// Misconfiguration of the table view model.
///
/// Filtering, sorting and selection over well-formed input never fail; these
/// errors only report an operation a column does not declare support for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
  #[error("column '{column}' does not support {capability}")]
  Unsupported { column: ColumnKey, capability: Capability },

  #[error("unknown column: {0}")]
  UnknownColumn(String),

  #[error("page size must be between 1 and {max}, got {got}")]
  PageSize { got: usize, max: usize },
}

impl TableError {
  pub fn unsupported(column: ColumnKey, capability: Capability) -> Self {
    TableError::Unsupported { column, capability }
  }
}

pub type Result<T> = std::result::Result<T, TableError>;
