//! Watch-later table core: title decomposition, record projection and the
//! filter/sort/selection view model, plus the ingest helpers that produce
//! record files.

pub mod column;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod logging;
pub mod options;
pub mod projection;
pub mod record;
pub mod selection;
pub mod sort;
pub mod table;
pub mod title;

pub use column::{Capability, ColumnKey};
pub use error::TableError;
pub use record::{RawVideoRecord, RowId};
pub use selection::TriState;
pub use table::{CellValue, VideoTable};
pub use title::{DecomposedTitle, Outcome, TitleParser};
