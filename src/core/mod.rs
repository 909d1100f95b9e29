/*!
# Core Module

Core functionality shared by the detectors and the applier: error
handling, input types, line positions and document reading.
*/

pub mod errors;
pub mod fs_utils;
pub mod position;
pub mod types;

pub use errors::{DedupError, DedupResult};
pub use fs_utils::{is_supported_document, read_document};
pub use position::{char_len, normalize_line, LineNumber, SourceLines};
pub use types::{FileType, SimilarityThreshold};
