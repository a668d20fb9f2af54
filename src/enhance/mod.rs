/*!
 * Text enhancement engine and batch processing.
 *
 * This module contains the core functionality for applying substring-targeted
 * enhancements to texts. It is split into several submodules:
 *
 * - `core`: Enhancement kinds, operations, and the sequential-rewrite engine
 * - `batch`: Batch processing of document collections
 * - `cache`: Memoization of enhancement results
 */

// Re-export main types for easier usage
pub use self::batch::{BatchProcessor, BatchReport, output_entry_name, OUTPUT_PREFIX};
pub use self::core::{apply_ops, Enhancer, EnhancementKind, EnhancementOp};

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
