//! Storelens - Data Model
//!
//! Shared record types that flow through the pipeline:
//!
//! - **Extraction**: [`Product`], [`SaleLineItem`] - immutable once fetched
//! - **Analysis**: [`AnalysisRow`] - one per product, built once per run
//! - **Output**: [`Report`], [`ReportSection`], [`Summary`] - assembled once
//!   and handed to exporters read-only
//!
//! All types are serde-serializable; exporters rely on the serde field
//! names, so renames here are output-format changes.

mod analysis;
mod records;
mod report;

pub use analysis::{AnalysisRow, VolumeTier};
pub use records::{Product, SaleLineItem};
pub use report::{Report, ReportSection, SortKey, Summary};
