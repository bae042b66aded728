//! Storelens - Connector
//!
//! Pulls the product catalog and recent orders from a WooCommerce-style
//! REST API and produces typed records for the analysis pipeline.
//!
//! # Design Principles
//!
//! - **Sequential**: one resource, one status filter, one page at a time;
//!   the only suspension points are the throttle and retry sleeps
//! - **Partial-failure tolerant**: a page that keeps failing abandons its
//!   collection loop and keeps whatever was already fetched - extraction
//!   never errors past that boundary
//! - **Banner tolerant**: response bodies may carry leading non-JSON
//!   diagnostics from the hosting platform; parsing starts at the first
//!   JSON delimiter
//!
//! # Example
//!
//! ```ignore
//! use storelens_connector::{Extractor, StoreClient};
//!
//! let client = StoreClient::new(&config.store)?;
//! let extractor = Extractor::new(client, config.extract.clone());
//!
//! let products = extractor.fetch_products().await;
//! let sales = extractor.fetch_sales().await;
//! ```

mod client;
mod error;
mod extract;
mod payload;

pub use client::StoreClient;
pub use error::ConnectorError;
pub use extract::{Extractor, FetchPages, PageQuery, WalkOutcome};
pub use payload::{RawOrder, RawProduct, split_json_payload};
