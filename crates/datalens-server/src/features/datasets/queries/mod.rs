//! Read operations for datasets

pub mod chart_data;
pub mod get;
pub mod list;
pub mod summary;

pub use chart_data::{ChartBundleResponse, ChartDataError};
pub use get::GetDatasetError;
pub use list::{ListDatasetsError, ListDatasetsResponse};
pub use summary::{SummarizeDatasetError, SummaryStatsResponse};
