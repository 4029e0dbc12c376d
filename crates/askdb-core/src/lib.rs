//! askdb-core: protocol, HTTP client, query controller, configuration, and
//! logging for askdb.

pub mod build_info;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod paths;
pub mod protocol;
pub mod table;

pub use client::{HealthStatus, HttpClient, QueryTransport};
pub use config::Config;
pub use controller::{QueryController, QueryFailure, QueryOutcome, QueryView};
pub use error::{Error, Result};
pub use protocol::{QueryRequest, QueryResponse, Row};
pub use table::ResultTable;
