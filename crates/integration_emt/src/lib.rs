//! EMT Palma real-time transit client
//!
//! Queries the [EMT Palma MAAS API](https://www.emtpalma.cat/maas/api/v1) for
//! real-time arrivals at a stop, the line catalog, the sublines of a line and
//! the stops of a line, and normalizes the API's inconsistently shaped JSON
//! into stable types.
//!
//! # Architecture
//!
//! [`TransitClient`] defines the four query operations, implemented by
//! [`EmtTransitClient`]. Every operation returns a [`QueryResult`]: either the
//! normalized payload or one of the [`ErrorKind`] values. Field-name
//! variations across API deployments are resolved through one alias table per
//! entity, so a renamed upstream field is a one-line change.
//!
//! Arrivals take their line colors from the line catalog.
//! [`EmtTransitClient::connect`] loads it before returning; a client built
//! with [`EmtTransitClient::new`] starts with an empty catalog, and its
//! arrivals carry [`DEFAULT_LINE_COLOR`] until [`TransitClient::get_all_lines`]
//! or [`EmtTransitClient::reload_lines`] fills it.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_emt::{EmtConfig, EmtTransitClient, ErrorKind, TransitClient};
//!
//! let config = EmtConfig::load()?;
//! let client = EmtTransitClient::connect(&config).await?;
//!
//! match client.get_arrivals(37).await {
//!     Ok(arrivals) => {
//!         for arrival in arrivals {
//!             println!("{} {} {}", arrival.line, arrival.destination, arrival.time_display);
//!         }
//!     },
//!     Err(ErrorKind::AuthExpired) => eprintln!("token expired"),
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

mod aliases;
mod client;
mod config;
mod error;
mod models;

pub use client::{EmtTransitClient, LineCatalog, TransitClient};
pub use config::EmtConfig;
pub use error::{ConfigurationError, ErrorKind, QueryResult};
pub use models::{
    Arrival, ArrivalTime, DEFAULT_LINE_COLOR, LineInfo, MinuteStyle, Stop, Subline,
    normalize_color, truncate_destination,
};
