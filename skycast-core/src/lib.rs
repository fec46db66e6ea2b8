//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - The lookup form and query validation
//! - In-memory routing between the form and the weather view
//! - The weather view state machine and its rendering
//! - The weatherapi.com provider and configuration handling
//!
//! It is used by `skycast-cli`, but can also be driven by other front ends.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod provider;
pub mod router;
pub mod viewer;

pub use config::Config;
pub use error::{FetchError, LookupError};
pub use form::{FormOutcome, LookupForm};
pub use model::{Query, WeatherResult};
pub use provider::{WeatherApiProvider, WeatherProvider, provider_from_config};
pub use router::{Navigation, NavigationState, Route, Router};
pub use viewer::{LookupTicket, Redirect, ViewState, WeatherViewer, fetch};
