//! Fetching compiler dumps for the WebDocs views.
//!
//! A [`DocumentSource`] produces the raw JSON for a path such as `/pages`.
//! [`LoadTracker`] turns responses into a [`LoadState`] where only the most
//! recent request may resolve, and [`Loader`] runs fetches in the
//! background on top of it. [`Route`] maps browser paths to views.

pub mod error;
pub mod load;
pub mod response;
pub mod route;
pub mod source;

pub use error::{LoadError, RouteError, SourceError};
pub use load::{LoadState, LoadTracker, Loader, Ticket, fetch_state};
pub use response::{Loaded, decode_response};
pub use route::{Route, View};
pub use source::{DEFAULT_URL, DirectorySource, DocumentSource, HttpSource, HttpSourceConfig};
