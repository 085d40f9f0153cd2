//! Library side of the `catln-webdocs` command.

pub mod logging;
pub mod output;
pub mod summary;
pub mod view;
