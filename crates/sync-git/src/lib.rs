//! Source repository materialization for sync-files
//!
//! A [`SourceFetcher`] turns a repository location and a ref into a
//! [`MaterializedSource`]: a private, temporary checkout that is removed
//! when the handle is closed or dropped.

mod command;
pub mod error;
pub mod git_cli;
pub mod interrupt;
pub mod provider;

pub use error::{Error, Result};
pub use git_cli::{GitCliFetcher, head_commit};
pub use interrupt::InterruptFlag;
pub use provider::{MaterializedSource, SourceFetcher};
