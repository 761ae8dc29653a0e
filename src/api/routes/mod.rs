//! Route handlers
//!
//! Handlers are organized by concern:
//! - [`dashboard`]: HTML page and CSV download
//! - [`news`]: JSON digest
//! - [`system`]: Health and OpenAPI

mod dashboard;
mod news;
mod system;

pub use dashboard::*;
pub use news::*;
pub use system::*;
