//! # mailwatch-gmail
//!
//! Mail query collaborator adapter for `mailwatch`: drives an external
//! Gmail search CLI as a subprocess and maps its JSON output into
//! candidate messages.
//!
//! The adapter is deliberately thin. Authentication, rate limiting, and
//! transport all belong to the external command; this crate only builds
//! the invocation, checks the exit status, and parses the result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod error;

pub use cli::GmailCli;
pub use error::GmailError;
