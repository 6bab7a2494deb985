//! Implementations behind the CLI subcommands.
//!
//! - [`fetch`]: one company query written to a slug-named file
//! - [`bulk`]: many tickers, resolved and written twice each
//!
//! The `serve` subcommand lives in [`crate::server`].

pub mod bulk;
pub mod fetch;
