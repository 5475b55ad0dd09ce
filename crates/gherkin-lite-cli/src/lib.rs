//! Command line front end for the `gherkin-lite` parser.
//!
//! The `gherkin-lite` binary parses one or more feature files, optionally
//! narrows the result with a tag expression or a line range, and prints a
//! report of the features, their scenarios, and every expanded Scenario
//! Outline. Files that fail to parse are listed with their errors.
//!
//! # Configuration
//!
//! - `GHERKIN_LITE_LOG_LEVEL`: diagnostics on stderr (trace, debug, info,
//!   warn, error)
//! - `GHERKIN_LITE_FORMAT`: report format on stdout (text, json)
//!
//! Command line flags take precedence over both.
//!
//! # Example
//!
//! ```no_run
//! use gherkin_lite_cli::config::CliConfig;
//! use gherkin_lite_cli::run::{Request, execute};
//!
//! # fn main() -> eyre::Result<()> {
//! let request = Request {
//!     paths: vec!["features".into()],
//!     tags: Some("@smoke&&~@slow".to_owned()),
//!     lines: None,
//! };
//! let summary = execute(&request, &CliConfig::default(), &mut std::io::stdout())?;
//! assert!(!summary.has_failures());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod report;
pub mod run;
