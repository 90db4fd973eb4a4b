//! Client for the Pulse application-management platform.
//!
//! Authenticates a cookie-based session, moves managed reference lists and
//! whole application bundles in and out, partial-imports sub-resources (rule
//! projects, plans, models) remapped onto a live workflow element, and drives
//! the deploy lifecycle (start/update/cancel) with caller-driven progress
//! polling.
//!
//! ```no_run
//! use pulse_client::{ClientConfig, PulseClient};
//!
//! # async fn run() -> Result<(), pulse_client::PulseError> {
//! let client = PulseClient::connect(ClientConfig {
//!     base_url: "https://pulse-stg.example.com".into(),
//!     username: "ops".into(),
//!     password: "secret".into(),
//!     app: "payments".into(),
//!     timeout: Some(std::time::Duration::from_secs(30)),
//! })
//! .await?;
//!
//! client.upload_list("blocklist-1", "blocklist.csv").await?;
//! client
//!     .import_rule_projects("rules.zip", "Main workflow", "Decision")
//!     .await?;
//!
//! while client.lifecycle().is_publish_in_progress().await? {
//!     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod client;
pub mod error;
pub mod import;
pub mod lifecycle;
pub mod lists;
pub mod logging;
pub mod session;
pub mod transfer;
pub mod workflow;

pub use client::{ClientConfig, PulseClient};
pub use error::PulseError;
pub use session::{Session, SessionConfig};
