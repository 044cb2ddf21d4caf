//! Domain layer: pure launch logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod launch;
pub mod operation;
pub mod profile;
pub mod remote;
pub mod resource;

pub use config::{ClientConfig, RemoteEndpoint, ResolvedRemote, validate_addr};
pub use error::{ConfigError, LaunchError, LaunchFailure};
pub use launch::{LaunchOptions, LaunchPhase, LaunchRequest};
pub use operation::{CreateResponse, ImageSource, OperationHandle};
pub use profile::ProfileSelection;
pub use remote::{RemoteRef, parse_remote_and_container};
