//! Managed-object session and lifecycle protocol client.
//!
//! Drives the remote-control protocol of a virtualization management web
//! service: the logon/logoff bracket, reference acquisition and disposal,
//! UUID-then-name identifier resolution, and the session-scoped start
//! operation with progress polling.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod gateway;
pub mod http;
pub mod inspect;
pub mod launcher;
pub mod methods;
pub mod resolver;
pub mod session;

#[cfg(test)]
pub(crate) mod testkit;

pub use error::ClientError;
pub use gateway::RpcGateway;
pub use http::HttpGateway;
pub use inspect::{HostInfo, InspectionService, MachineSummary};
pub use launcher::{LaunchOptions, LaunchReport, LaunchStatus, OperationLauncher, SessionType};
pub use resolver::ObjectResolver;
pub use session::SessionManager;
