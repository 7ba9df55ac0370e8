//! Domain types for the vmrc remote-control client.
//!
//! Defines the managed-object-reference wrappers, the RPC value union,
//! remote faults, and credentials shared by the protocol and CLI crates.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod credentials;
pub mod error;
pub mod fault;
pub mod handle;
pub mod value;

pub use credentials::Credentials;
pub use error::CoreError;
pub use fault::{RemoteFault, TRANSPORT_FAULT};
pub use handle::{
    CollectorRef, HostRef, MachineRef, MetricRef, ObjectRef, ProgressRef, RootRef, SessionRef,
};
pub use value::Value;
