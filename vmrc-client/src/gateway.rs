//! RPC gateway abstraction trait.
//!
//! The transport seam of the client: everything above it sees only named
//! calls with ordered arguments and the result/fault distinction. Swapping
//! the concrete transport never touches the protocol components.

use async_trait::async_trait;
use vmrc_core::{RemoteFault, Value};

/// Stateless RPC transport to the management web service.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
/// The transport holds no session state — every reference a call needs is
/// carried in its arguments.
#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Issue a named remote call with ordered arguments.
    ///
    /// # Errors
    /// Returns [`RemoteFault`] for any server-side rejection. Transport
    /// failures surface through the same contract with the reserved
    /// transport fault code; callers never inspect transport detail.
    async fn call(&self, method: &str, args: &[Value]) -> Result<Value, RemoteFault>;
}
