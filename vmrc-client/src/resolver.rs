//! Ambiguous-identifier resolution.
//!
//! User input naming a machine is untyped: it may be a UUID or a display
//! name, and the protocol distinguishes the two only by which lookup call
//! accepts them. Resolution tries the exact-UUID lookup first and the name
//! search second — a deliberate tie-break order, one pass each.

use vmrc_core::{MachineRef, RootRef, Value};

use crate::{methods, ClientError, RpcGateway};

/// Resolves user-supplied machine identifiers into machine references.
pub struct ObjectResolver<'g, G: RpcGateway> {
    gateway: &'g G,
}

impl<'g, G: RpcGateway> ObjectResolver<'g, G> {
    /// Create a resolver over the given gateway.
    #[must_use]
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Resolve `identifier` into a machine reference.
    ///
    /// The identifier is first handed to the exact-ID lookup (treating it
    /// as a UUID); if the server faults, it is handed to the name search.
    /// The first fault is swallowed — an unregistered UUID-shaped string
    /// must still fall through to the name attempt, so no client-side
    /// pre-parsing takes place.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] after both attempts fault. No
    /// reference is left behind on the failed path.
    pub async fn resolve(
        &self,
        root: &RootRef,
        identifier: &str,
    ) -> Result<MachineRef, ClientError> {
        let by_id = self
            .gateway
            .call(
                methods::GET_MACHINE,
                &[Value::from(root.as_str()), Value::from(identifier)],
            )
            .await;
        match by_id {
            Ok(value) => {
                let reference = value
                    .into_string()
                    .map_err(|e| ClientError::protocol(methods::GET_MACHINE, e))?;
                tracing::debug!(%identifier, machine = %reference, "resolved as UUID");
                return Ok(MachineRef::new(reference));
            }
            Err(fault) => {
                tracing::debug!(%identifier, %fault, "not a registered UUID, trying as name");
            }
        }

        match self
            .gateway
            .call(
                methods::FIND_MACHINE,
                &[Value::from(root.as_str()), Value::from(identifier)],
            )
            .await
        {
            Ok(value) => {
                let reference = value
                    .into_string()
                    .map_err(|e| ClientError::protocol(methods::FIND_MACHINE, e))?;
                tracing::debug!(%identifier, machine = %reference, "resolved by name");
                Ok(MachineRef::new(reference))
            }
            Err(fault) => {
                tracing::debug!(%identifier, %fault, "name lookup failed");
                Err(ClientError::NotFound { identifier: identifier.to_owned() })
            }
        }
    }
}
