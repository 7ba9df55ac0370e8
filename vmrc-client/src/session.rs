//! Logon/logoff bracket and session-handle lifecycle.

use vmrc_core::{Credentials, ObjectRef, RootRef, SessionRef, Value};

use crate::{methods, ClientError, RpcGateway};

/// Owns authentication and session-handle lifecycle against the gateway.
///
/// The manager holds no connection state of its own: the root reference is
/// a value the caller threads through every operation, and logoff clears
/// the caller's slot so the release happens exactly once.
pub struct SessionManager<'g, G: RpcGateway> {
    gateway: &'g G,
}

impl<'g, G: RpcGateway> SessionManager<'g, G> {
    /// Create a manager over the given gateway.
    #[must_use]
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Log on and obtain the root reference for this process.
    ///
    /// The root reference must be retained for the process lifetime and
    /// passed to every call that needs top-level context; it is released
    /// only by [`SessionManager::logoff`].
    ///
    /// # Errors
    /// Returns [`ClientError::Auth`] if the server rejects the credentials.
    pub async fn logon(&self, credentials: &Credentials) -> Result<RootRef, ClientError> {
        let result = self
            .gateway
            .call(
                methods::LOGON,
                &[
                    Value::from(credentials.username.as_str()),
                    Value::from(credentials.password.as_str()),
                ],
            )
            .await
            .map_err(ClientError::Auth)?;

        let reference = result
            .into_string()
            .map_err(|e| ClientError::protocol(methods::LOGON, e))?;
        tracing::debug!(root = %reference, "logged on");
        Ok(RootRef::new(reference))
    }

    /// Request a fresh, unopened session object.
    ///
    /// The returned session does not yet hold any machine lock; it acquires
    /// one when passed to the open-remote-session call.
    ///
    /// # Errors
    /// Propagates the gateway fault as [`ClientError::Fault`].
    pub async fn session_object(&self, root: &RootRef) -> Result<SessionRef, ClientError> {
        let result = self
            .gateway
            .call(methods::GET_SESSION_OBJECT, &[Value::from(root.as_str())])
            .await?;
        let reference = result
            .into_string()
            .map_err(|e| ClientError::protocol(methods::GET_SESSION_OBJECT, e))?;
        tracing::debug!(session = %reference, "session object acquired");
        Ok(SessionRef::new(reference))
    }

    /// Release the root reference server-side and clear the caller's slot.
    ///
    /// A second call on a cleared slot is a no-op, not an error. Faults are
    /// logged, never propagated: logoff is the final step of the process
    /// and must not mask whatever happened before it.
    pub async fn logoff(&self, root: &mut Option<RootRef>) {
        let Some(root) = root.take() else {
            tracing::debug!("already logged off");
            return;
        };
        match self
            .gateway
            .call(methods::LOGOFF, &[Value::from(root.as_str())])
            .await
        {
            Ok(_) => tracing::info!("logged off"),
            Err(fault) => tracing::warn!(%fault, "logoff failed"),
        }
    }

    /// Close an open or pending session.
    ///
    /// Best-effort cleanup: an open session left behind keeps a server-side
    /// lock on the machine, so closing is attempted on every path and
    /// faults are only logged.
    pub async fn close_session(&self, session: SessionRef) {
        if let Err(fault) = self
            .gateway
            .call(methods::SESSION_CLOSE, &[Value::from(session.as_str())])
            .await
        {
            tracing::warn!(session = %session, %fault, "session close failed");
        }
    }

    /// Release any managed object reference.
    ///
    /// Best-effort disposal used by every component to keep acquisitions
    /// and releases balanced; faults are only logged.
    pub async fn release(&self, reference: impl Into<ObjectRef> + Send) {
        let reference = reference.into();
        if let Err(fault) = self
            .gateway
            .call(methods::RELEASE, &[Value::from(reference.as_str())])
            .await
        {
            tracing::warn!(reference = %reference, %fault, "release failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use vmrc_core::{Credentials, MachineRef, RemoteFault, RootRef, SessionRef, Value};

    use super::*;
    use crate::testkit::ScriptedGateway;

    #[tokio::test]
    async fn logon_returns_root_reference() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::from("root-1"))]);
        let sessions = SessionManager::new(&gateway);
        let root = sessions
            .logon(&Credentials::anonymous())
            .await
            .expect("logon must succeed");
        assert_eq!(root.as_str(), "root-1");
        assert_eq!(gateway.methods_called(), vec![methods::LOGON.to_owned()]);
    }

    #[tokio::test]
    async fn logon_fault_maps_to_auth_error() {
        let gateway =
            ScriptedGateway::new(vec![Err(RemoteFault::new(-5, "bad password"))]);
        let sessions = SessionManager::new(&gateway);
        let err = sessions
            .logon(&Credentials::new("admin", "wrong"))
            .await
            .expect_err("rejected logon must error");
        assert!(matches!(err, ClientError::Auth(_)), "expected Auth, got {err}");
    }

    #[tokio::test]
    async fn logon_non_string_result_is_protocol_error() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::Int(1))]);
        let sessions = SessionManager::new(&gateway);
        let err = sessions
            .logon(&Credentials::anonymous())
            .await
            .expect_err("int result must be rejected");
        assert!(matches!(err, ClientError::Protocol { .. }));
    }

    #[tokio::test]
    async fn logoff_clears_slot_and_second_call_is_noop() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::Void)]);
        let sessions = SessionManager::new(&gateway);

        let mut slot = Some(RootRef::new("root-1"));
        sessions.logoff(&mut slot).await;
        assert!(slot.is_none(), "slot must be cleared by logoff");

        sessions.logoff(&mut slot).await;
        assert_eq!(
            gateway.count(methods::LOGOFF),
            1,
            "second logoff must not reach the gateway"
        );
    }

    #[tokio::test]
    async fn logoff_fault_is_swallowed() {
        let gateway = ScriptedGateway::new(vec![Err(RemoteFault::new(-9, "gone"))]);
        let sessions = SessionManager::new(&gateway);
        let mut slot = Some(RootRef::new("root-1"));
        sessions.logoff(&mut slot).await;
        assert!(slot.is_none(), "slot must be cleared even when the call faults");
    }

    #[tokio::test]
    async fn close_session_swallows_faults() {
        let gateway = ScriptedGateway::new(vec![Err(RemoteFault::new(-3, "not open"))]);
        let sessions = SessionManager::new(&gateway);
        sessions.close_session(SessionRef::new("session-1")).await;
        assert_eq!(gateway.count(methods::SESSION_CLOSE), 1);
    }

    #[tokio::test]
    async fn release_passes_raw_token() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::Void)]);
        let sessions = SessionManager::new(&gateway);
        sessions.release(MachineRef::new("machine-4")).await;
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, methods::RELEASE);
        assert_eq!(calls[0].1, vec![Value::from("machine-4")]);
    }
}
