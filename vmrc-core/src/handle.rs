use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque managed object reference issued by the server.
///
/// The token identifies a remote stateful object for the duration of a
/// logon bracket. It carries no client-side type information and is not
/// comparable across server restarts. Every reference obtained from the
/// server must be disposed of exactly once, except the root reference,
/// which is released by logoff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ObjectRef(pub String);

impl ObjectRef {
    /// Creates an `ObjectRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ObjectRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reference to the server's global hypervisor object, produced by logon.
///
/// Held for the lifetime of the process and passed to every call that needs
/// top-level context. Released only by logoff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RootRef(pub ObjectRef);

impl RootRef {
    /// Creates a `RootRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if the token is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RootRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RootRef> for ObjectRef {
    fn from(reference: RootRef) -> Self {
        reference.0
    }
}

/// Reference to a session object: the exclusive runtime-control lock a
/// client holds while mutating a machine's runtime state.
///
/// An open session left behind keeps a server-side lock that blocks future
/// operations on the machine, so a session must be closed after the
/// bracketed operation regardless of its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SessionRef(pub ObjectRef);

impl SessionRef {
    /// Creates a `SessionRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SessionRef> for ObjectRef {
    fn from(reference: SessionRef) -> Self {
        reference.0
    }
}

/// Reference to a registered virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MachineRef(pub ObjectRef);

impl MachineRef {
    /// Creates a `MachineRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MachineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MachineRef> for ObjectRef {
    fn from(reference: MachineRef) -> Self {
        reference.0
    }
}

/// Reference to an in-flight asynchronous server operation.
///
/// The result code behind a progress reference is meaningful only after the
/// operation reports completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ProgressRef(pub ObjectRef);

impl ProgressRef {
    /// Creates a `ProgressRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProgressRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProgressRef> for ObjectRef {
    fn from(reference: ProgressRef) -> Self {
        reference.0
    }
}

/// Reference to the host hardware object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct HostRef(pub ObjectRef);

impl HostRef {
    /// Creates a `HostRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<HostRef> for ObjectRef {
    fn from(reference: HostRef) -> Self {
        reference.0
    }
}

/// Reference to the performance collector object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CollectorRef(pub ObjectRef);

impl CollectorRef {
    /// Creates a `CollectorRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CollectorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CollectorRef> for ObjectRef {
    fn from(reference: CollectorRef) -> Self {
        reference.0
    }
}

/// Reference to a single performance metric descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MetricRef(pub ObjectRef);

impl MetricRef {
    /// Creates a `MetricRef` from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(ObjectRef::new(reference))
    }

    /// Returns the raw reference token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MetricRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MetricRef> for ObjectRef {
    fn from(reference: MetricRef) -> Self {
        reference.0
    }
}
