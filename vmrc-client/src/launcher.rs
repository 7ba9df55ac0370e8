//! Session-scoped machine start and the progress polling loop.
//!
//! Starting a machine brackets a remote action between session acquisition
//! and session close: acquire a session object, read the machine's stable
//! identity, ask the server to open a remote session for it, then drive the
//! returned progress object to completion with bounded waits. The session
//! must be closed on every path out — an open session keeps a server-side
//! lock on the machine.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use vmrc_core::{MachineRef, ProgressRef, RootRef, SessionRef, Value};

use crate::session::SessionManager;
use crate::{methods, ClientError, RpcGateway};

/// Default upper bound for a single progress wait call.
const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// Default number of bounded waits before the launcher gives up polling.
const DEFAULT_POLL_BUDGET: u32 = 30;

/// Frontend variant the opened session should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum SessionType {
    /// Interactive frontend on a display.
    Gui,
    /// No frontend; the machine runs detached.
    Headless,
}

impl SessionType {
    /// Returns the wire spelling of the session type.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            SessionType::Gui => "gui",
            SessionType::Headless => "headless",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Options controlling one start attempt.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct LaunchOptions {
    /// Frontend variant for the opened session.
    pub session_type: SessionType,
    /// `KEY=VALUE` display/runtime hints handed to the opened session.
    pub env: Vec<String>,
    /// Upper bound for a single progress wait call.
    pub wait: Duration,
    /// Number of bounded waits before polling gives up.
    pub poll_budget: u32,
}

impl LaunchOptions {
    /// Create options for the given session type with default polling.
    #[must_use]
    pub fn new(session_type: SessionType) -> Self {
        Self {
            session_type,
            env: Vec::new(),
            wait: DEFAULT_WAIT,
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self::new(SessionType::Gui)
    }
}

/// Terminal status of a start attempt.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub enum LaunchStatus {
    /// The remote action completed with result code 0.
    Succeeded,
    /// The remote action completed with a non-zero result code.
    Failed {
        /// The result code read from the progress object.
        code: i32,
    },
    /// Completion was not observed within the poll budget. The remote
    /// operation may still be running; the protocol offers no abort.
    Incomplete {
        /// Number of bounded waits performed before giving up.
        polls: u32,
    },
    /// The gateway faulted somewhere in the sequence.
    Fault {
        /// Human-readable description of the failing step.
        message: String,
    },
}

/// Record of one start attempt.
///
/// Reports are produced for every attempt, failed ones included; the
/// launcher never lets a fault escape past it.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct LaunchReport {
    /// Stable identity of the machine, when the sequence got far enough to
    /// read it.
    pub machine_id: Option<Uuid>,
    /// When the attempt began.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the whole attempt, teardown included.
    pub duration: Duration,
    /// Terminal status.
    pub status: LaunchStatus,
}

impl LaunchReport {
    /// Returns `true` if the remote action completed with result code 0.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.status, LaunchStatus::Succeeded)
    }
}

/// Drives the start-machine state machine over a gateway.
pub struct OperationLauncher<'g, G: RpcGateway> {
    gateway: &'g G,
    sessions: SessionManager<'g, G>,
}

impl<'g, G: RpcGateway> OperationLauncher<'g, G> {
    /// Create a launcher over the given gateway.
    #[must_use]
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway, sessions: SessionManager::new(gateway) }
    }

    /// Start the machine behind `machine`.
    ///
    /// Takes the machine reference by value and disposes of it during
    /// teardown, together with the progress reference and the session:
    /// close and release run on every path out of the sequence, whether the
    /// remote action succeeded, faulted, or never reported completion.
    /// Failures are folded into the returned report instead of propagating,
    /// so one failed attempt cannot disturb anything beyond itself.
    pub async fn start(
        &self,
        root: &RootRef,
        machine: MachineRef,
        options: &LaunchOptions,
    ) -> LaunchReport {
        let started_at = Utc::now();
        let wall = Instant::now();

        let session = match self.sessions.session_object(root).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "could not acquire a session object");
                self.sessions.release(machine).await;
                return LaunchReport {
                    machine_id: None,
                    started_at,
                    duration: wall.elapsed(),
                    status: LaunchStatus::Fault { message: err.to_string() },
                };
            }
        };

        let mut machine_id = None;
        let outcome = self
            .drive(root, &session, &machine, &mut machine_id, options)
            .await;

        // Teardown runs for every outcome; skipping it would leave the
        // server-side machine lock held.
        self.sessions.close_session(session).await;
        self.sessions.release(machine).await;

        let status = match outcome {
            Ok(()) => LaunchStatus::Succeeded,
            Err(ClientError::OperationFailed { code }) => LaunchStatus::Failed { code },
            Err(ClientError::Incomplete { polls }) => LaunchStatus::Incomplete { polls },
            Err(err) => LaunchStatus::Fault { message: err.to_string() },
        };
        let duration = wall.elapsed();

        match &status {
            LaunchStatus::Succeeded => {
                tracing::info!(machine = ?machine_id, elapsed_ms = duration.as_millis(), "machine started");
            }
            other => {
                tracing::warn!(machine = ?machine_id, status = ?other, "start attempt failed");
            }
        }

        LaunchReport { machine_id, started_at, duration, status }
    }

    /// Steps 2–5 of the sequence: identity read, remote action request,
    /// polling, result code. Teardown stays with the caller so it runs no
    /// matter where this returns.
    async fn drive(
        &self,
        root: &RootRef,
        session: &SessionRef,
        machine: &MachineRef,
        machine_id: &mut Option<Uuid>,
        options: &LaunchOptions,
    ) -> Result<(), ClientError> {
        let id_text = self
            .gateway
            .call(methods::MACHINE_GET_ID, &[Value::from(machine.as_str())])
            .await?
            .into_string()
            .map_err(|e| ClientError::protocol(methods::MACHINE_GET_ID, e))?;
        let id = Uuid::parse_str(&id_text)
            .map_err(|e| ClientError::protocol(methods::MACHINE_GET_ID, e))?;
        *machine_id = Some(id);

        tracing::info!(machine = %id, session_type = %options.session_type, "opening remote session");

        let progress = ProgressRef::new(
            self.gateway
                .call(
                    methods::OPEN_REMOTE_SESSION,
                    &[
                        Value::from(root.as_str()),
                        Value::from(session.as_str()),
                        Value::from(id.to_string()),
                        Value::from(options.session_type.as_wire()),
                        Value::from(options.env.join("\n")),
                    ],
                )
                .await?
                .into_string()
                .map_err(|e| ClientError::protocol(methods::OPEN_REMOTE_SESSION, e))?,
        );

        let poll_result = self.poll(&progress, options).await;
        self.sessions.release(progress).await;
        let code = poll_result?;

        if code != 0 {
            return Err(ClientError::OperationFailed { code });
        }
        Ok(())
    }

    /// Drive the progress object to completion with bounded waits.
    ///
    /// A wait returning before completion is a normal polling tick, not an
    /// error; the completed flag decides. The loop gives up after
    /// `poll_budget` waits so a stuck remote operation cannot block the
    /// client forever.
    async fn poll(
        &self,
        progress: &ProgressRef,
        options: &LaunchOptions,
    ) -> Result<i32, ClientError> {
        let wait_ms = i64::try_from(options.wait.as_millis()).unwrap_or(i64::MAX);
        for tick in 1..=options.poll_budget {
            self.gateway
                .call(
                    methods::PROGRESS_WAIT,
                    &[Value::from(progress.as_str()), Value::Int(wait_ms)],
                )
                .await?;

            let completed = self
                .gateway
                .call(methods::PROGRESS_GET_COMPLETED, &[Value::from(progress.as_str())])
                .await?
                .to_bool()
                .map_err(|e| ClientError::protocol(methods::PROGRESS_GET_COMPLETED, e))?;

            if completed {
                tracing::debug!(progress = %progress, ticks = tick, "progress completed");
                return self
                    .gateway
                    .call(methods::PROGRESS_GET_RESULT_CODE, &[Value::from(progress.as_str())])
                    .await?
                    .to_i32()
                    .map_err(|e| ClientError::protocol(methods::PROGRESS_GET_RESULT_CODE, e));
            }
            tracing::debug!(progress = %progress, tick, "wait expired before completion");
        }
        Err(ClientError::Incomplete { polls: options.poll_budget })
    }
}
