//! Subcommand definitions, dispatch, and exit-code mapping.
//!
//! Each subcommand maps 1:1 to one core operation; clap rejects anything
//! unrecognized before the core is touched. Logoff runs as the final step
//! on every path, including failed dispatches.

use clap::{Parser, Subcommand, ValueEnum};
use vmrc_client::{
    ClientError, HttpGateway, InspectionService, LaunchOptions, LaunchReport, LaunchStatus,
    ObjectResolver, OperationLauncher, RpcGateway, SessionManager, SessionType,
};
use vmrc_core::{Credentials, RootRef};

/// Process exit codes, one per member of the error taxonomy.
///
/// Usage errors exit with clap's own code (2) before the core runs.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const FAULT: i32 = 5;
    pub const OPERATION_FAILED: i32 = 6;
    pub const INCOMPLETE: i32 = 7;
}

/// Remote-control client for a virtualization web service.
#[derive(Debug, Parser)]
#[command(name = "vmrc", version, about = "Remote-control client for a virtualization web service")]
pub struct Cli {
    /// Web service endpoint, `host:port`.
    #[arg(long, env = "VMRC_SERVER", default_value = "127.0.0.1:18083", global = true)]
    pub server: String,

    /// Logon username. Empty selects anonymous/local access.
    #[arg(long, env = "VMRC_USERNAME", default_value = "", global = true)]
    pub username: String,

    /// Logon password.
    #[arg(long, env = "VMRC_PASSWORD", default_value = "", global = true)]
    pub password: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show registered objects.
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
    /// List host information.
    List {
        #[command(subcommand)]
        what: ListTarget,
    },
    /// Start the given virtual machine.
    Startvm {
        /// Machine name or UUID.
        target: String,

        /// Frontend variant for the opened session.
        #[arg(long, value_enum, default_value_t = FrontendKind::Gui)]
        session_type: FrontendKind,

        /// `KEY=VALUE` hint handed to the opened session (repeatable).
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ShowTarget {
    /// List installed virtual machines.
    Vms,
}

#[derive(Debug, Subcommand)]
pub enum ListTarget {
    /// Host processor count and performance metrics.
    Hostinfo,
}

/// clap-facing spelling of the session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrontendKind {
    Gui,
    Headless,
}

impl From<FrontendKind> for SessionType {
    fn from(kind: FrontendKind) -> Self {
        match kind {
            FrontendKind::Gui => SessionType::Gui,
            FrontendKind::Headless => SessionType::Headless,
        }
    }
}

/// Map a client error to its process exit code.
#[must_use]
pub fn exit_code_for(err: &ClientError) -> i32 {
    match err {
        ClientError::Auth(_) => exit_code::AUTH,
        ClientError::NotFound { .. } => exit_code::NOT_FOUND,
        ClientError::OperationFailed { .. } => exit_code::OPERATION_FAILED,
        ClientError::Incomplete { .. } => exit_code::INCOMPLETE,
        _ => exit_code::FAULT,
    }
}

/// Exit code for a finished launch report.
#[must_use]
pub fn exit_code_for_report(report: &LaunchReport) -> i32 {
    match report.status {
        LaunchStatus::Succeeded => exit_code::OK,
        LaunchStatus::Failed { .. } => exit_code::OPERATION_FAILED,
        LaunchStatus::Incomplete { .. } => exit_code::INCOMPLETE,
        _ => exit_code::FAULT,
    }
}

/// Run the parsed command to completion and return the process exit code.
pub async fn run(cli: Cli) -> i32 {
    let gateway = HttpGateway::new(cli.server.clone());
    let sessions = SessionManager::new(&gateway);
    let credentials = Credentials::new(cli.username.clone(), cli.password.clone());

    let root = match sessions.logon(&credentials).await {
        Ok(root) => root,
        Err(err) => {
            eprintln!("error: {err}");
            return exit_code_for(&err);
        }
    };

    match InspectionService::new(&gateway).server_version(&root).await {
        Ok(version) => tracing::info!(%version, "connected"),
        Err(err) => tracing::debug!(error = %err, "version query failed"),
    }

    let outcome = dispatch(&gateway, &root, &cli.command).await;

    // Logoff runs last on every path; the root reference is released
    // exactly once.
    let mut slot = Some(root);
    sessions.logoff(&mut slot).await;

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            exit_code_for(&err)
        }
    }
}

async fn dispatch<G: RpcGateway>(
    gateway: &G,
    root: &RootRef,
    command: &Command,
) -> Result<i32, ClientError> {
    match command {
        Command::Show { what: ShowTarget::Vms } => {
            let machines = InspectionService::new(gateway).list_machines(root).await?;
            if machines.is_empty() {
                println!("no machines registered");
            }
            for (index, machine) in machines.iter().enumerate() {
                println!("Machine {index}: {} - {}", machine.reference, machine.name);
            }
            Ok(exit_code::OK)
        }
        Command::List { what: ListTarget::Hostinfo } => {
            let info = InspectionService::new(gateway).host_info(root).await?;
            println!("Processor count: {}", info.processor_count);
            for metric in &info.metrics {
                println!("Metric: {metric}");
            }
            Ok(exit_code::OK)
        }
        Command::Startvm { target, session_type, env } => {
            let machine = ObjectResolver::new(gateway).resolve(root, target).await?;

            let mut options = LaunchOptions::new((*session_type).into());
            options.env.clone_from(env);
            let report = OperationLauncher::new(gateway).start(root, machine, &options).await;

            match &report.status {
                LaunchStatus::Succeeded => {
                    println!("Machine {target} started");
                }
                LaunchStatus::Failed { code } => {
                    eprintln!("error: start of \"{target}\" failed with result code {code}");
                }
                LaunchStatus::Incomplete { polls } => {
                    eprintln!(
                        "error: start of \"{target}\" still running after {polls} waits; \
                         the machine may come up later"
                    );
                }
                LaunchStatus::Fault { message } => {
                    eprintln!("error: start of \"{target}\" failed: {message}");
                }
                _ => {}
            }
            Ok(exit_code_for_report(&report))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use vmrc_core::RemoteFault;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_vms_parses() {
        let cli = Cli::try_parse_from(["vmrc", "show", "vms"]).expect("must parse");
        assert!(matches!(cli.command, Command::Show { what: ShowTarget::Vms }));
    }

    #[test]
    fn list_hostinfo_parses() {
        let cli = Cli::try_parse_from(["vmrc", "list", "hostinfo"]).expect("must parse");
        assert!(matches!(cli.command, Command::List { what: ListTarget::Hostinfo }));
    }

    #[test]
    fn startvm_parses_target_and_options() {
        let cli = Cli::try_parse_from([
            "vmrc",
            "startvm",
            "build-server",
            "--session-type",
            "headless",
            "--env",
            "DISPLAY=:0.0",
        ])
        .expect("must parse");
        match cli.command {
            Command::Startvm { target, session_type, env } => {
                assert_eq!(target, "build-server");
                assert_eq!(session_type, FrontendKind::Headless);
                assert_eq!(env, vec!["DISPLAY=:0.0".to_owned()]);
            }
            other => panic!("expected Startvm, got {other:?}"),
        }
    }

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        assert!(Cli::try_parse_from(["vmrc", "stopvm", "x"]).is_err());
        assert!(Cli::try_parse_from(["vmrc", "show", "disks"]).is_err());
        assert!(Cli::try_parse_from(["vmrc"]).is_err(), "a subcommand is required");
    }

    #[test]
    fn exit_codes_cover_the_taxonomy() {
        assert_eq!(
            exit_code_for(&ClientError::Auth(RemoteFault::new(-5, "denied"))),
            exit_code::AUTH
        );
        assert_eq!(
            exit_code_for(&ClientError::NotFound { identifier: "x".to_owned() }),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            exit_code_for(&ClientError::Fault(RemoteFault::new(-7, "busy"))),
            exit_code::FAULT
        );
        assert_eq!(
            exit_code_for(&ClientError::OperationFailed { code: 1 }),
            exit_code::OPERATION_FAILED
        );
        assert_eq!(
            exit_code_for(&ClientError::Incomplete { polls: 30 }),
            exit_code::INCOMPLETE
        );
    }

    #[test]
    fn frontend_kind_maps_to_session_type() {
        assert_eq!(SessionType::from(FrontendKind::Gui), SessionType::Gui);
        assert_eq!(SessionType::from(FrontendKind::Headless), SessionType::Headless);
    }
}
