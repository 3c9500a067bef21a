//! Outcomes of the startup steps: readiness, provisioning, build and exec.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Result of one readiness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Server accepts connections.
    Ready,
    /// Server answered but is still starting up or shutting down.
    Starting(String),
    /// No answer: refused, unresolvable or timed out.
    Unreachable(String),
}

impl ProbeStatus {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Starting(reason) => write!(f, "starting: {reason}"),
            Self::Unreachable(reason) => write!(f, "unreachable: {reason}"),
        }
    }
}

/// How long a readiness wait took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReport {
    pub target: String,
    pub attempts: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

/// Per-database provisioning results, in target order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub entries: Vec<(String, ProvisionOutcome)>,
}

impl ProvisionReport {
    pub fn record(&mut self, database: impl Into<String>, outcome: ProvisionOutcome) {
        self.entries.push((database.into(), outcome));
    }

    #[must_use]
    pub fn created(&self) -> Vec<&str> {
        self.with_outcome(ProvisionOutcome::Created)
    }

    #[must_use]
    pub fn existing(&self) -> Vec<&str> {
        self.with_outcome(ProvisionOutcome::AlreadyExists)
    }

    fn with_outcome(&self, outcome: ProvisionOutcome) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, o)| *o == outcome)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Provisioning as seen by the entrypoint, where failure is not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStep {
    Skipped,
    Completed(ProvisionReport),
    Failed(String),
}

/// The external schema-build command.
#[derive(Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub program: String,
    /// Arguments, with the schema path already appended.
    pub args: Vec<String>,
    pub schema_path: PathBuf,
    /// Extra environment for the child.
    pub env: Vec<(String, String)>,
}

impl BuildInvocation {
    /// Command line for logs. Environment values are left out since they
    /// carry credentials.
    #[must_use]
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for BuildInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildInvocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("schema_path", &self.schema_path)
            .field(
                "env",
                &self.env.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// How a finished build child exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildExit {
    pub success: bool,
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl BuildExit {
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

/// Result of the conditional build step. None of these stop startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Turned off by configuration or flag.
    Disabled,
    /// No schema file at the configured path.
    Skipped { schema_path: PathBuf },
    Succeeded,
    Failed { code: Option<i32> },
    SpawnFailed { reason: String },
}

impl BuildOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::SpawnFailed { .. })
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Skipped { schema_path } => {
                write!(f, "skipped (no schema at {})", schema_path.display())
            }
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed { code: Some(code) } => write!(f, "failed with exit code {code}"),
            Self::Failed { code: None } => f.write_str("terminated by signal"),
            Self::SpawnFailed { reason } => write!(f, "could not start: {reason}"),
        }
    }
}

/// What the entrypoint did before handing over to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub waits: Vec<WaitReport>,
    pub provision: ProvisionStep,
    pub build: BuildOutcome,
}

/// The command the entrypoint replaces itself with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecPlan {
    pub program: String,
    pub args: Vec<String>,
}

impl ExecPlan {
    /// Split a command vector into program and arguments.
    ///
    /// Returns `None` for an empty vector or an empty program name.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_plan_splits_program_and_args() {
        let argv = vec!["python".to_string(), "server.py".to_string(), "-v".to_string()];
        let plan = ExecPlan::from_argv(&argv).unwrap();
        assert_eq!(plan.program, "python");
        assert_eq!(plan.args, vec!["server.py", "-v"]);
    }

    #[test]
    fn exec_plan_rejects_empty_argv() {
        assert!(ExecPlan::from_argv(&[]).is_none());
        assert!(ExecPlan::from_argv(&[String::new()]).is_none());
    }

    #[test]
    fn build_outcome_failure_classification() {
        assert!(BuildOutcome::Failed { code: Some(1) }.is_failure());
        assert!(BuildOutcome::SpawnFailed {
            reason: "not found".to_string()
        }
        .is_failure());
        assert!(!BuildOutcome::Succeeded.is_failure());
        assert!(!BuildOutcome::Disabled.is_failure());
        assert!(!BuildOutcome::Skipped {
            schema_path: PathBuf::from("/app/manage.json")
        }
        .is_failure());
    }

    #[test]
    fn build_outcome_display() {
        assert_eq!(
            BuildOutcome::Failed { code: Some(2) }.to_string(),
            "failed with exit code 2"
        );
        assert_eq!(
            BuildOutcome::Skipped {
                schema_path: PathBuf::from("/app/manage.json")
            }
            .to_string(),
            "skipped (no schema at /app/manage.json)"
        );
    }

    #[test]
    fn provision_report_partitions_outcomes() {
        let mut report = ProvisionReport::default();
        report.record("cached_queries", ProvisionOutcome::Created);
        report.record("connectwise_api", ProvisionOutcome::AlreadyExists);
        assert_eq!(report.created(), vec!["cached_queries"]);
        assert_eq!(report.existing(), vec!["connectwise_api"]);
    }

    #[test]
    fn build_invocation_debug_hides_env_values() {
        let invocation = BuildInvocation {
            program: "python".to_string(),
            args: vec!["build_database.py".to_string(), "/app/manage.json".to_string()],
            schema_path: PathBuf::from("/app/manage.json"),
            env: vec![(
                "DATABASE_URL".to_string(),
                "postgresql://postgres:secret@db/connectwise_api".to_string(),
            )],
        };
        let debug = format!("{invocation:?}");
        assert!(debug.contains("DATABASE_URL"));
        assert!(!debug.contains("secret"));
        assert_eq!(
            invocation.display_command(),
            "python build_database.py /app/manage.json"
        );
    }

    #[test]
    fn build_exit_from_code() {
        assert!(BuildExit::from_code(0).success);
        assert!(!BuildExit::from_code(3).success);
        assert_eq!(BuildExit::from_code(3).code, Some(3));
    }
}
