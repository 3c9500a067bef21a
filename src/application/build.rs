//! The conditional schema-build step.

use tracing::{info, warn};

use crate::domain::startup::{BuildInvocation, BuildOutcome};
use crate::port::outbound::build::BuildRunner;

/// Run the build if it is enabled and its schema file exists.
///
/// Never fails: a build that cannot start or exits non-zero is logged as a
/// warning and startup continues with whatever the API database holds.
pub async fn run_build_step(
    invocation: Option<&BuildInvocation>,
    runner: &dyn BuildRunner,
) -> BuildOutcome {
    let Some(invocation) = invocation else {
        info!("Database build disabled");
        return BuildOutcome::Disabled;
    };

    let schema_present = tokio::fs::metadata(&invocation.schema_path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !schema_present {
        info!(
            schema = %invocation.schema_path.display(),
            "No API schema found, skipping database build"
        );
        return BuildOutcome::Skipped {
            schema_path: invocation.schema_path.clone(),
        };
    }

    info!(command = %invocation.display_command(), "Building API database");
    let outcome = match runner.run(invocation).await {
        Ok(exit) if exit.success => BuildOutcome::Succeeded,
        Ok(exit) => BuildOutcome::Failed { code: exit.code },
        Err(e) => BuildOutcome::SpawnFailed {
            reason: e.to_string(),
        },
    };

    if outcome.is_failure() {
        warn!(result = %outcome, "Database build failed, continuing startup");
    } else {
        info!("API database build complete");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::build_invocation;
    use crate::testkit::runner::RecordingRunner;

    #[tokio::test]
    async fn disabled_build_does_not_run() {
        let runner = RecordingRunner::exiting(0);
        let outcome = run_build_step(None, &runner).await;
        assert_eq!(outcome, BuildOutcome::Disabled);
        assert_eq!(runner.run_count(), 0);
    }

    #[tokio::test]
    async fn missing_schema_skips_build() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = build_invocation(&dir.path().join("manage.json"));
        let runner = RecordingRunner::exiting(0);

        let outcome = run_build_step(Some(&invocation), &runner).await;

        assert!(matches!(outcome, BuildOutcome::Skipped { .. }));
        assert_eq!(runner.run_count(), 0);
    }

    #[tokio::test]
    async fn schema_directory_is_not_a_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = build_invocation(dir.path());
        let runner = RecordingRunner::exiting(0);

        let outcome = run_build_step(Some(&invocation), &runner).await;

        assert!(matches!(outcome, BuildOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn present_schema_runs_build() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("manage.json");
        std::fs::write(&schema, "{}").unwrap();
        let runner = RecordingRunner::exiting(0);

        let outcome = run_build_step(Some(&build_invocation(&schema)), &runner).await;

        assert_eq!(outcome, BuildOutcome::Succeeded);
        let runs = runner.invocations();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].args.last().map(String::as_str), schema.to_str());
    }

    #[tokio::test]
    async fn failed_build_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("manage.json");
        std::fs::write(&schema, "{}").unwrap();
        let runner = RecordingRunner::exiting(2);

        let outcome = run_build_step(Some(&build_invocation(&schema)), &runner).await;

        assert_eq!(outcome, BuildOutcome::Failed { code: Some(2) });
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn unstartable_build_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("manage.json");
        std::fs::write(&schema, "{}").unwrap();
        let runner = RecordingRunner::failing_to_spawn();

        let outcome = run_build_step(Some(&build_invocation(&schema)), &runner).await;

        assert!(matches!(outcome, BuildOutcome::SpawnFailed { .. }));
        assert!(outcome.is_failure());
    }
}
