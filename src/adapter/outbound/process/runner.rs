//! Runs the schema-build command with its output routed into the log.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::info;

use crate::domain::startup::{BuildExit, BuildInvocation};
use crate::error::Result;
use crate::port::outbound::build::BuildRunner;

/// [`BuildRunner`] backed by a real child process.
///
/// The child's stdout and stderr are piped and re-emitted line by line as
/// log events, so nothing reaches this process's stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessBuildRunner;

#[async_trait]
impl BuildRunner for ProcessBuildRunner {
    async fn run(&self, invocation: &BuildInvocation) -> Result<BuildExit> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(forward_lines(out, "stdout")));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(forward_lines(err, "stderr")));

        let status = child.wait().await?;
        for task in [stdout, stderr].into_iter().flatten() {
            let _ = task.await;
        }

        Ok(BuildExit {
            success: status.success(),
            code: status.code(),
        })
    }
}

async fn forward_lines<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        info!(stream, "build: {line}");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::Error;

    fn sh(script: &str) -> BuildInvocation {
        BuildInvocation {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            schema_path: PathBuf::from("/tmp/manage.json"),
            env: vec![("DATABASE_URL".to_string(), "postgresql://db/x".to_string())],
        }
    }

    #[tokio::test]
    async fn reports_exit_code() {
        let exit = ProcessBuildRunner.run(&sh("exit 4")).await.unwrap();
        assert_eq!(exit, BuildExit::from_code(4));
        assert!(!exit.success);
    }

    #[tokio::test]
    async fn passes_extra_environment() {
        let exit = ProcessBuildRunner
            .run(&sh(r#"test "$DATABASE_URL" = "postgresql://db/x""#))
            .await
            .unwrap();
        assert!(exit.success);
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let invocation = BuildInvocation {
            program: "definitely-not-a-real-program-7f3a".to_string(),
            ..sh("true")
        };
        let result = ProcessBuildRunner.run(&invocation).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
