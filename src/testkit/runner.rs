//! Mock [`BuildRunner`] that records what it was asked to run.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::startup::{BuildExit, BuildInvocation};
use crate::error::Result;
use crate::port::outbound::build::BuildRunner;

/// Clones share the recorded invocations.
#[derive(Clone)]
pub struct RecordingRunner {
    exit: Option<BuildExit>,
    invocations: Arc<Mutex<Vec<BuildInvocation>>>,
}

impl RecordingRunner {
    pub fn exiting(code: i32) -> Self {
        Self {
            exit: Some(BuildExit::from_code(code)),
            invocations: Arc::default(),
        }
    }

    /// Every run fails as if the program were missing.
    pub fn failing_to_spawn() -> Self {
        Self {
            exit: None,
            invocations: Arc::default(),
        }
    }

    pub fn invocations(&self) -> Vec<BuildInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn run_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

#[async_trait]
impl BuildRunner for RecordingRunner {
    async fn run(&self, invocation: &BuildInvocation) -> Result<BuildExit> {
        self.invocations.lock().unwrap().push(invocation.clone());
        self.exit.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "program not found").into()
        })
    }
}
