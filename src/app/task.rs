use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, error};

use crate::distance::DistanceRow;
use crate::session::LoadedModel;

pub(in crate::app) enum TaskOutput {
    Loaded(LoadedModel),
    Distances { uri: String, rows: Vec<DistanceRow> },
}

pub(in crate::app) enum TaskPoll {
    Pending,
    Finished(Result<TaskOutput, String>),
}

/// A single job running on a worker thread; the UI polls it every frame.
pub(in crate::app) struct BackgroundTask {
    message: String,
    rx: Receiver<Result<TaskOutput, String>>,
}

impl BackgroundTask {
    pub(in crate::app) fn spawn<F>(message: impl Into<String>, job: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<TaskOutput> + Send + 'static,
    {
        let message = message.into();
        let (tx, rx) = mpsc::channel();
        debug!(task = %message, "starting background task");

        thread::spawn(move || {
            let result = match panic::catch_unwind(AssertUnwindSafe(job)) {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(error)) => Err(format!("{error:#}")),
                Err(_) => {
                    error!("background task panicked");
                    Err("Background task panicked".to_owned())
                }
            };
            let _ = tx.send(result);
        });

        Self { message, rx }
    }

    pub(in crate::app) fn message(&self) -> &str {
        &self.message
    }

    pub(in crate::app) fn poll(&self) -> TaskPoll {
        match self.rx.try_recv() {
            Ok(result) => TaskPoll::Finished(result),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Finished(Err(
                "Background worker disconnected".to_owned(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use anyhow::Context;

    use super::*;

    fn wait(task: &BackgroundTask) -> Result<TaskOutput, String> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let TaskPoll::Finished(result) = task.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "task never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn results_come_back_through_the_channel() {
        let task = BackgroundTask::spawn("Computing", || {
            Ok(TaskOutput::Distances {
                uri: "memory:test".to_owned(),
                rows: Vec::new(),
            })
        });
        assert_eq!(task.message(), "Computing");

        match wait(&task) {
            Ok(TaskOutput::Distances { uri, rows }) => {
                assert_eq!(uri, "memory:test");
                assert!(rows.is_empty());
            }
            _ => panic!("unexpected task result"),
        }
    }

    #[test]
    fn errors_keep_their_context() {
        let task = BackgroundTask::spawn("Loading", || {
            let failed: anyhow::Result<TaskOutput> = Err(anyhow::anyhow!("no such file"));
            failed.context("failed to load data.rdf")
        });

        let message = wait(&task).err().unwrap();
        assert!(message.contains("failed to load data.rdf"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn panics_are_reported_as_errors() {
        let task = BackgroundTask::spawn("Loading", || -> anyhow::Result<TaskOutput> {
            panic!("worker blew up")
        });

        assert_eq!(wait(&task).err().unwrap(), "Background task panicked");
    }
}
