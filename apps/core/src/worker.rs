use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::core_service::{SearchService, ServiceError};

pub struct SearchJob {
    pub query: String,
    pub limit: Option<usize>,
    pub offset: usize,
    pub reply: Sender<SearchOutcome>,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub query: String,
    pub result: Result<Vec<String>, ServiceError>,
}

enum WorkerCommand {
    Search(SearchJob),
    Shutdown,
}

/// Runs engine queries off the interactive thread. Jobs are processed
/// strictly in submission order; the debounce layer above already keeps
/// at most one query in flight.
pub struct SearchWorker {
    commands: Sender<WorkerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(service: Arc<SearchService>) -> Self {
        let (commands, inbox) = mpsc::channel();
        let handle = std::thread::spawn(move || worker_loop(service, inbox));
        Self {
            commands,
            handle: Some(handle),
        }
    }

    pub fn submit(&self, job: SearchJob) -> bool {
        self.commands.send(WorkerCommand::Search(job)).is_ok()
    }

    // If the worker thread is gone the returned receiver reports a recv
    // error instead of blocking.
    pub fn request(&self, query: &str, limit: Option<usize>, offset: usize) -> Receiver<SearchOutcome> {
        let (reply, outcome) = mpsc::channel();
        self.submit(SearchJob {
            query: query.to_string(),
            limit,
            offset,
            reply,
        });
        outcome
    }

    pub fn shutdown(&mut self) {
        let _ = self.commands.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(service: Arc<SearchService>, inbox: Receiver<WorkerCommand>) {
    while let Ok(command) = inbox.recv() {
        match command {
            WorkerCommand::Search(job) => {
                let result = service.search(&job.query, job.limit, job.offset);
                let outcome = SearchOutcome {
                    query: job.query,
                    result,
                };
                // The requester may have gone away; delivery is best-effort.
                let _ = job.reply.send(outcome);
            }
            WorkerCommand::Shutdown => break,
        }
    }
}
