use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Spawn(String),
    Failed(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(message) => write!(f, "failed to start: {message}"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
}

impl EngineOutput {
    pub fn success(stdout: Vec<u8>) -> Self {
        Self {
            stdout,
            stderr: Vec::new(),
            exit_code: Some(0),
        }
    }
}

pub trait EngineLauncher: Send + Sync {
    fn run(&self, engine_path: &Path, query: &str) -> Result<EngineOutput, EngineError>;
}

// Lets callers keep a handle on a launcher they hand to the service.
impl<T: EngineLauncher + ?Sized> EngineLauncher for Arc<T> {
    fn run(&self, engine_path: &Path, query: &str) -> Result<EngineOutput, EngineError> {
        (**self).run(engine_path, query)
    }
}

pub struct ProcessLauncher;

impl EngineLauncher for ProcessLauncher {
    fn run(&self, engine_path: &Path, query: &str) -> Result<EngineOutput, EngineError> {
        // The query goes through untrimmed as the single argument; the
        // engine owns all parsing of its own syntax.
        let output = Command::new(engine_path)
            .arg(query)
            .output()
            .map_err(|error| EngineError::Spawn(format!("{}: {error}", engine_path.display())))?;

        Ok(EngineOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

#[derive(Default)]
pub struct MockEngineLauncher {
    scripted: Mutex<VecDeque<Result<EngineOutput, EngineError>>>,
    invocations: Mutex<Vec<(PathBuf, String)>>,
}

impl MockEngineLauncher {
    pub fn with_stdout(stdout: &[u8]) -> Self {
        let mock = Self::default();
        mock.push_result(Ok(EngineOutput::success(stdout.to_vec())));
        mock
    }

    pub fn push_result(&self, result: Result<EngineOutput, EngineError>) {
        lock_recovering(&self.scripted).push_back(result);
    }

    pub fn invocations(&self) -> Vec<(PathBuf, String)> {
        lock_recovering(&self.invocations).clone()
    }

    pub fn invocation_count(&self) -> usize {
        lock_recovering(&self.invocations).len()
    }
}

impl EngineLauncher for MockEngineLauncher {
    fn run(&self, engine_path: &Path, query: &str) -> Result<EngineOutput, EngineError> {
        lock_recovering(&self.invocations).push((engine_path.to_path_buf(), query.to_string()));
        match lock_recovering(&self.scripted).pop_front() {
            Some(result) => result,
            None => Ok(EngineOutput::success(Vec::new())),
        }
    }
}

fn lock_recovering<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}

// es.exe prints GBK regardless of the active code page.
pub fn decode_engine_text(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::GBK.decode(bytes);
    text.into_owned()
}

pub fn result_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn evaluate_output(output: EngineOutput) -> Result<Vec<String>, EngineError> {
    if output.exit_code != Some(0) || !output.stderr.is_empty() {
        let stderr_text = decode_engine_text(&output.stderr);
        let message = if stderr_text.trim().is_empty() {
            match output.exit_code {
                Some(code) => format!("exited with code {code}"),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr_text.trim().to_string()
        };
        return Err(EngineError::Failed(message));
    }

    Ok(result_lines(&decode_engine_text(&output.stdout)))
}
