use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{validate, Config};
use crate::contract::{CoreRequest, CoreResponse, OpenResponse, SearchResponse};
use crate::engine::{self, EngineError, EngineLauncher, ProcessLauncher};
use crate::opener::{self, OpenError};

#[derive(Debug)]
pub enum ServiceError {
    NotReady,
    Config(String),
    InvalidRequest(String),
    Engine(EngineError),
    Open(OpenError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "service is not ready yet"),
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::InvalidRequest(message) => write!(f, "invalid request: {message}"),
            Self::Engine(error) => write!(f, "engine error: {error}"),
            Self::Open(error) => write!(f, "open error: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<EngineError> for ServiceError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<OpenError> for ServiceError {
    fn from(value: OpenError) -> Self {
        Self::Open(value)
    }
}

pub struct SearchService {
    config: Config,
    launcher: Box<dyn EngineLauncher>,
    ready: AtomicBool,
}

impl SearchService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        Self::with_launcher(config, Box::new(ProcessLauncher))
    }

    pub fn with_launcher(
        config: Config,
        launcher: Box<dyn EngineLauncher>,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self {
            config,
            launcher,
            ready: AtomicBool::new(false),
        })
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<String>, ServiceError> {
        if !self.is_ready() {
            return Err(ServiceError::NotReady);
        }

        // Blank input resolves without touching the engine at all.
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let output = self.launcher.run(&self.config.engine_path(), query)?;
        let lines = engine::evaluate_output(output)?;

        let effective_limit = limit.unwrap_or(self.config.max_results as usize);
        Ok(crate::search::page_results(lines, offset, effective_limit))
    }

    pub fn open(&self, path: &str) -> Result<(), ServiceError> {
        if path.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("file path is empty".into()));
        }

        opener::open_path(path).map_err(ServiceError::from)
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(payload) => {
                let results = self.search(
                    &payload.query,
                    payload.limit,
                    payload.offset.unwrap_or(0),
                )?;
                Ok(CoreResponse::Search(SearchResponse { results }))
            }
            CoreRequest::Open(payload) => {
                self.open(&payload.path)?;
                Ok(CoreResponse::Open(OpenResponse { opened: true }))
            }
        }
    }
}
