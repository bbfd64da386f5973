use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, Config, ConfigError};
use crate::contract::{CoreRequest, CoreResponse, SearchRequest, SearchResponse};
use crate::core_service::{SearchService, ServiceError};
use crate::engine::{EngineLauncher, ProcessLauncher};
use crate::logging;
use crate::transport::{self, ErrorCode, ErrorResponse, TransportResponse};
use crate::worker::SearchWorker;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
    Worker(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Worker(error) => write!(f, "worker error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Serve,
    Query {
        query: String,
        limit: Option<usize>,
        offset: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,
    pub config_path: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Serve,
            config_path: None,
            resources_dir: None,
        }
    }
}

pub fn parse_cli_args(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "serve" => options.mode = RunMode::Serve,
            "--query" => {
                let value = iter.next().ok_or("--query requires a value")?;
                options.mode = RunMode::Query {
                    query: value.clone(),
                    limit: None,
                    offset: 0,
                };
            }
            "--limit" => {
                let value = iter.next().ok_or("--limit requires a value")?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --limit value: {value}"))?;
                match &mut options.mode {
                    RunMode::Query { limit, .. } => *limit = Some(parsed),
                    RunMode::Serve => return Err("--limit is only valid after --query".into()),
                }
            }
            "--offset" => {
                let value = iter.next().ok_or("--offset requires a value")?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --offset value: {value}"))?;
                match &mut options.mode {
                    RunMode::Query { offset, .. } => *offset = parsed,
                    RunMode::Serve => return Err("--offset is only valid after --query".into()),
                }
            }
            "--config" => {
                let value = iter.next().ok_or("--config requires a value")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--resources" => {
                let value = iter.next().ok_or("--resources requires a value")?;
                options.resources_dir = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

pub fn run_with_options(options: RunOptions) -> Result<(), RuntimeError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(resources_dir) = options.resources_dir {
        config.resources_dir = resources_dir;
    }

    if !config.config_path.exists() {
        config::save(&config)?;
        eprintln!(
            "[everybar-core] wrote default config to {}",
            config.config_path.display()
        );
    }

    if let Err(error) = logging::init() {
        eprintln!("[everybar-core] logging unavailable: {error}");
    }

    // stdout carries the response protocol in serve mode; diagnostics stay
    // on stderr in every mode.
    eprintln!(
        "[everybar-core] startup mode={} config_path={} engine_path={}",
        mode_label(&options.mode),
        config.config_path.display(),
        config.engine_path().display(),
    );
    logging::info(&format!("startup mode={}", mode_label(&options.mode)));

    let mut app = App::start(config)?;
    let run_result = match options.mode {
        RunMode::Serve => {
            eprintln!("[everybar-core] serving requests on stdio");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            app.serve(stdin.lock(), stdout.lock())
        }
        RunMode::Query {
            query,
            limit,
            offset,
        } => run_single_query(&app, &query, limit, offset),
    };

    app.stop();
    run_result
}

fn run_single_query(
    app: &App,
    query: &str,
    limit: Option<usize>,
    offset: usize,
) -> Result<(), RuntimeError> {
    let results = app.run_query(query, limit, offset)?;
    for path in &results {
        println!("{path}");
    }
    eprintln!("[everybar-core] {} result(s)", results.len());
    Ok(())
}

fn mode_label(mode: &RunMode) -> &'static str {
    match mode {
        RunMode::Serve => "serve",
        RunMode::Query { .. } => "query",
    }
}

pub struct App {
    service: Arc<SearchService>,
    worker: Option<SearchWorker>,
}

impl App {
    pub fn start(config: Config) -> Result<Self, RuntimeError> {
        Self::start_with_launcher(config, Box::new(ProcessLauncher))
    }

    pub fn start_with_launcher(
        config: Config,
        launcher: Box<dyn EngineLauncher>,
    ) -> Result<Self, RuntimeError> {
        let service = Arc::new(SearchService::with_launcher(config, launcher)?);
        let worker = SearchWorker::spawn(Arc::clone(&service));
        service.mark_ready();
        logging::info("runtime started");

        Ok(Self {
            service,
            worker: Some(worker),
        })
    }

    pub fn service(&self) -> &Arc<SearchService> {
        &self.service
    }

    pub fn stop(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
        logging::info("runtime stopped");
    }

    pub fn run_query(
        &self,
        query: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<String>, RuntimeError> {
        let Some(worker) = &self.worker else {
            return Err(RuntimeError::Worker("runtime is stopped".into()));
        };

        let receiver = worker.request(query, limit, offset);
        let outcome = receiver
            .recv()
            .map_err(|_| RuntimeError::Worker("search worker stopped unexpectedly".into()))?;
        outcome.result.map_err(RuntimeError::Service)
    }

    pub fn serve(
        &self,
        reader: impl BufRead,
        mut writer: impl Write,
    ) -> Result<(), RuntimeError> {
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = self.respond(trimmed);
            writer.write_all(response.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        Ok(())
    }

    fn respond(&self, payload: &str) -> String {
        let request = match serde_json::from_str::<CoreRequest>(payload) {
            Ok(request) => request,
            Err(error) => {
                return transport::encode(&TransportResponse::Err {
                    error: ErrorResponse {
                        code: ErrorCode::InvalidJson,
                        message: error.to_string(),
                    },
                });
            }
        };

        let response = match request {
            CoreRequest::Search(search) => transport::from_result(
                self.search_via_worker(search)
                    .map(|results| CoreResponse::Search(SearchResponse { results })),
            ),
            open_request => transport::handle_request(&self.service, open_request),
        };

        transport::encode(&response)
    }

    fn search_via_worker(&self, request: SearchRequest) -> Result<Vec<String>, ServiceError> {
        let Some(worker) = &self.worker else {
            return Err(ServiceError::NotReady);
        };

        let receiver = worker.request(&request.query, request.limit, request.offset.unwrap_or(0));
        match receiver.recv() {
            Ok(outcome) => {
                if let Err(error) = &outcome.result {
                    logging::warn(&format!("search '{}' failed: {error}", outcome.query));
                }
                outcome.result
            }
            Err(_) => {
                logging::error("search worker stopped; treating requests as not ready");
                Err(ServiceError::NotReady)
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_args, RunMode};
    use std::path::PathBuf;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_args_defaults_to_serve_mode() {
        let options = parse_cli_args(&[]).expect("empty args should parse");
        assert_eq!(options.mode, RunMode::Serve);
        assert_eq!(options.config_path, None);
        assert_eq!(options.resources_dir, None);
    }

    #[test]
    fn query_mode_collects_limit_and_offset() {
        let options = parse_cli_args(&args(&[
            "--query", "report 2024", "--limit", "10", "--offset", "20",
        ]))
        .expect("query args should parse");

        assert_eq!(
            options.mode,
            RunMode::Query {
                query: "report 2024".to_string(),
                limit: Some(10),
                offset: 20,
            }
        );
    }

    #[test]
    fn config_and_resources_overrides_parse_into_paths() {
        let options = parse_cli_args(&args(&[
            "serve",
            "--config",
            "/tmp/everybar.toml",
            "--resources",
            "/opt/everybar",
        ]))
        .expect("serve args should parse");

        assert_eq!(options.mode, RunMode::Serve);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/everybar.toml")));
        assert_eq!(options.resources_dir, Some(PathBuf::from("/opt/everybar")));
    }

    #[test]
    fn limit_outside_query_mode_is_rejected() {
        let error = parse_cli_args(&args(&["--limit", "10"])).expect_err("limit should fail");
        assert!(error.contains("--limit"));
    }

    #[test]
    fn missing_values_and_unknown_arguments_are_rejected() {
        assert!(parse_cli_args(&args(&["--query"])).is_err());
        assert!(parse_cli_args(&args(&["--config"])).is_err());
        assert!(parse_cli_args(&args(&["--frobnicate"])).is_err());
        assert!(parse_cli_args(&args(&["--query", "a", "--limit", "ten"])).is_err());
    }
}
