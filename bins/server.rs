use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn log_format(cfg: Option<&AppConfig>) -> LogFormat {
    let raw = cfg
        .and_then(|c| c.logging.format.clone())
        .or_else(|| std::env::var("LOG_FORMAT").ok());
    match raw.as_deref().map(str::parse::<LogFormat>) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            eprintln!("{e}; falling back to compact logs");
            LogFormat::default()
        }
        None => LogFormat::default(),
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let loaded = AppConfig::load_and_validate();
    init_logging(log_format(loaded.as_ref().ok()));
    info!(service = "kanban", event = "logger_init", "tracing subscriber initialized");

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "kanban", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "kanban",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "kanban", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "kanban",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "kanban api starting"
    );

    // The server stops itself on Ctrl+C once in-flight requests drain.
    rt.block_on(async move {
        let server_task = tokio::spawn(server::run_with_config(cfg));
        match server_task.await {
            Ok(Ok(())) => {
                info!(service = "kanban", event = "stop", %service_id, pid, "server stopped normally");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(service = "kanban", event = "run_failed", error = %e, "server returned error");
                ExitCode::FAILURE
            }
            Err(e) => {
                warn!(service = "kanban", event = "task_join_error", error = %e, "server task join error");
                ExitCode::FAILURE
            }
        }
    })
}
