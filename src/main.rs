use std::process::ExitCode;

use rust_fileserver::config::Config;
use rust_fileserver::indexer;
use rust_fileserver::logger;
use rust_fileserver::server::{start_signal_handler, Server};

/// Used when no path is given on the command line; any extension `config` supports
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let cfg = match Config::load_from(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(&cfg) {
        eprintln!("[ERROR] Failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    // Create the Tokio runtime, sizing the worker pool from configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> ExitCode {
    prepare_site(&cfg);

    let server = match Server::bind(&cfg) {
        Ok(server) => server,
        Err(e) => {
            logger::log_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = start_signal_handler(server.shutdown_handle()) {
        logger::log_warning(&format!("Signal handlers unavailable: {e}"));
    }

    server.run().await;
    ExitCode::SUCCESS
}

/// Check the web root and regenerate the storage index before accepting connections
fn prepare_site(cfg: &Config) {
    let site = &cfg.site;
    if !site.web_root.is_dir() {
        logger::log_warning(&format!(
            "Web root '{}' does not exist; every static request will be 404",
            site.web_root.display()
        ));
    }

    if !site.generate_index {
        return;
    }

    match indexer::generate_index(site) {
        Ok(summary) => logger::log_index_written(&summary.output, summary.entries),
        Err(e) => logger::log_error(&format!("Index generation failed: {e}")),
    }
}
