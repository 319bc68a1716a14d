use cytoclass::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Console logging plus an optional daily rotating file.
///
/// The returned guard must be held for the life of the process so buffered
/// file output is flushed on exit.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=warn", config.level)));

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_target(true).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    // `rolling::daily` panics if it can't create the initial file, so preflight writability.
    let mut guard = None;
    let file_layer = config.dir.as_ref().and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Could not create log directory {} ({}), file logging disabled",
                log_dir.display(),
                e
            );
            return None;
        }
        let test_path = log_dir.join(".cytoclass_write_test");
        if let Err(e) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&test_path)
        {
            eprintln!(
                "Warning: Could not write to log directory {} ({}), file logging disabled",
                log_dir.display(),
                e
            );
            return None;
        }
        let _ = std::fs::remove_file(&test_path);

        let file_appender = tracing_appender::rolling::daily(log_dir, "cytoclass.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

pub fn init_logging_simple() {
    // Minimal logging for one-off commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
