use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Install the global subscriber: rolling log file plus stderr.
///
/// stdout is left to the CLI's own report. Keep the returned guard alive for
/// the life of the process or buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Per-request upstream spans are noisy; only show them when asked to.
    let filter_str = if config.enable_tracing {
        config.log_level.clone()
    } else {
        format!("{},inventory_scope::upstream=info", config.log_level)
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).with(stderr_layer()).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).with(stderr_layer()).init();
    }

    guard
}

/// Human-readable stderr output, in both plain and JSON file modes
fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_writes_file() {
        let dir = std::env::temp_dir().join(format!("inventory_scope_log_{}", std::process::id()));
        let config = LoggingConfig {
            log_level: "info".to_string(),
            log_dir: dir.to_string_lossy().into_owned(),
            log_file: "json.log".to_string(),
            use_json: true,
            rotation: "never".to_string(),
            enable_tracing: false,
        };

        let guard = init_logging(&config);
        tracing::info!(stage = 1, "json logging check");
        drop(guard);

        let content = std::fs::read_to_string(dir.join("json.log")).unwrap();
        let line = content
            .lines()
            .find(|l| l.contains("json logging check"))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["fields"]["stage"], 1);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
