use std::path::PathBuf;
use std::sync::OnceLock;

use gather_common::observability::{LogConfig, LogFormat};

static INIT_PATH: OnceLock<PathBuf> = OnceLock::new();

#[allow(dead_code)]
pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "gather-tests",
            log_dir: Some(std::env::temp_dir().join("gather-tests")),
            emit_stderr: true,
            format: if std::env::var("GATHER_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        gather_common::observability::init_logging(config).unwrap_or_default()
    });
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
