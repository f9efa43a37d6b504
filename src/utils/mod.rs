pub mod build_info;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "cashflow_core=warn";

/// Installs the global tracing subscriber. Honors `RUST_LOG` and writes to
/// stderr so command output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());

        // A subscriber installed by an embedding application wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// `RUST_LOG` as given when it is set and parses; the crate default otherwise.
fn env_filter(raw: Option<String>) -> EnvFilter {
    raw.filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_applies_only_without_rust_log() {
        assert_eq!(env_filter(None).to_string(), DEFAULT_DIRECTIVE);
        assert_eq!(env_filter(Some("  ".into())).to_string(), DEFAULT_DIRECTIVE);

        let verbose = env_filter(Some("cashflow_core=debug".into())).to_string();
        assert!(verbose.contains("cashflow_core=debug"), "{verbose}");
        assert!(!verbose.contains("warn"), "{verbose}");
    }
}
