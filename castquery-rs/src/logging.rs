//! Log filter setup for the binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;

fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter from `RUST_LOG`, falling back to the `-v` level when it is unset
/// or unparsable. An explicit `-v` is layered on top of `RUST_LOG`.
pub fn env_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = verbosity_level(verbose);
    let from_env = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());

    match from_env {
        Some(filter) if verbose == 0 => filter,
        Some(filter) => filter.add_directive(level.into()),
        None => EnvFilter::default().add_directive(level.into()),
    }
}

/// Install a stderr `fmt` subscriber.
pub fn init(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(verbose, rust_log.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_default_is_warn() {
        assert_eq!(env_filter(0, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(env_filter(0, Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_used_without_verbose_flag() {
        assert_eq!(
            env_filter(0, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_verbose_flag_without_rust_log() {
        assert_eq!(env_filter(1, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(2, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter(5, None).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_bad_rust_log_falls_back() {
        assert_eq!(
            env_filter(2, Some("castquery=notalevel")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
