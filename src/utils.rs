use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize tracing; logs go to stderr so stdout carries only the report payload
pub fn init_tracing_and_env() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
        )
        .init();
}

/// Recreates `dir` empty. Removing the old directory is best effort: a failure
/// is logged and the directory is reused.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => debug!("Removed previous output directory {}", dir.display()),
        Err(e) => warn!("Didn't remove output directory {}: {}", dir.display(), e),
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_output_is_cleared() {
        let tmp = tempfile::tempdir().unwrap();
        let graphs = tmp.path().join("graphs");
        fs::create_dir_all(&graphs).unwrap();
        fs::write(graphs.join("stale.csv"), "old").unwrap();

        prepare_output_dir(&graphs).unwrap();
        assert!(graphs.is_dir());
        assert!(!graphs.join("stale.csv").exists());
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let graphs = tmp.path().join("nested").join("graphs");
        prepare_output_dir(&graphs).unwrap();
        assert!(graphs.is_dir());
    }
}
