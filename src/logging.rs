use {
  super::*,
  std::{fs::OpenOptions, sync::Mutex},
  tracing_subscriber::EnvFilter,
};

const FILE_FILTER: &str = "info";
const STDERR_FILTER: &str = "warn";

fn filter(default: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. With no log file, logs go to stderr only
/// when the terminal is not taken over by the comment view.
pub(crate) fn init(log_file: Option<&Path>, interactive: bool) -> Result {
  let result = match log_file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
          format!("could not open log file `{}`", path.display())
        })?;

      tracing_subscriber::fmt()
        .with_env_filter(filter(FILE_FILTER))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    }
    None if interactive => return Ok(()),
    None => tracing_subscriber::fmt()
      .with_env_filter(filter(STDERR_FILTER))
      .with_writer(io::stderr)
      .try_init(),
  };

  result.map_err(|error| anyhow!(error).context("could not initialize logging"))
}
