use super::*;

#[derive(Debug, Parser)]
#[command(version, about = "Read and write comments on blog posts")]
pub(crate) struct Arguments {
  #[arg(
    long,
    env = "BLOG_API_URL",
    default_value = DEFAULT_API_URL,
    help = "Base URL of the REST API, including the `/api` prefix"
  )]
  api_url: String,
  #[arg(long, env = "BLOG_LOG_FILE", help = "Append logs to this file")]
  log_file: Option<PathBuf>,
  #[arg(
    long,
    env = "BLOG_MOCK",
    help = "Serve every request from built-in fixtures instead of the API"
  )]
  mock: bool,
  #[command(subcommand)]
  subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn config(&self) -> Config {
    Config::new(self.api_url.clone(), self.mock)
  }

  pub(crate) async fn run(self) -> Result {
    logging::init(self.log_file.as_deref(), self.subcommand.is_interactive())?;

    let config = self.config();

    info!(api_url = %config.api_url, mode = ?config.mode, "starting");

    self.subcommand.run(Client::new(&config)).await
  }
}
