#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiMode {
  Mock,
  Real,
}

/// Client configuration, resolved once at startup.
#[derive(Clone, Debug)]
pub(crate) struct Config {
  pub(crate) api_url: String,
  pub(crate) mode: ApiMode,
}

impl Config {
  pub(crate) fn new(api_url: String, mock: bool) -> Self {
    Self {
      api_url,
      mode: if mock { ApiMode::Mock } else { ApiMode::Real },
    }
  }
}
