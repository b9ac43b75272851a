use {
  anyhow::{Context, anyhow},
  api_error::{ApiError, ApiResult},
  app::App,
  arguments::Arguments,
  chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc},
  clap::Parser,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, NewComment},
  config::{ApiMode, Config},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  draft::Draft,
  effect::Effect,
  event::Event,
  help_view::HelpView,
  like::LikeRequest,
  list_view::ListView,
  mock_store::MockStore,
  mode::Mode,
  pending_fetch::PendingFetch,
  post::{NewPost, Post, PostUpdate},
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  reqwest::{Method, RequestBuilder, Response, StatusCode},
  serde::{Deserialize, Serialize, de::DeserializeOwned},
  serde_json::{Map, Value},
  state::State,
  std::{
    backtrace::BacktraceStatus,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    time::Duration,
  },
  subcommand::Subcommand,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  utils::{format_timestamp, tail, truncate, wrap_text},
};

mod api_error;
mod app;
mod arguments;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod config;
mod draft;
mod effect;
mod event;
mod help_view;
mod like;
mod list_view;
mod logging;
mod mock_store;
mod mode;
mod pending_fetch;
mod post;
mod state;
mod subcommand;
mod utils;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const BROWSE_STATUS: &str = "↑/k up • ↓/j down • c comment • d delete • r reload • [/] prev/next post • q quit • ? help";

const COMPOSE_STATUS: &str =
  "type your comment • enter post • backspace erase • esc stop writing";

const CONFIRM_STATUS: &str = "Delete this comment? y yes • n/esc no";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const NO_COMMENTS_STATUS: &str = "No comments yet.";

const FETCH_FAILED_ERROR: &str = "Failed to load comments.";
const SUBMIT_FAILED_ERROR: &str = "Failed to post comment.";
const DELETE_FAILED_ERROR: &str = "Failed to delete comment. Please try again.";
const ALREADY_DELETED_ERROR: &str =
  "This comment was already deleted or does not exist.";

const DELETE_LABEL: &str = "[d] delete";
const DELETING_LABEL: &str = "deleting...";

const DRAFT_TITLE: &str = "Comment";
const DRAFT_PLACEHOLDER: &str = "Write a comment... (press c)";
const POSTING_TITLE: &str = "Posting...";

const BASE_INDENT: &str = " ";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

fn run_comment_section(client: Client, post_id: u64, viewer: String) -> Result {
  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, post_id, viewer);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = Arguments::parse().run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
