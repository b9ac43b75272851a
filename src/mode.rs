use super::*;

/// Where key presses go: the comment list, the draft editor, or a pending
/// delete confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
  Browse,
  Compose,
  Confirm { comment_id: u64 },
}

impl Mode {
  pub(crate) fn handle_key(self, key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match self {
      Mode::Browse => match key.code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::Quit
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
        KeyCode::Home | KeyCode::Char('g') => Command::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => Command::SelectLast,
        KeyCode::Enter | KeyCode::Char('c' | 'i') => Command::StartCompose,
        KeyCode::Delete | KeyCode::Char('d') => Command::RequestDelete,
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Char('[') => Command::PreviousPost,
        KeyCode::Char(']') => Command::NextPost,
        _ => Command::None,
      },
      Mode::Compose => match key.code {
        KeyCode::Esc => Command::StopCompose,
        KeyCode::Enter => Command::SubmitDraft,
        KeyCode::Backspace => Command::DeleteFromDraft,
        KeyCode::Char(ch)
          if !modifiers.intersects(
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER,
          ) =>
        {
          Command::AppendToDraft(ch)
        }
        _ => Command::None,
      },
      Mode::Confirm { .. } => match key.code {
        KeyCode::Char('y' | 'Y') => Command::ConfirmDelete,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Command::CancelDelete,
        _ => Command::None,
      },
    }
  }
}
