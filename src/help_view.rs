use super::*;

const HELP_KEYS: &[(&str, &[(&str, &str)])] = &[
  (
    "Comments",
    &[
      ("↑ / k", "select previous comment"),
      ("↓ / j", "select next comment"),
      ("home / g", "jump to first comment"),
      ("end / G", "jump to last comment"),
      ("d / del", "delete the selected comment (yours only)"),
      ("r", "reload comments"),
      ("[ / ]", "previous / next post"),
      ("q / esc", "quit"),
      ("?", "toggle this help"),
    ],
  ),
  (
    "Writing",
    &[
      ("c / enter", "start writing a comment"),
      ("enter", "post the comment"),
      ("backspace", "delete the last character"),
      ("esc", "stop writing, keep the draft"),
    ],
  ),
  ("Deleting", &[("y", "confirm"), ("n / esc", "cancel")]),
];

pub(crate) struct HelpView {
  message_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let lines = Self::lines();

    let area = Self::help_area(frame.area(), &lines);

    frame.render_widget(Clear, area);

    let help = Paragraph::new(lines)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      _ => Command::None,
    }
  }

  fn help_area(area: Rect, lines: &[Line]) -> Rect {
    let width = lines.iter().map(Line::width).max().unwrap_or(0);

    let desired_width = u16::try_from(width.saturating_add(2)).unwrap_or(u16::MAX);
    let desired_height =
      u16::try_from(lines.len().saturating_add(2)).unwrap_or(u16::MAX);

    let width = desired_width.min(area.width.saturating_sub(2)).max(1);
    let height = desired_height.min(area.height.saturating_sub(2)).max(1);

    Rect::new(
      area.x + area.width.saturating_sub(width) / 2,
      area.y + area.height.saturating_sub(height) / 2,
      width.min(area.width),
      height.min(area.height),
    )
  }

  pub(crate) fn hide(&mut self, message: &mut String) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| BROWSE_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  fn lines() -> Vec<Line<'static>> {
    let key_width = HELP_KEYS
      .iter()
      .flat_map(|(_, keys)| keys.iter())
      .map(|(key, _)| key.chars().count())
      .max()
      .unwrap_or(0);

    let mut lines = Vec::new();

    for (index, (section, keys)) in HELP_KEYS.iter().enumerate() {
      if index > 0 {
        lines.push(Line::default());
      }

      lines.push(Line::from(Span::styled(
        format!("{section}:"),
        Style::default().add_modifier(Modifier::BOLD),
      )));

      for (key, description) in *keys {
        lines.push(Line::from(vec![
          Span::styled(
            format!("  {key:<key_width$}  "),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(*description),
        ]));
      }
    }

    lines
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(message.clone());

    *message = HELP_STATUS.into();

    self.visible = true;
  }
}
