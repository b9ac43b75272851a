use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(
    comment: &Comment,
    viewer: &str,
    deleting: bool,
    available_width: u16,
  ) -> ListItem<'static> {
    let mut header = vec![
      Span::raw(BASE_INDENT),
      Span::styled(
        comment.user_name.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
      ),
      Span::raw("  "),
      Span::styled(
        format_timestamp(&comment.created_at),
        Style::default().fg(Color::DarkGray),
      ),
    ];

    if comment.is_owned_by(viewer) {
      header.push(Span::raw("  "));
      header.push(Span::styled(
        if deleting { DELETING_LABEL } else { DELETE_LABEL },
        Style::default().fg(Color::Red),
      ));
    }

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(BASE_INDENT.chars().count())
      .max(1);

    for line in wrap_text(&comment.content, wrap_width) {
      lines.push(Line::from(vec![Span::raw(BASE_INDENT), Span::raw(line)]));
    }

    lines.push(Line::default());

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let header = Line::from(vec![
      Span::styled(
        format!("Comments on post #{}", self.state.post_id()),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("  as {}", truncate(self.state.viewer(), 40)),
        Style::default().fg(Color::DarkGray),
      ),
    ]);

    frame.render_widget(Paragraph::new(header), layout[0]);

    let error = Paragraph::new(self.state.error().to_string())
      .style(Style::default().fg(Color::Red));

    frame.render_widget(error, layout[1]);

    self.draw_comments(frame, layout[2]);

    self.draw_draft(frame, layout[3]);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[4]);

    self.state.help().draw(frame);
  }

  fn draw_comments(&mut self, frame: &mut Frame, area: Rect) {
    let placeholder = |text: &'static str| {
      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(text, Style::default().fg(Color::DarkGray)),
      ]))]
    };

    let comments = self.state.comments();

    let (items, selected) = if self.state.is_loading() {
      (placeholder(LOADING_COMMENTS_STATUS), None)
    } else if comments.is_empty() {
      (placeholder(NO_COMMENTS_STATUS), None)
    } else {
      let items = comments
        .items()
        .iter()
        .map(|comment| {
          Self::comment_list_item(
            comment,
            self.state.viewer(),
            self.state.is_deleting(),
            area.width,
          )
        })
        .collect();

      (items, comments.selected_index())
    };

    let mut list_state = ListState::default()
      .with_selected(selected)
      .with_offset(comments.offset());

    let list = List::new(items).highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, area, &mut list_state);

    self.state.set_list_offset(list_state.offset());
  }

  fn draw_draft(&self, frame: &mut Frame, area: Rect) {
    let composing = self.state.mode() == Mode::Compose;

    let title = if self.state.is_submitting() {
      POSTING_TITLE
    } else {
      DRAFT_TITLE
    };

    let border_style = if composing {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let inner_width = usize::from(area.width.saturating_sub(3));

    let visible = tail(self.state.draft().text(), inner_width);

    let text = if self.state.draft().is_empty() && !composing {
      Span::styled(DRAFT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
      Span::raw(visible.to_string())
    };

    let draft = Paragraph::new(Line::from(text)).block(
      Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style),
    );

    frame.render_widget(draft, area);

    if composing && !self.state.help_is_visible() {
      let offset = u16::try_from(visible.chars().count()).unwrap_or(u16::MAX);

      frame.set_cursor_position(Position::new(
        area.x.saturating_add(1).saturating_add(offset),
        area.y.saturating_add(1),
      ));
    }
  }

  fn execute_effect(&self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    let event = async move {
      match effect {
        Effect::CreateComment { comment, post_id } => Event::CommentCreated {
          post_id,
          result: client.create_comment(post_id, &comment).await,
        },
        Effect::DeleteComment {
          comment_id,
          post_id,
        } => Event::CommentDeleted {
          comment_id,
          post_id,
          result: client.delete_comment(post_id, comment_id).await,
        },
        Effect::FetchComments {
          post_id,
          request_id,
        } => Event::Comments {
          request_id,
          result: client.list_comments(post_id).await,
        },
      }
    };

    self.handle.spawn(async move {
      let _ = sender.send(event.await);
    });
  }

  pub(crate) fn new(client: Client, post_id: u64, viewer: String) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(post_id, viewer),
    }
  }

  fn process_pending_events(&mut self) {
    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    for effect in self.state.mount() {
      self.execute_effect(effect);
    }

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(100))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        self.state.mode().handle_key(key)
      };

      let dispatch = self.state.dispatch_command(command);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use {super::*, ratatui::backend::TestBackend};

  fn rendered(author: &str, viewer: &str) -> String {
    let comment = Comment {
      content: "nice post".to_string(),
      created_at: "2024-01-01T09:30:00".to_string(),
      id: 1,
      post_id: Some(1),
      updated_at: None,
      user_name: author.to_string(),
    };

    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();

    terminal
      .draw(|frame| {
        let item = App::comment_list_item(&comment, viewer, false, 60);
        frame.render_widget(List::new(vec![item]), frame.area());
      })
      .unwrap();

    terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(ratatui::buffer::Cell::symbol)
      .collect()
  }

  #[test]
  fn delete_control_is_shown_on_own_comments() {
    let text = rendered("alice", "alice");

    assert!(text.contains("alice"));
    assert!(text.contains(DELETE_LABEL));
  }

  #[test]
  fn delete_control_is_hidden_on_other_comments() {
    let text = rendered("alice", "bob");

    assert!(text.contains("alice"));
    assert!(text.contains("nice post"));
    assert!(!text.contains(DELETE_LABEL));
  }
}
