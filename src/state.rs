use super::*;

/// The comment section for one post, as seen by one viewer.
///
/// Commands mutate local state and queue effects; the results of those effects
/// come back as events. The comment list is only ever a cache of what the
/// backend returned.
pub(crate) struct State {
  comments: ListView<Comment>,
  deleting: bool,
  draft: Draft,
  error: String,
  help: HelpView,
  loading: bool,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_fetch: Option<PendingFetch>,
  post_id: u64,
  submitting: bool,
  viewer: String,
}

impl State {
  fn cancel_delete(&mut self) {
    if matches!(self.mode, Mode::Confirm { .. }) {
      self.mode = Mode::Browse;
      self.set_status(BROWSE_STATUS);
    }
  }

  pub(crate) fn comments(&self) -> &ListView<Comment> {
    &self.comments
  }

  fn confirm_delete(&mut self) {
    let Mode::Confirm { comment_id } = self.mode else {
      return;
    };

    self.mode = Mode::Browse;
    self.set_status(BROWSE_STATUS);

    if self.deleting || self.loading {
      return;
    }

    self.deleting = true;
    self.error.clear();

    self.pending_effects.push(Effect::DeleteComment {
      comment_id,
      post_id: self.post_id,
    });
  }

  pub(crate) fn dispatch_command(&mut self, command: Command) -> CommandDispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::AppendToDraft(ch) => self.draft.push(ch),
      Command::CancelDelete => self.cancel_delete(),
      Command::ConfirmDelete => self.confirm_delete(),
      Command::DeleteFromDraft => self.draft.pop(),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::NextPost => self.set_post(self.post_id.saturating_add(1)),
      Command::None => {}
      Command::PreviousPost => {
        if self.post_id > 1 {
          self.set_post(self.post_id - 1);
        }
      }
      Command::Quit => should_exit = true,
      Command::Reload => self.load_comments(),
      Command::RequestDelete => self.request_delete(),
      Command::SelectFirst => self.comments.set_selected(0),
      Command::SelectLast => {
        self.comments.set_selected(self.comments.len().saturating_sub(1));
      }
      Command::SelectNext => self.comments.select_next(),
      Command::SelectPrevious => self.comments.select_previous(),
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::StartCompose => {
        self.mode = Mode::Compose;
        self.set_status(COMPOSE_STATUS);
      }
      Command::StopCompose => {
        self.mode = Mode::Browse;
        self.set_status(BROWSE_STATUS);
      }
      Command::SubmitDraft => self.submit_draft(),
    }

    CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  pub(crate) fn draft(&self) -> &Draft {
    &self.draft
  }

  pub(crate) fn error(&self) -> &str {
    &self.error
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::CommentCreated { post_id, result } => {
        self.submitting = false;

        if post_id != self.post_id {
          debug!(post_id, "dropping comment created for another post");
          return;
        }

        match result {
          Ok(comment) => {
            info!(post_id, comment_id = comment.id, "comment posted");
            self.comments.push(comment);
            self.draft.clear();
          }
          Err(error) => {
            warn!(post_id, %error, "could not post comment");
            self.error = SUBMIT_FAILED_ERROR.into();
          }
        }
      }
      Event::CommentDeleted {
        comment_id,
        post_id,
        result,
      } => {
        self.deleting = false;

        if post_id != self.post_id {
          debug!(post_id, comment_id, "dropping deletion for another post");
          return;
        }

        match result {
          Ok(()) => {
            info!(post_id, comment_id, "comment deleted");
            self.remove_comment(comment_id);
          }
          Err(error) => {
            warn!(post_id, comment_id, %error, "could not delete comment");

            self.error = DELETE_FAILED_ERROR.into();

            if error.is_not_found() {
              self.remove_comment(comment_id);
              self.error = ALREADY_DELETED_ERROR.into();
            }
          }
        }
      }
      Event::Comments { request_id, result } => {
        let Some(pending) = self.pending_fetch.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          debug!(request_id, "dropping stale comment fetch");
          return;
        }

        let Some(pending) = self.pending_fetch.take() else {
          return;
        };

        self.loading = false;

        match result {
          Ok(comments) => {
            debug!(
              post_id = pending.post_id,
              count = comments.len(),
              "comments loaded"
            );
            self.comments.replace(comments);
          }
          Err(error) => {
            warn!(post_id = pending.post_id, %error, "could not load comments");
            self.error = FETCH_FAILED_ERROR.into();
          }
        }
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn is_deleting(&self) -> bool {
    self.deleting
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  pub(crate) fn is_submitting(&self) -> bool {
    self.submitting
  }

  fn load_comments(&mut self) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    self.error.clear();
    self.loading = true;

    self.pending_fetch = Some(PendingFetch {
      post_id: self.post_id,
      request_id,
    });

    self.pending_effects.push(Effect::FetchComments {
      post_id: self.post_id,
      request_id,
    });
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> Mode {
    self.mode
  }

  /// Effects to run when the section first appears.
  pub(crate) fn mount(&mut self) -> Vec<Effect> {
    self.load_comments();
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn new(post_id: u64, viewer: String) -> Self {
    Self {
      comments: ListView::default(),
      deleting: false,
      draft: Draft::default(),
      error: String::new(),
      help: HelpView::new(),
      loading: false,
      message: BROWSE_STATUS.into(),
      mode: Mode::Browse,
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_fetch: None,
      post_id,
      submitting: false,
      viewer,
    }
  }

  pub(crate) fn post_id(&self) -> u64 {
    self.post_id
  }

  fn remove_comment(&mut self, comment_id: u64) {
    self.comments.retain(|comment| comment.id != comment_id);
  }

  fn request_delete(&mut self) {
    if self.deleting || self.loading {
      return;
    }

    let Some(comment) = self.comments.selected_item() else {
      return;
    };

    if !comment.is_owned_by(&self.viewer) {
      return;
    }

    self.mode = Mode::Confirm {
      comment_id: comment.id,
    };

    self.set_status(CONFIRM_STATUS);
  }

  pub(crate) fn set_list_offset(&mut self, offset: usize) {
    self.comments.set_offset(offset);
  }

  fn set_post(&mut self, post_id: u64) {
    if post_id == self.post_id {
      return;
    }

    info!(from = self.post_id, to = post_id, "switching post");

    self.post_id = post_id;
    self.comments.clear();

    if matches!(self.mode, Mode::Confirm { .. }) {
      self.mode = Mode::Browse;
      self.set_status(BROWSE_STATUS);
    }

    self.load_comments();
  }

  fn set_status(&mut self, status: &str) {
    if !self.help.is_visible() {
      self.message = status.into();
    }
  }

  fn submit_draft(&mut self) {
    if self.submitting || self.draft.is_blank() {
      return;
    }

    self.submitting = true;
    self.error.clear();

    self.pending_effects.push(Effect::CreateComment {
      comment: NewComment {
        content: self.draft.text().to_string(),
        user_name: self.viewer.clone(),
      },
      post_id: self.post_id,
    });
  }

  pub(crate) fn viewer(&self) -> &str {
    &self.viewer
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn comment(id: u64, user_name: &str, content: &str) -> Comment {
    Comment {
      content: content.to_string(),
      created_at: "2024-01-01T00:00:00".to_string(),
      id,
      post_id: Some(1),
      updated_at: None,
      user_name: user_name.to_string(),
    }
  }

  fn mounted(viewer: &str, comments: Vec<Comment>) -> State {
    let mut state = State::new(1, viewer.to_string());

    let effects = state.mount();

    let Some(Effect::FetchComments { request_id, .. }) = effects.first() else {
      panic!("mount should fetch comments");
    };

    state.handle_event(Event::Comments {
      request_id: *request_id,
      result: Ok(comments),
    });

    state
  }

  fn not_found() -> ApiError {
    ApiError::not_found("Comment not found")
  }

  fn server_error() -> ApiError {
    ApiError::Status {
      message: "boom".to_string(),
      status: 500,
      status_text: "Internal Server Error".to_string(),
    }
  }

  fn type_draft(state: &mut State, text: &str) {
    state.dispatch_command(Command::StartCompose);

    for ch in text.chars() {
      state.dispatch_command(Command::AppendToDraft(ch));
    }
  }

  fn ids(state: &State) -> Vec<u64> {
    state.comments().items().iter().map(|comment| comment.id).collect()
  }

  #[test]
  fn mount_fetches_comments_for_post() {
    let mut state = State::new(7, "alice".to_string());

    let effects = state.mount();

    assert_eq!(
      effects,
      vec![Effect::FetchComments {
        post_id: 7,
        request_id: 0,
      }]
    );

    assert!(state.is_loading());
  }

  #[test]
  fn fetch_populates_list_in_server_order() {
    let state = mounted(
      "alice",
      vec![comment(3, "bob", "b"), comment(1, "carol", "c")],
    );

    assert_eq!(ids(&state), vec![3, 1]);
    assert!(!state.is_loading());
    assert!(state.error().is_empty());
  }

  #[test]
  fn fetch_failure_clears_loading_and_sets_error() {
    let mut state = State::new(1, "alice".to_string());

    state.mount();

    state.handle_event(Event::Comments {
      request_id: 0,
      result: Err(server_error()),
    });

    assert!(!state.is_loading());
    assert_eq!(state.error(), FETCH_FAILED_ERROR);
    assert!(state.comments().is_empty());
  }

  #[test]
  fn stale_fetch_results_are_dropped() {
    let mut state = State::new(1, "alice".to_string());

    state.mount();

    let dispatch = state.dispatch_command(Command::Reload);

    assert_eq!(
      dispatch.effects,
      vec![Effect::FetchComments {
        post_id: 1,
        request_id: 1,
      }]
    );

    state.handle_event(Event::Comments {
      request_id: 1,
      result: Ok(vec![comment(2, "bob", "new")]),
    });

    state.handle_event(Event::Comments {
      request_id: 0,
      result: Ok(vec![comment(1, "bob", "old")]),
    });

    assert_eq!(ids(&state), vec![2]);
    assert!(!state.is_loading());
  }

  #[test]
  fn changing_post_refetches_and_clears_list() {
    let mut state = mounted("alice", vec![comment(1, "bob", "hi")]);

    let dispatch = state.dispatch_command(Command::NextPost);

    assert_eq!(
      dispatch.effects,
      vec![Effect::FetchComments {
        post_id: 2,
        request_id: 1,
      }]
    );

    assert_eq!(state.post_id(), 2);
    assert!(state.comments().is_empty());
    assert!(state.is_loading());
  }

  #[test]
  fn previous_post_stops_at_first_post() {
    let mut state = mounted("alice", Vec::new());

    let dispatch = state.dispatch_command(Command::PreviousPost);

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.post_id(), 1);
  }

  #[test]
  fn blank_draft_submits_nothing() {
    let mut state = mounted("alice", vec![comment(1, "bob", "hi")]);

    type_draft(&mut state, "   \t");

    let dispatch = state.dispatch_command(Command::SubmitDraft);

    assert!(dispatch.effects.is_empty());
    assert!(!state.is_submitting());
    assert_eq!(ids(&state), vec![1]);
    assert_eq!(state.draft().text(), "   \t");
  }

  #[test]
  fn submit_appends_server_comment_and_clears_draft() {
    let mut state = mounted("alice", vec![comment(1, "bob", "first")]);

    type_draft(&mut state, "hi");

    let dispatch = state.dispatch_command(Command::SubmitDraft);

    assert_eq!(
      dispatch.effects,
      vec![Effect::CreateComment {
        comment: NewComment {
          content: "hi".to_string(),
          user_name: "alice".to_string(),
        },
        post_id: 1,
      }]
    );

    assert!(state.is_submitting());

    let created = serde_json::from_str::<Comment>(
      r#"{"id": 5, "userName": "alice", "content": "hi", "createdAt": "2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    state.handle_event(Event::CommentCreated {
      post_id: 1,
      result: Ok(created.clone()),
    });

    assert_eq!(ids(&state), vec![1, 5]);
    assert_eq!(state.comments().items().last(), Some(&created));
    assert!(state.draft().is_empty());
    assert!(!state.is_submitting());
  }

  #[test]
  fn submit_is_ignored_while_in_flight() {
    let mut state = mounted("alice", Vec::new());

    type_draft(&mut state, "hi");

    assert_eq!(state.dispatch_command(Command::SubmitDraft).effects.len(), 1);
    assert!(state.dispatch_command(Command::SubmitDraft).effects.is_empty());
  }

  #[test]
  fn submit_failure_keeps_list_and_draft() {
    let mut state = mounted("alice", vec![comment(1, "bob", "first")]);

    type_draft(&mut state, "hi");

    state.dispatch_command(Command::SubmitDraft);

    state.handle_event(Event::CommentCreated {
      post_id: 1,
      result: Err(server_error()),
    });

    assert_eq!(ids(&state), vec![1]);
    assert_eq!(state.draft().text(), "hi");
    assert_eq!(state.error(), SUBMIT_FAILED_ERROR);
    assert!(!state.is_submitting());
  }

  #[test]
  fn declined_delete_does_nothing() {
    let mut state = mounted("alice", vec![comment(1, "alice", "mine")]);

    let dispatch = state.dispatch_command(Command::RequestDelete);

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.mode(), Mode::Confirm { comment_id: 1 });
    assert_eq!(state.message(), CONFIRM_STATUS);

    let dispatch = state.dispatch_command(Command::CancelDelete);

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.mode(), Mode::Browse);
    assert_eq!(ids(&state), vec![1]);
    assert!(!state.is_deleting());
  }

  #[test]
  fn confirmed_delete_removes_matching_comment() {
    let mut state = mounted(
      "alice",
      vec![
        comment(1, "alice", "one"),
        comment(2, "alice", "two"),
        comment(3, "bob", "three"),
      ],
    );

    state.dispatch_command(Command::SelectNext);
    state.dispatch_command(Command::RequestDelete);

    let dispatch = state.dispatch_command(Command::ConfirmDelete);

    assert_eq!(
      dispatch.effects,
      vec![Effect::DeleteComment {
        comment_id: 2,
        post_id: 1,
      }]
    );

    assert!(state.is_deleting());

    state.handle_event(Event::CommentDeleted {
      comment_id: 2,
      post_id: 1,
      result: Ok(()),
    });

    assert_eq!(ids(&state), vec![1, 3]);
    assert!(!state.is_deleting());
    assert!(state.error().is_empty());
  }

  #[test]
  fn not_found_delete_removes_comment_as_already_deleted() {
    let mut state =
      mounted("alice", vec![comment(1, "alice", "one"), comment(2, "bob", "x")]);

    state.dispatch_command(Command::RequestDelete);
    state.dispatch_command(Command::ConfirmDelete);

    state.handle_event(Event::CommentDeleted {
      comment_id: 1,
      post_id: 1,
      result: Err(not_found()),
    });

    assert_eq!(ids(&state), vec![2]);
    assert_eq!(state.error(), ALREADY_DELETED_ERROR);
  }

  #[test]
  fn failed_delete_keeps_comment() {
    let mut state = mounted("alice", vec![comment(1, "alice", "one")]);

    state.dispatch_command(Command::RequestDelete);
    state.dispatch_command(Command::ConfirmDelete);

    state.handle_event(Event::CommentDeleted {
      comment_id: 1,
      post_id: 1,
      result: Err(server_error()),
    });

    assert_eq!(ids(&state), vec![1]);
    assert_eq!(state.error(), DELETE_FAILED_ERROR);
  }

  #[tokio::test]
  async fn unreachable_server_keeps_comment() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .expect("bind test listener");

    let address = listener.local_addr().expect("listener address");

    drop(listener);

    let result = Client::http(&format!("http://{address}/api"))
      .delete_comment(1, 404)
      .await;

    let mut state = mounted("alice", vec![comment(404, "alice", "one")]);

    state.dispatch_command(Command::RequestDelete);
    state.dispatch_command(Command::ConfirmDelete);

    state.handle_event(Event::CommentDeleted {
      comment_id: 404,
      post_id: 1,
      result,
    });

    assert_eq!(ids(&state), vec![404]);
    assert_eq!(state.error(), DELETE_FAILED_ERROR);
    assert!(!state.is_deleting());
  }

  #[test]
  fn delete_is_unavailable_while_reloading() {
    let mut state = mounted("alice", vec![comment(1, "alice", "one")]);

    state.dispatch_command(Command::Reload);

    assert!(state.is_loading());

    state.dispatch_command(Command::RequestDelete);

    assert_eq!(state.mode(), Mode::Browse);

    let dispatch = state.dispatch_command(Command::ConfirmDelete);

    assert!(dispatch.effects.is_empty());
    assert!(!state.is_deleting());
  }

  #[test]
  fn delete_is_only_offered_to_the_author() {
    let mut state = mounted("bob", vec![comment(1, "alice", "hers")]);

    let dispatch = state.dispatch_command(Command::RequestDelete);

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.mode(), Mode::Browse);
  }

  #[test]
  fn new_attempt_clears_previous_error() {
    let mut state = mounted("alice", vec![comment(1, "alice", "one")]);

    type_draft(&mut state, "hi");
    state.dispatch_command(Command::SubmitDraft);
    state.handle_event(Event::CommentCreated {
      post_id: 1,
      result: Err(server_error()),
    });

    assert_eq!(state.error(), SUBMIT_FAILED_ERROR);

    state.dispatch_command(Command::StopCompose);
    state.dispatch_command(Command::RequestDelete);
    state.dispatch_command(Command::ConfirmDelete);

    assert!(state.error().is_empty());
  }

  #[test]
  fn results_for_previous_post_only_clear_flags() {
    let mut state = mounted("alice", vec![comment(1, "alice", "one")]);

    type_draft(&mut state, "hi");
    state.dispatch_command(Command::SubmitDraft);
    state.dispatch_command(Command::StopCompose);
    state.dispatch_command(Command::NextPost);

    state.handle_event(Event::CommentCreated {
      post_id: 1,
      result: Ok(comment(9, "alice", "hi")),
    });

    assert!(!state.is_submitting());
    assert!(state.comments().is_empty());
    assert_eq!(state.draft().text(), "hi");
  }

  #[test]
  fn help_preserves_status_line() {
    let mut state = mounted("alice", Vec::new());

    state.dispatch_command(Command::ShowHelp);
    assert!(state.help_is_visible());
    assert_eq!(state.message(), HELP_STATUS);

    state.dispatch_command(Command::HideHelp);
    assert_eq!(state.message(), BROWSE_STATUS);
  }

  #[test]
  fn quit_requests_exit() {
    let mut state = mounted("alice", Vec::new());

    assert!(state.dispatch_command(Command::Quit).should_exit);
  }
}
