#[derive(Debug, Default)]
pub(crate) struct Draft {
  buffer: String,
}

impl Draft {
  pub(crate) fn clear(&mut self) {
    self.buffer.clear();
  }

  pub(crate) fn is_blank(&self) -> bool {
    self.buffer.trim().is_empty()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub(crate) fn pop(&mut self) {
    self.buffer.pop();
  }

  pub(crate) fn push(&mut self, ch: char) {
    self.buffer.push(ch);
  }

  pub(crate) fn text(&self) -> &str {
    &self.buffer
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn whitespace_only_draft_is_blank() {
    let mut draft = Draft::default();
    assert!(draft.is_blank());

    for ch in " \t ".chars() {
      draft.push(ch);
    }

    assert!(draft.is_blank());
    assert!(!draft.is_empty());

    draft.push('x');
    assert!(!draft.is_blank());
  }

  #[test]
  fn pop_removes_last_character() {
    let mut draft = Draft::default();

    for ch in "héllo".chars() {
      draft.push(ch);
    }

    draft.pop();
    draft.pop();
    draft.pop();
    draft.pop();

    assert_eq!(draft.text(), "h");

    draft.pop();
    draft.pop();

    assert!(draft.is_empty());
  }
}
