pub(crate) struct ListView<T> {
  items: Vec<T>,
  offset: usize,
  selected: usize,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      offset: 0,
      selected: 0,
    }
  }
}

impl<T> ListView<T> {
  fn clamp(&mut self) {
    let selected = self.selected;
    let offset = self.offset;

    self.set_selected(selected);
    self.set_offset(offset);
  }

  pub(crate) fn clear(&mut self) {
    self.replace(Vec::new());
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn offset(&self) -> usize {
    let selected = self.selected_index().unwrap_or(0);

    if self.items.is_empty() {
      0
    } else {
      self.offset.min(selected)
    }
  }

  pub(crate) fn push(&mut self, item: T) {
    self.items.push(item);
  }

  /// Swaps in a new set of items, resetting selection to the top.
  pub(crate) fn replace(&mut self, items: Vec<T>) {
    self.items = items;
    self.offset = 0;
    self.selected = 0;
  }

  /// Keeps the selection on the same position, pulling it back if the tail
  /// was removed.
  pub(crate) fn retain<F>(&mut self, keep: F)
  where
    F: FnMut(&T) -> bool,
  {
    self.items.retain(keep);
    self.clamp();
  }

  pub(crate) fn select_next(&mut self) {
    self.set_selected(self.selected.saturating_add(1));
  }

  pub(crate) fn select_previous(&mut self) {
    self.set_selected(self.selected.saturating_sub(1));
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.items.is_empty() {
      None
    } else {
      Some(self.selected.min(self.items.len().saturating_sub(1)))
    }
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self
      .selected_index()
      .and_then(|index| self.items.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.items.is_empty() {
      self.offset = 0;
    } else {
      let max_offset = self.items.len().saturating_sub(1);
      self.offset = offset.min(max_offset);
    }
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    if self.items.is_empty() {
      self.selected = 0;
    } else {
      self.selected = index.min(self.items.len().saturating_sub(1));
    }
  }
}
