pub(crate) struct PendingFetch {
  pub(crate) post_id: u64,
  pub(crate) request_id: u64,
}
