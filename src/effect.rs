use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  CreateComment {
    comment: NewComment,
    post_id: u64,
  },
  DeleteComment {
    comment_id: u64,
    post_id: u64,
  },
  FetchComments {
    post_id: u64,
    request_id: u64,
  },
}
