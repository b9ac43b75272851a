use super::*;

pub(crate) enum Event {
  CommentCreated {
    post_id: u64,
    result: ApiResult<Comment>,
  },
  CommentDeleted {
    comment_id: u64,
    post_id: u64,
    result: ApiResult,
  },
  Comments {
    request_id: u64,
    result: ApiResult<Vec<Comment>>,
  },
}
