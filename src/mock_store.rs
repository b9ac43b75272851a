use {
  super::*,
  std::sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Debug)]
struct Fixtures {
  comments: Vec<Comment>,
  next_comment_id: u64,
  next_post_id: u64,
  posts: Vec<Post>,
}

/// In-memory stand-in for the REST backend.
#[derive(Clone, Debug)]
pub(crate) struct MockStore {
  fixtures: Arc<Mutex<Fixtures>>,
}

impl Default for MockStore {
  fn default() -> Self {
    let post = |id: u64, user_name: &str, content: &str, like_count: u64| {
      let created_at = format!("2024-01-0{id}T09:00:00");

      Post {
        comment_count: 0,
        content: content.to_string(),
        created_at: Some(created_at.clone()),
        extra: Map::new(),
        id,
        like_count,
        updated_at: Some(created_at),
        user_name: user_name.to_string(),
      }
    };

    let comment = |id: u64, post_id: u64, user_name: &str, content: &str| {
      let created_at = format!("2024-01-0{post_id}T1{id}:30:00");

      Comment {
        content: content.to_string(),
        created_at: created_at.clone(),
        id,
        post_id: Some(post_id),
        updated_at: Some(created_at),
        user_name: user_name.to_string(),
      }
    };

    let comments = vec![
      comment(1, 1, "bob", "Welcome aboard!"),
      comment(2, 1, "carol", "Looking forward to more posts."),
      comment(3, 2, "alice", "Thanks for reading."),
      comment(4, 3, "bob", "Great write-up."),
    ];

    let mut posts = vec![
      post(1, "alice", "Hello, world. This is my first post.", 2),
      post(2, "bob", "Notes from the weekend hike.", 5),
      post(3, "carol", "A short review of three terminal editors.", 0),
    ];

    for post in &mut posts {
      post.comment_count = comments
        .iter()
        .filter(|comment| comment.post_id == Some(post.id))
        .count() as u64;
    }

    Self {
      fixtures: Arc::new(Mutex::new(Fixtures {
        next_comment_id: comments.len() as u64 + 1,
        next_post_id: posts.len() as u64 + 1,
        comments,
        posts,
      })),
    }
  }
}

impl MockStore {
  pub(crate) fn create_comment(
    &self,
    post_id: u64,
    comment: &NewComment,
  ) -> ApiResult<Comment> {
    let mut fixtures = self.lock();

    let created_at = now();

    let comment = Comment {
      content: comment.content.clone(),
      created_at: created_at.clone(),
      id: fixtures.next_comment_id,
      post_id: Some(post_id),
      updated_at: Some(created_at),
      user_name: comment.user_name.clone(),
    };

    fixtures.next_comment_id += 1;
    fixtures.comments.push(comment.clone());

    if let Some(post) = fixtures.posts.iter_mut().find(|post| post.id == post_id)
    {
      post.comment_count += 1;
    }

    Ok(comment)
  }

  pub(crate) fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
    let mut fixtures = self.lock();

    let created_at = now();

    let post = Post {
      comment_count: 0,
      content: post.content.clone(),
      created_at: Some(created_at.clone()),
      extra: Map::new(),
      id: fixtures.next_post_id,
      like_count: 0,
      updated_at: Some(created_at),
      user_name: post.user_name.clone(),
    };

    fixtures.next_post_id += 1;
    fixtures.posts.push(post.clone());

    Ok(post)
  }

  #[allow(clippy::unused_self)]
  pub(crate) fn delete_comment(&self, post_id: u64, comment_id: u64) -> ApiResult {
    debug!(post_id, comment_id, "mock comment deletion is a no-op");
    Ok(())
  }

  pub(crate) fn delete_post(&self, post_id: u64) -> ApiResult {
    let mut fixtures = self.lock();

    let before = fixtures.posts.len();

    fixtures.posts.retain(|post| post.id != post_id);

    if fixtures.posts.len() == before {
      return Err(ApiError::not_found(format!("Post {post_id} not found")));
    }

    fixtures
      .comments
      .retain(|comment| comment.post_id != Some(post_id));

    Ok(())
  }

  pub(crate) fn get_post(&self, post_id: u64) -> ApiResult<Post> {
    self
      .lock()
      .posts
      .iter()
      .find(|post| post.id == post_id)
      .cloned()
      .ok_or_else(|| ApiError::not_found(format!("Post {post_id} not found")))
  }

  pub(crate) fn like_post(&self, post_id: u64, like: &LikeRequest) -> ApiResult {
    debug!(post_id, user_name = %like.user_name, "mock like");
    self.update_likes(post_id, |count| count.saturating_add(1))
  }

  pub(crate) fn list_comments(&self, post_id: u64) -> ApiResult<Vec<Comment>> {
    Ok(
      self
        .lock()
        .comments
        .iter()
        .filter(|comment| comment.post_id == Some(post_id))
        .cloned()
        .collect(),
    )
  }

  pub(crate) fn list_posts(&self) -> ApiResult<Vec<Post>> {
    Ok(self.lock().posts.clone())
  }

  fn lock(&self) -> MutexGuard<'_, Fixtures> {
    self.fixtures.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub(crate) fn unlike_post(&self, post_id: u64, user_name: &str) -> ApiResult {
    debug!(post_id, user_name, "mock unlike");
    self.update_likes(post_id, |count| count.saturating_sub(1))
  }

  fn update_likes(&self, post_id: u64, update: impl FnOnce(u64) -> u64) -> ApiResult {
    let mut fixtures = self.lock();

    let post = fixtures
      .posts
      .iter_mut()
      .find(|post| post.id == post_id)
      .ok_or_else(|| ApiError::not_found(format!("Post {post_id} not found")))?;

    post.like_count = update(post.like_count);

    Ok(())
  }

  pub(crate) fn update_post(
    &self,
    post_id: u64,
    update: &PostUpdate,
  ) -> ApiResult<Post> {
    let mut fixtures = self.lock();

    let post = fixtures
      .posts
      .iter_mut()
      .find(|post| post.id == post_id)
      .ok_or_else(|| ApiError::not_found(format!("Post {post_id} not found")))?;

    if let Some(content) = &update.content {
      post.content.clone_from(content);
    }

    post.updated_at = Some(now());

    Ok(post.clone())
  }
}

fn now() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
