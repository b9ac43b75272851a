use super::*;

const CREATE_COMMENT_FAILED: &str = "Failed to create comment";
const CREATE_POST_FAILED: &str = "Failed to create post";
const DELETE_COMMENT_FAILED: &str = "Failed to delete comment";
const DELETE_POST_FAILED: &str = "Failed to delete post";
const LIKE_FAILED: &str = "Failed to like post";
const LIST_COMMENTS_FAILED: &str = "Failed to load comments";
const LIST_POSTS_FAILED: &str = "Failed to load posts";
const LOAD_POST_FAILED: &str = "Failed to load post";
const UNLIKE_FAILED: &str = "Failed to unlike post";
const UPDATE_POST_FAILED: &str = "Failed to update post";

#[derive(Clone)]
enum Backend {
  Http(HttpBackend),
  Mock(MockStore),
}

#[derive(Clone)]
struct HttpBackend {
  base_url: String,
  client: reqwest::Client,
}

impl HttpBackend {
  async fn execute(
    request: RequestBuilder,
    default_message: &str,
  ) -> ApiResult {
    Self::send(request, default_message).await?;
    Ok(())
  }

  async fn json<T>(
    request: RequestBuilder,
    default_message: &str,
  ) -> ApiResult<T>
  where
    T: DeserializeOwned,
  {
    Ok(Self::send(request, default_message).await?.json::<T>().await?)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let url = format!("{}{path}", self.base_url);

    debug!(%method, %url, "sending request");

    self.client.request(method, url)
  }

  async fn send(
    request: RequestBuilder,
    default_message: &str,
  ) -> ApiResult<Response> {
    let response = request.send().await.inspect_err(|error| {
      warn!(%error, "request failed");
    })?;

    if response.status().is_success() {
      return Ok(response);
    }

    let url = response.url().clone();

    let error = ApiError::from_response(response, default_message).await;

    warn!(%url, %error, "request rejected");

    Err(error)
  }
}

/// REST client for posts, comments and likes, backed either by the HTTP API
/// or by in-memory fixtures.
#[derive(Clone)]
pub(crate) struct Client {
  backend: Backend,
}

impl Client {
  pub(crate) async fn create_comment(
    &self,
    post_id: u64,
    comment: &NewComment,
  ) -> ApiResult<Comment> {
    match &self.backend {
      Backend::Http(http) => {
        let request = http
          .request(Method::POST, &format!("/posts/{post_id}/comments"))
          .json(comment);

        HttpBackend::json(request, CREATE_COMMENT_FAILED).await
      }
      Backend::Mock(store) => store.create_comment(post_id, comment),
    }
  }

  pub(crate) async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
    match &self.backend {
      Backend::Http(http) => {
        let request = http.request(Method::POST, "/posts").json(post);

        HttpBackend::json(request, CREATE_POST_FAILED).await
      }
      Backend::Mock(store) => store.create_post(post),
    }
  }

  pub(crate) async fn delete_comment(
    &self,
    post_id: u64,
    comment_id: u64,
  ) -> ApiResult {
    match &self.backend {
      Backend::Http(http) => {
        let request = http.request(
          Method::DELETE,
          &format!("/posts/{post_id}/comments/{comment_id}"),
        );

        HttpBackend::execute(request, DELETE_COMMENT_FAILED).await
      }
      Backend::Mock(store) => store.delete_comment(post_id, comment_id),
    }
  }

  pub(crate) async fn delete_post(&self, post_id: u64) -> ApiResult {
    match &self.backend {
      Backend::Http(http) => {
        let request = http.request(Method::DELETE, &format!("/posts/{post_id}"));

        HttpBackend::execute(request, DELETE_POST_FAILED).await
      }
      Backend::Mock(store) => store.delete_post(post_id),
    }
  }

  pub(crate) async fn get_post(&self, post_id: u64) -> ApiResult<Post> {
    match &self.backend {
      Backend::Http(http) => {
        let request = http.request(Method::GET, &format!("/posts/{post_id}"));

        HttpBackend::json(request, LOAD_POST_FAILED).await
      }
      Backend::Mock(store) => store.get_post(post_id),
    }
  }

  pub(crate) fn http(base_url: &str) -> Self {
    Self {
      backend: Backend::Http(HttpBackend {
        base_url: base_url.trim_end_matches('/').to_string(),
        client: reqwest::Client::new(),
      }),
    }
  }

  pub(crate) async fn like_post(
    &self,
    post_id: u64,
    like: &LikeRequest,
  ) -> ApiResult {
    match &self.backend {
      Backend::Http(http) => {
        let request = http
          .request(Method::POST, &format!("/posts/{post_id}/likes"))
          .json(like);

        HttpBackend::execute(request, LIKE_FAILED).await
      }
      Backend::Mock(store) => store.like_post(post_id, like),
    }
  }

  pub(crate) async fn list_comments(
    &self,
    post_id: u64,
  ) -> ApiResult<Vec<Comment>> {
    match &self.backend {
      Backend::Http(http) => {
        let request =
          http.request(Method::GET, &format!("/posts/{post_id}/comments"));

        HttpBackend::json(request, LIST_COMMENTS_FAILED).await
      }
      Backend::Mock(store) => store.list_comments(post_id),
    }
  }

  pub(crate) async fn list_posts(&self) -> ApiResult<Vec<Post>> {
    match &self.backend {
      Backend::Http(http) => {
        let request = http.request(Method::GET, "/posts");

        HttpBackend::json(request, LIST_POSTS_FAILED).await
      }
      Backend::Mock(store) => store.list_posts(),
    }
  }

  pub(crate) fn mock() -> Self {
    Self {
      backend: Backend::Mock(MockStore::default()),
    }
  }

  pub(crate) fn new(config: &Config) -> Self {
    match config.mode {
      ApiMode::Mock => Self::mock(),
      ApiMode::Real => Self::http(&config.api_url),
    }
  }

  pub(crate) async fn unlike_post(
    &self,
    post_id: u64,
    user_name: &str,
  ) -> ApiResult {
    match &self.backend {
      Backend::Http(http) => {
        let request = http
          .request(Method::DELETE, &format!("/posts/{post_id}/likes"))
          .query(&[("userName", user_name)]);

        HttpBackend::execute(request, UNLIKE_FAILED).await
      }
      Backend::Mock(store) => store.unlike_post(post_id, user_name),
    }
  }

  pub(crate) async fn update_post(
    &self,
    post_id: u64,
    update: &PostUpdate,
  ) -> ApiResult<Post> {
    match &self.backend {
      Backend::Http(http) => {
        let request = http
          .request(Method::PATCH, &format!("/posts/{post_id}"))
          .json(update);

        HttpBackend::json(request, UPDATE_POST_FAILED).await
      }
      Backend::Mock(store) => store.update_post(post_id, update),
    }
  }
}
