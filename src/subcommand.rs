use super::*;

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Subcommand {
  #[command(about = "Browse and write comments on a post")]
  Comments {
    post_id: u64,
    #[arg(long, help = "Name shown on your comments")]
    user: String,
  },
  #[command(about = "Publish a new post")]
  CreatePost {
    content: String,
    #[arg(long)]
    user: String,
  },
  #[command(about = "Delete a post")]
  DeletePost { post_id: u64 },
  #[command(about = "Like a post")]
  Like {
    post_id: u64,
    #[arg(long)]
    user: String,
  },
  #[command(about = "Show a single post")]
  Post { post_id: u64 },
  #[command(about = "List all posts")]
  Posts,
  #[command(about = "Remove your like from a post")]
  Unlike {
    post_id: u64,
    #[arg(long)]
    user: String,
  },
  #[command(about = "Replace the content of a post")]
  UpdatePost { post_id: u64, content: String },
}

impl Subcommand {
  pub(crate) fn is_interactive(&self) -> bool {
    matches!(self, Self::Comments { .. })
  }

  pub(crate) async fn run(self, client: Client) -> Result {
    match self {
      Self::Comments { post_id, user } => {
        run_comment_section(client, post_id, user)
      }
      Self::CreatePost { content, user } => print_json(
        &client
          .create_post(&NewPost {
            content,
            user_name: user,
          })
          .await
          .context("could not create post")?,
      ),
      Self::DeletePost { post_id } => {
        client
          .delete_post(post_id)
          .await
          .with_context(|| format!("could not delete post {post_id}"))?;

        println!("deleted post {post_id}");

        Ok(())
      }
      Self::Like { post_id, user } => {
        client
          .like_post(post_id, &LikeRequest { user_name: user })
          .await
          .with_context(|| format!("could not like post {post_id}"))?;

        println!("liked post {post_id}");

        Ok(())
      }
      Self::Post { post_id } => print_json(
        &client
          .get_post(post_id)
          .await
          .with_context(|| format!("could not load post {post_id}"))?,
      ),
      Self::Posts => print_json(
        &client.list_posts().await.context("could not load posts")?,
      ),
      Self::Unlike { post_id, user } => {
        client
          .unlike_post(post_id, &user)
          .await
          .with_context(|| format!("could not unlike post {post_id}"))?;

        println!("unliked post {post_id}");

        Ok(())
      }
      Self::UpdatePost { post_id, content } => print_json(
        &client
          .update_post(
            post_id,
            &PostUpdate {
              content: Some(content),
            },
          )
          .await
          .with_context(|| format!("could not update post {post_id}"))?,
      ),
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> Result {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
