use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
  #[serde(default)]
  pub(crate) comment_count: u64,
  #[serde(default)]
  pub(crate) content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub(crate) created_at: Option<String>,
  #[serde(flatten)]
  pub(crate) extra: Map<String, Value>,
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) like_count: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub(crate) updated_at: Option<String>,
  #[serde(default)]
  pub(crate) user_name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPost {
  pub(crate) content: String,
  pub(crate) user_name: String,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub(crate) content: Option<String>,
}
