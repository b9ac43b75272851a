use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
  pub(crate) content: String,
  #[serde(default)]
  pub(crate) created_at: String,
  pub(crate) id: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub(crate) post_id: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub(crate) updated_at: Option<String>,
  pub(crate) user_name: String,
}

impl Comment {
  pub(crate) fn is_owned_by(&self, viewer: &str) -> bool {
    self.user_name == viewer
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewComment {
  pub(crate) content: String,
  pub(crate) user_name: String,
}
