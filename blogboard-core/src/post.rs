use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A blog post as stored by the REST resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default, deserialize_with = "lenient_image_list")]
    pub blog_images: Vec<String>,
}

impl Post {
    /// Profile picture path, if one is set and not blank.
    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    fn numeric_id(&self) -> Option<u128> {
        self.id.trim().parse().ok()
    }
}

/// Request body for create and update calls.
///
/// `id` is only sent on create; updates address the post through the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub name: String,
    pub content: String,
    pub date: String,
    pub profile_picture: String,
    pub blog_images: Vec<String>,
}

impl PostPayload {
    /// Materialise the stored record for `id`.
    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            title: self.title,
            name: self.name,
            content: self.content,
            date: Some(self.date),
            profile_picture: Some(self.profile_picture),
            blog_images: self.blog_images,
        }
    }
}

/// One plus the largest numeric id, or "1" for an empty (or all non-numeric) list.
///
/// Ids parse as `u128`; an id that cannot be incremented is skipped.
pub fn next_post_id(posts: &[Post]) -> String {
    posts
        .iter()
        .filter_map(|post| post.numeric_id()?.checked_add(1))
        .max()
        .unwrap_or(1)
        .to_string()
}

/// Case-insensitive match of `query` against title, author and content.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    let query = query.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&query)
                || post.name.to_lowercase().contains(&query)
                || post.content.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected post id as string or number, got {}",
            other
        ))),
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Anything other than an array decodes as "no images".
fn lenient_image_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let images = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(path) => Some(path),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(images)
}
