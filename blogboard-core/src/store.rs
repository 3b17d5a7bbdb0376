use anyhow::{anyhow, Result};
use std::sync::{Mutex, MutexGuard};

use crate::error::BlogError;
use crate::post::{Post, PostPayload};

/// The REST resource holding the posts.
pub trait PostStore {
    fn list_posts(&self) -> Result<Vec<Post>>;
    fn get_post(&self, id: &str) -> Result<Post>;
    fn create_post(&self, payload: &PostPayload) -> Result<()>;
    fn update_post(&self, id: &str, payload: &PostPayload) -> Result<()>;
    fn delete_post(&self, id: &str) -> Result<()>;
}

impl<S: PostStore + ?Sized> PostStore for &S {
    fn list_posts(&self) -> Result<Vec<Post>> {
        (**self).list_posts()
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        (**self).get_post(id)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<()> {
        (**self).create_post(payload)
    }

    fn update_post(&self, id: &str, payload: &PostPayload) -> Result<()> {
        (**self).update_post(id, payload)
    }

    fn delete_post(&self, id: &str) -> Result<()> {
        (**self).delete_post(id)
    }
}

impl<S: PostStore + ?Sized> PostStore for Box<S> {
    fn list_posts(&self) -> Result<Vec<Post>> {
        (**self).list_posts()
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        (**self).get_post(id)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<()> {
        (**self).create_post(payload)
    }

    fn update_post(&self, id: &str, payload: &PostPayload) -> Result<()> {
        (**self).update_post(id, payload)
    }

    fn delete_post(&self, id: &str) -> Result<()> {
        (**self).delete_post(id)
    }
}

/// In-process store with the same semantics as the REST resource.
/// Posts keep insertion order, like a json-server collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    fn posts(&self) -> Result<MutexGuard<'_, Vec<Post>>> {
        self.posts
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl PostStore for MemoryStore {
    fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts()?.clone())
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        self.posts()?
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| BlogError::NotFound(id.to_string()).into())
    }

    fn create_post(&self, payload: &PostPayload) -> Result<()> {
        let mut posts = self.posts()?;
        let id = payload
            .id
            .clone()
            .ok_or_else(|| anyhow!("cannot create a post without an id"))?;
        if posts.iter().any(|post| post.id == id) {
            return Err(BlogError::status("create post", 500).into());
        }
        posts.push(payload.clone().into_post(id));
        Ok(())
    }

    fn update_post(&self, id: &str, payload: &PostPayload) -> Result<()> {
        let mut posts = self.posts()?;
        let slot = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| BlogError::NotFound(id.to_string()))?;
        *slot = payload.clone().into_post(id.to_string());
        Ok(())
    }

    fn delete_post(&self, id: &str) -> Result<()> {
        let mut posts = self.posts()?;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(BlogError::NotFound(id.to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: Option<&str>, title: &str) -> PostPayload {
        PostPayload {
            id: id.map(str::to_string),
            title: title.into(),
            name: "n".into(),
            content: "c".into(),
            date: "2024-01-01".into(),
            profile_picture: String::new(),
            blog_images: vec![],
        }
    }

    #[test]
    fn crud_cycle() {
        let store = MemoryStore::new();
        store.create_post(&payload(Some("1"), "first")).unwrap();
        store.update_post("1", &payload(None, "renamed")).unwrap();
        assert_eq!(store.get_post("1").unwrap().title, "renamed");
        store.delete_post("1").unwrap();
        assert!(store.list_posts().unwrap().is_empty());
    }

    #[test]
    fn missing_posts_are_not_found() {
        let store = MemoryStore::new();
        let err = store.get_post("9").unwrap_err();
        assert_eq!(
            err.downcast_ref::<BlogError>(),
            Some(&BlogError::NotFound("9".into()))
        );
        assert!(store.delete_post("9").is_err());
        assert!(store.update_post("9", &payload(None, "x")).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = MemoryStore::new();
        store.create_post(&payload(Some("1"), "a")).unwrap();
        assert!(store.create_post(&payload(Some("1"), "b")).is_err());
    }
}
