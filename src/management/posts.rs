use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::store::{COLLECTION_POSTS, JsonStore, StoreError};
use crate::{types::Post, utils};

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("no posts found")]
    NoPosts,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Admin posts, newest first.
#[derive(Debug, Clone)]
pub struct PostManager {
    store: Arc<JsonStore>,
}

impl PostManager {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        self.store.load_collection(COLLECTION_POSTS).await
    }

    pub async fn add(&self, fields: Map<String, Value>) -> Result<Post, StoreError> {
        self.add_at(fields, Utc::now()).await
    }

    pub async fn add_at(
        &self,
        mut fields: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        // server-assigned fields win over anything the client sent
        fields.remove("id");
        fields.remove("time");

        let post = Post {
            id: Uuid::new_v4().to_string(),
            time: utils::format_post_time(now),
            fields,
        };

        let saved = post.clone();
        self.store
            .update_collection(COLLECTION_POSTS, |posts: &mut Vec<Post>| {
                posts.insert(0, saved);
                Ok::<_, StoreError>(())
            })
            .await?;

        Ok(post)
    }

    /// Removes every post with `id`. Deleting an unknown id is not an error,
    /// but a store that has never held posts is.
    pub async fn delete(&self, id: &str) -> Result<(), PostError> {
        let _guard = self.store.lock().await;
        let mut posts: Vec<Post> = self
            .store
            .load_existing(COLLECTION_POSTS)
            .await
            .ok()
            .flatten()
            .ok_or(PostError::NoPosts)?;

        posts.retain(|post| post.id != id);
        self.store.save_collection(COLLECTION_POSTS, &posts).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list().await?.len())
    }
}
