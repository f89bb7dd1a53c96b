//! The ordered post collection and its cross-post operations.

use crate::media::MediaField;
use crate::post::{Post, PostMetaField};
use postprep_error::{JsonError, PostprepResult};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Ordered sequence of posts. Order defines "previous" for merges and is
/// preserved across load and save.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Project {
    posts: Vec<Post>,
}

impl Project {
    /// Create a project from posts.
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Parse a project file body.
    ///
    /// ```
    /// use postprep_core::Project;
    ///
    /// let project = Project::from_json(r#"{"caption": "solo", "media": []}"#).unwrap();
    /// assert_eq!(project.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> PostprepResult<Self> {
        // A project file holds either an array of posts or one bare post.
        let posts = match json.trim_start().chars().next() {
            Some('[') => serde_json::from_str::<Vec<Post>>(json),
            Some('{') => serde_json::from_str::<Post>(json).map(|post| vec![post]),
            _ => {
                return Err(JsonError::new(
                    "Failed to parse project: expected a post object or an array of posts",
                )
                .into());
            }
        }
        .map_err(|e| JsonError::new(format!("Failed to parse project: {}", e)))?;
        Ok(Self { posts })
    }

    /// Serialize as a pretty-printed array of posts.
    pub fn to_json(&self) -> PostprepResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize project: {}", e)).into())
    }

    /// All posts, in order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Post at `index`.
    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    /// Mutable post at `index`.
    pub fn post_mut(&mut self, index: usize) -> Option<&mut Post> {
        self.posts.get_mut(index)
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the project has no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Append a post and return its index.
    pub fn push(&mut self, post: Post) -> usize {
        self.posts.push(post);
        self.posts.len() - 1
    }

    /// Append posts and return the index of the first new one.
    pub fn extend(&mut self, posts: impl IntoIterator<Item = Post>) -> Option<usize> {
        let first = self.posts.len();
        self.posts.extend(posts);
        (self.posts.len() > first).then_some(first)
    }

    /// Remove the post at `index`; out of range is a no-op.
    #[instrument(skip(self), fields(post_count = self.posts.len()))]
    pub fn delete_post(&mut self, index: usize) -> Option<Post> {
        if index >= self.posts.len() {
            return None;
        }
        let removed = self.posts.remove(index);
        info!("Deleted post");
        Some(removed)
    }

    /// The post to show after the post at `index` was removed.
    pub fn index_after_removal(&self, index: usize) -> Option<usize> {
        if self.posts.is_empty() {
            None
        } else {
            Some(index.saturating_sub(1).min(self.posts.len() - 1))
        }
    }

    /// Merge the post at `index` into the post before it.
    ///
    /// Moves the selected media item, or every item when nothing valid is
    /// selected, to the end of the previous post and discards the source
    /// post. Returns the destination index, or `None` when nothing happened
    /// (first post, out of range, or no media).
    pub fn merge_left(&mut self, index: usize, selection: Option<usize>) -> Option<usize> {
        if index == 0 {
            return None;
        }
        self.merge_media(index, index - 1, selection)
    }

    /// Merge the post at `index` into the post at `target`.
    ///
    /// Same selection rule as [`Project::merge_left`]. The returned index is
    /// the target's position after the source has been removed.
    pub fn merge_into(
        &mut self,
        index: usize,
        target: usize,
        selection: Option<usize>,
    ) -> Option<usize> {
        self.merge_media(index, target, selection)
    }

    #[instrument(skip(self), fields(post_count = self.posts.len()))]
    fn merge_media(
        &mut self,
        source: usize,
        target: usize,
        selection: Option<usize>,
    ) -> Option<usize> {
        let len = self.posts.len();
        if source == target || source >= len || target >= len {
            return None;
        }
        if self.posts[source].media().is_empty() {
            debug!("Source post has no media, nothing to merge");
            return None;
        }

        let moved = self.posts[source].take_media(selection);
        let moved_count = moved.len();
        self.posts[target].append_media(moved);

        let removed = self.posts.remove(source);
        if !removed.media().is_empty() {
            warn!(
                discarded = removed.media().len(),
                "Merged source post still had media; discarding it with the post"
            );
        }

        let target = if source < target { target - 1 } else { target };
        info!(moved = moved_count, target, "Merged post");
        Some(target)
    }

    /// Replace the caption of the current post; no current post is a no-op.
    pub fn set_caption(&mut self, current: Option<usize>, caption: impl Into<String>) -> bool {
        match current.and_then(|index| self.posts.get_mut(index)) {
            Some(post) => {
                post.set_caption(caption);
                true
            }
            None => false,
        }
    }

    /// Assign a media field on the current post; no current post or media is a no-op.
    pub fn update_media_field(
        &mut self,
        current: Option<usize>,
        media_index: usize,
        field: MediaField,
    ) -> bool {
        current
            .and_then(|index| self.posts.get_mut(index))
            .map(|post| post.update_media_field(media_index, field))
            .unwrap_or(false)
    }

    /// Assign a metadata field on the current post; no current post is a no-op.
    pub fn update_post_meta(&mut self, current: Option<usize>, field: PostMetaField) -> bool {
        match current.and_then(|index| self.posts.get_mut(index)) {
            Some(post) => {
                post.update_meta(field);
                true
            }
            None => false,
        }
    }

    /// Pick any post uniformly at random.
    pub fn random_post<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.posts.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.posts.len()))
        }
    }

    /// Pick a not-yet-published post uniformly at random.
    pub fn random_unposted_post<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let unposted: Vec<usize> = self
            .posts
            .iter()
            .enumerate()
            .filter(|(_, post)| !post.is_posted())
            .map(|(index, _)| index)
            .collect();
        unposted.choose(rng).copied()
    }
}
