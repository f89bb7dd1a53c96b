//! Posts and their editing operations.

use crate::media::{Media, MediaField};
use crate::serde_helpers::{self, null_as_default};
use crate::timestamp;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// How a post is published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum PostKind {
    /// One media item; only `media[0]` is published.
    #[default]
    #[display("single")]
    Single,
    /// Several media items published as one swipeable unit.
    #[display("carousel")]
    Carousel,
    /// A kind this tool does not know how to publish.
    #[display("{}", _0)]
    Other(String),
}

impl From<String> for PostKind {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            // Older project files used the media type as the post kind.
            "single" | "image" | "video" => Self::Single,
            "carousel" => Self::Carousel,
            _ => Self::Other(value),
        }
    }
}

impl From<PostKind> for String {
    fn from(value: PostKind) -> Self {
        value.to_string()
    }
}

/// Platform posting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PostOptions {
    /// Whether comments are allowed.
    #[serde(default = "default_true")]
    allow_comments: bool,
    /// Whether resharing is disabled.
    #[serde(default)]
    disable_reshare: bool,
    /// Audience label, `PUBLIC` by default.
    #[serde(default = "default_audience")]
    audience: String,
    /// Cross-post to the linked Facebook page.
    #[serde(default)]
    share_to_fb: bool,
}

fn default_true() -> bool {
    true
}

fn default_audience() -> String {
    "PUBLIC".to_string()
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            allow_comments: default_true(),
            disable_reshare: false,
            audience: default_audience(),
            share_to_fb: false,
        }
    }
}

impl PostOptions {
    /// Create options with every field given.
    pub fn new(
        allow_comments: bool,
        disable_reshare: bool,
        audience: impl Into<String>,
        share_to_fb: bool,
    ) -> Self {
        Self {
            allow_comments,
            disable_reshare,
            audience: audience.into(),
            share_to_fb,
        }
    }
}

/// Project-local bookkeeping that is never sent to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LocalData {
    /// Optional display name.
    #[serde(default, deserialize_with = "null_as_default")]
    post_name: String,
    /// Last modification time, naive UTC.
    #[serde(
        default = "timestamp::now",
        serialize_with = "timestamp::serialize",
        deserialize_with = "timestamp::deserialize"
    )]
    date_modified: NaiveDateTime,
    /// Free-form keywords, unique, in insertion order.
    #[serde(default, deserialize_with = "serde_helpers::keywords")]
    keywords: Vec<String>,
    /// Whether the post has been published. Never reset once set.
    #[serde(default, deserialize_with = "null_as_default")]
    has_posted: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            post_name: String::new(),
            date_modified: timestamp::now(),
            keywords: Vec::new(),
            has_posted: false,
        }
    }
}

/// An editable post-level field together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum PostMetaField {
    /// Display name
    PostName(String),
    /// Keywords; normalized on assignment
    Keywords(Vec<String>),
    /// Publishing kind
    Kind(PostKind),
    /// Informational schedule time
    ScheduledTime(Option<String>),
    /// Platform options
    Options(PostOptions),
    /// Mark the post as published
    MarkPosted,
}

/// One publishable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(from = "PostRecord")]
pub struct Post {
    /// Single or carousel.
    post_kind: PostKind,
    /// Top-level caption; authoritative for carousels.
    caption: String,
    /// Media in display order.
    media: Vec<Media>,
    /// Informational only, never enforced.
    scheduled_time: Option<String>,
    /// Platform options.
    post_options: PostOptions,
    /// Project-local bookkeeping.
    local_data: LocalData,
}

/// Wire shape accepted on load, including legacy fields.
#[derive(Deserialize)]
struct PostRecord {
    #[serde(default)]
    post_kind: Option<PostKind>,
    #[serde(rename = "type", default)]
    legacy_type: Option<PostKind>,
    #[serde(default, deserialize_with = "null_as_default")]
    caption: String,
    #[serde(default, deserialize_with = "null_as_default")]
    media: Vec<Media>,
    #[serde(default)]
    scheduled_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    post_options: PostOptions,
    #[serde(default, deserialize_with = "null_as_default")]
    local_data: LocalData,
    #[serde(default, deserialize_with = "null_as_default")]
    has_posted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    posted: bool,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        let mut local_data = record.local_data;
        // Legacy top-level flags fold into local_data.
        local_data.has_posted = local_data.has_posted || record.has_posted || record.posted;
        Self {
            post_kind: record.post_kind.or(record.legacy_type).unwrap_or_default(),
            caption: record.caption,
            media: record.media,
            scheduled_time: record.scheduled_time,
            post_options: record.post_options,
            local_data,
        }
    }
}

impl Default for Post {
    fn default() -> Self {
        Self {
            post_kind: PostKind::Single,
            caption: String::new(),
            media: Vec::new(),
            scheduled_time: None,
            post_options: PostOptions::default(),
            local_data: LocalData::default(),
        }
    }
}

impl Post {
    /// Create a post with the given kind and media.
    pub fn new(post_kind: PostKind, caption: impl Into<String>, media: Vec<Media>) -> Self {
        Self {
            post_kind,
            caption: caption.into(),
            media,
            ..Self::default()
        }
    }

    /// Create a single-media post from a local file.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::new(PostKind::Single, "", vec![Media::from_file(path)])
    }

    /// Whether the post has been published.
    pub fn is_posted(&self) -> bool {
        self.local_data.has_posted
    }

    /// Name shown in listings: the post name, or `Post {n}` from its 1-based position.
    pub fn display_name(&self, index: usize) -> String {
        if self.local_data.post_name.is_empty() {
            format!("Post {}", index + 1)
        } else {
            self.local_data.post_name.clone()
        }
    }

    /// Update `date_modified` to now.
    pub fn touch(&mut self) {
        self.local_data.date_modified = timestamp::now();
    }

    /// Replace the caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
        self.touch();
    }

    /// Append media built from local files.
    pub fn add_media_files<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) {
        let before = self.media.len();
        self.media.extend(paths.into_iter().map(Media::from_file));
        if self.media.len() != before {
            self.touch();
        }
    }

    /// Append already-built media items, keeping their order.
    pub fn append_media(&mut self, media: Vec<Media>) {
        if media.is_empty() {
            return;
        }
        self.media.extend(media);
        self.touch();
    }

    /// Move the media at `from` to `to`, clamping `to` into range.
    ///
    /// Returns the moved item's new index, which is where the selection
    /// should follow, or `None` when nothing moved (`from` out of range or
    /// the clamped target equal to `from`).
    #[instrument(skip(self), fields(media_count = self.media.len()))]
    pub fn move_media(&mut self, from: usize, to: usize) -> Option<usize> {
        if from >= self.media.len() {
            return None;
        }
        let to = to.min(self.media.len() - 1);
        if to == from {
            return None;
        }
        let item = self.media.remove(from);
        self.media.insert(to, item);
        self.touch();
        debug!(to, "Moved media");
        Some(to)
    }

    /// Remove the media at `index` and return the adjusted selection.
    ///
    /// Out-of-range indices leave the post untouched. When the selected item
    /// is removed the selection lands on the item that took its place
    /// (`min(index, len - 1)`); an empty post has no selection. A selection
    /// after the removed item shifts down by one so it keeps pointing at the
    /// same media, instead of keeping its raw position as older versions of
    /// the editor did.
    #[instrument(skip(self), fields(media_count = self.media.len()))]
    pub fn delete_media(&mut self, index: usize, selection: Option<usize>) -> Option<usize> {
        if index >= self.media.len() {
            return selection;
        }
        self.media.remove(index);
        self.touch();
        debug!("Deleted media");

        let len = self.media.len();
        match selection {
            _ if len == 0 => None,
            None => None,
            Some(selected) if selected == index => Some(index.min(len - 1)),
            Some(selected) if selected > index => Some((selected - 1).min(len - 1)),
            Some(selected) => Some(selected.min(len - 1)),
        }
    }

    /// Assign one field of the media at `index`.
    ///
    /// Returns `false` without touching anything when the index is invalid
    /// or the edit would leave the item with neither a file path nor a URL.
    pub fn update_media_field(&mut self, index: usize, field: MediaField) -> bool {
        self.update_media_fields(index, [field])
    }

    /// Assign several fields of the media at `index` as one edit.
    ///
    /// Either every field is applied or none is; same rules as
    /// [`Post::update_media_field`].
    pub fn update_media_fields(
        &mut self,
        index: usize,
        fields: impl IntoIterator<Item = MediaField>,
    ) -> bool {
        let Some(media) = self.media.get_mut(index) else {
            return false;
        };
        let mut edited = media.clone();
        for field in fields {
            edited.apply(field);
        }
        if !edited.has_source() {
            warn!(index, "Refusing media edit that leaves neither file path nor URL");
            return false;
        }
        *media = edited;
        self.touch();
        true
    }

    /// Assign one post-level metadata field.
    pub fn update_meta(&mut self, field: PostMetaField) {
        match field {
            PostMetaField::PostName(name) => self.local_data.post_name = name,
            PostMetaField::Keywords(keywords) => {
                self.local_data.keywords = serde_helpers::normalize_keywords(keywords)
            }
            PostMetaField::Kind(kind) => self.post_kind = kind,
            PostMetaField::ScheduledTime(time) => self.scheduled_time = time,
            PostMetaField::Options(options) => self.post_options = options,
            PostMetaField::MarkPosted => self.local_data.has_posted = true,
        }
        self.touch();
    }

    /// Record a successful publish.
    pub fn mark_posted(&mut self) {
        self.update_meta(PostMetaField::MarkPosted);
    }

    /// Move either the media at `selection` or, with no valid selection,
    /// every media item out of this post.
    pub(crate) fn take_media(&mut self, selection: Option<usize>) -> Vec<Media> {
        match selection {
            Some(selected) if selected < self.media.len() => vec![self.media.remove(selected)],
            _ => std::mem::take(&mut self.media),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaType;

    fn post_with(names: &[&str]) -> Post {
        let media = names
            .iter()
            .map(|name| Media::from_url(format!("https://cdn.example/{name}"), MediaType::Image))
            .collect();
        Post::new(PostKind::Carousel, "caption", media)
    }

    fn urls(post: &Post) -> Vec<String> {
        post.media()
            .iter()
            .map(|m| m.public_url().unwrap_or_default().rsplit('/').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn move_then_move_back_restores_order() {
        let original = post_with(&["a", "b", "c", "d"]);
        for from in 0..4 {
            for to in 0..4 {
                let mut post = original.clone();
                post.move_media(from, to);
                post.move_media(to, from);
                assert_eq!(urls(&post), urls(&original), "from {from} to {to}");
            }
        }
    }

    #[test]
    fn move_clamps_target_and_reports_new_index() {
        let mut post = post_with(&["a", "b", "c"]);
        assert_eq!(post.move_media(0, 99), Some(2));
        assert_eq!(urls(&post), vec!["b", "c", "a"]);
    }

    #[test]
    fn move_out_of_range_source_is_noop() {
        let mut post = post_with(&["a", "b"]);
        let before = post.local_data().date_modified().to_owned();
        assert_eq!(post.move_media(5, 0), None);
        assert_eq!(urls(&post), vec!["a", "b"]);
        assert_eq!(post.local_data().date_modified(), &before);
    }

    #[test]
    fn move_to_same_clamped_index_is_noop() {
        let mut post = post_with(&["a", "b"]);
        assert_eq!(post.move_media(1, 7), None);
        assert_eq!(urls(&post), vec!["a", "b"]);
    }

    #[test]
    fn repeated_delete_drains_without_panicking() {
        let mut post = post_with(&["a", "b", "c"]);
        let mut selection = Some(1);
        for _ in 0..5 {
            selection = post.delete_media(1, selection);
            selection = post.delete_media(0, selection);
        }
        assert!(post.media().is_empty());
        assert_eq!(selection, None);
    }

    #[test]
    fn deleting_selected_item_selects_its_successor() {
        let mut post = post_with(&["a", "b", "c"]);
        assert_eq!(post.delete_media(1, Some(1)), Some(1));
        assert_eq!(urls(&post), vec!["a", "c"]);
        assert_eq!(post.delete_media(1, Some(1)), Some(0));
        assert_eq!(post.delete_media(0, Some(0)), None);
    }

    #[test]
    fn selection_after_deleted_item_follows_it() {
        let mut post = post_with(&["a", "b", "c"]);
        assert_eq!(post.delete_media(0, Some(2)), Some(1));
        assert_eq!(post.delete_media(9, Some(1)), Some(1));
    }

    #[test]
    fn media_field_update_ignores_bad_index() {
        let mut post = post_with(&["a"]);
        assert!(!post.update_media_field(3, MediaField::AltText("x".to_string())));
        assert!(post.update_media_field(0, MediaField::AltText("sunset".to_string())));
        assert_eq!(post.media()[0].alt_text(), "sunset");
    }

    #[test]
    fn keywords_are_normalized_on_assignment() {
        let mut post = Post::default();
        post.update_meta(PostMetaField::Keywords(vec![
            " a ".to_string(),
            "b".to_string(),
            "a".to_string(),
        ]));
        assert_eq!(post.local_data().keywords(), &vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn legacy_kinds_load_as_single() {
        for kind in ["image", "VIDEO", "single"] {
            assert_eq!(PostKind::from(kind.to_string()), PostKind::Single);
        }
        assert_eq!(
            PostKind::from("reel".to_string()),
            PostKind::Other("reel".to_string())
        );
    }

    #[test]
    fn legacy_top_level_posted_flags_are_or_merged() {
        let json = r#"{"type": "carousel", "caption": "hi", "media": [], "has_posted": true,
                       "local_data": {"has_posted": false, "keywords": "a, b"}}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_posted());
        assert_eq!(post.post_kind(), &PostKind::Carousel);
        assert_eq!(post.local_data().keywords().len(), 2);

        let json = r#"{"caption": "hi", "posted": true}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_posted());

        let json = r#"{"caption": "hi", "local_data": {"has_posted": true}}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_posted());
    }

    #[test]
    fn display_name_falls_back_to_position() {
        let mut post = Post::default();
        assert_eq!(post.display_name(0), "Post 1");
        post.update_meta(PostMetaField::PostName("Beach day".to_string()));
        assert_eq!(post.display_name(0), "Beach day");
    }
}
