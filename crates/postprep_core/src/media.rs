//! Media items attached to a post.

use crate::serde_helpers::{null_as_default, optional_id};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extensions recognized as importable media (lowercase, no dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "mp4", "mov", "webm"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

/// Kind of media item.
///
/// Unknown strings are preserved as [`MediaType::Other`] so a project file
/// survives a load/save cycle; the publisher refuses to upload them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    /// Still image
    #[default]
    #[display("image")]
    Image,
    /// Video clip
    #[display("video")]
    Video,
    /// Anything else found in a project file
    #[display("{}", _0)]
    Other(String),
}

impl MediaType {
    /// Guess the media type from a file extension.
    ///
    /// ```
    /// use postprep_core::MediaType;
    ///
    /// assert_eq!(MediaType::from_path("clip.MOV"), MediaType::Video);
    /// assert_eq!(MediaType::from_path("photo.jpeg"), MediaType::Image);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_video = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_video { Self::Video } else { Self::Image }
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.to_string()
    }
}

/// A user tag placed on an image, at relative coordinates in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(from = "UserTagRecord")]
pub struct UserTag {
    /// Platform user id of the tagged account.
    user_id: String,
    /// Horizontal position, 0 is the left edge.
    x: f64,
    /// Vertical position, 0 is the top edge.
    y: f64,
}

impl UserTag {
    /// Create a tag, clamping the coordinates into `[0, 1]`.
    pub fn new(user_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            user_id: user_id.into(),
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

/// Wire shape of a tag; older files wrote `username`, numeric ids are common.
#[derive(Deserialize)]
struct UserTagRecord {
    #[serde(default, deserialize_with = "optional_id")]
    user_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    username: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    y: f64,
}

impl From<UserTagRecord> for UserTag {
    fn from(record: UserTagRecord) -> Self {
        let user_id = record.user_id.or(record.username).unwrap_or_default();
        Self::new(user_id, record.x, record.y)
    }
}

/// Location attached to a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Location {
    /// Platform location (page) id; numeric ids load as strings.
    #[serde(default, deserialize_with = "optional_id")]
    id: Option<String>,
    /// Human readable name.
    #[serde(default)]
    name: Option<String>,
}

impl Location {
    /// Create a location.
    pub fn new(id: Option<String>, name: Option<String>) -> Self {
        Self { id, name }
    }
}

/// One image or video attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(from = "MediaRecord")]
pub struct Media {
    /// Local source file, relocated to the archive after publishing.
    file_path: Option<String>,
    /// Public URL the platform fetches the media from.
    #[serde(rename = "URL")]
    url: Option<String>,
    /// Image or video.
    #[serde(rename = "type")]
    media_type: MediaType,
    /// Per-item caption override.
    description: String,
    /// Accessibility text.
    alt_text: String,
    /// Tagged users, in order.
    user_tags: Vec<UserTag>,
    /// Location, both parts optional.
    location: Location,
}

/// Wire shape accepted on load.
///
/// Older files spelled the keys `file` and `url`, sometimes next to the
/// canonical `file_path` and `URL`; the canonical key wins when both are set.
#[derive(Deserialize)]
struct MediaRecord {
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    file: Option<String>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "url", default)]
    legacy_url: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    media_type: MediaType,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    alt_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    user_tags: Vec<UserTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    location: Location,
}

fn prefer_set(canonical: Option<String>, legacy: Option<String>) -> Option<String> {
    match canonical {
        Some(value) if !value.trim().is_empty() => Some(value),
        canonical => legacy.or(canonical),
    }
}

impl From<MediaRecord> for Media {
    fn from(record: MediaRecord) -> Self {
        Self {
            file_path: prefer_set(record.file_path, record.file),
            url: prefer_set(record.url, record.legacy_url),
            media_type: record.media_type,
            description: record.description,
            alt_text: record.alt_text,
            user_tags: record.user_tags,
            location: record.location,
        }
    }
}

impl Media {
    /// Build a media item from a local file; the type comes from the extension.
    ///
    /// Backslashes are normalized to forward slashes so project files stay
    /// portable.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file_path: Some(path.to_string_lossy().replace('\\', "/")),
            url: None,
            media_type: MediaType::from_path(path),
            description: String::new(),
            alt_text: String::new(),
            user_tags: Vec::new(),
            location: Location::default(),
        }
    }

    /// Build a media item that only has a public URL.
    pub fn from_url(url: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            file_path: None,
            url: Some(url.into()),
            media_type,
            description: String::new(),
            alt_text: String::new(),
            user_tags: Vec::new(),
            location: Location::default(),
        }
    }

    /// Whether the item still has a local file or a public URL.
    pub fn has_source(&self) -> bool {
        self.file_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty())
            || self.public_url().is_some()
    }

    /// The public URL, if it is set and non-blank.
    pub fn public_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Assign a single field.
    pub fn apply(&mut self, field: MediaField) {
        match field {
            MediaField::FilePath(value) => self.file_path = value,
            MediaField::Url(value) => self.url = value,
            MediaField::Type(value) => self.media_type = value,
            MediaField::Description(value) => self.description = value,
            MediaField::AltText(value) => self.alt_text = value,
            MediaField::UserTags(value) => self.user_tags = value,
            MediaField::Location(value) => self.location = value,
        }
    }
}

/// An editable media field together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaField {
    /// Local source path
    FilePath(Option<String>),
    /// Public URL
    Url(Option<String>),
    /// Image or video
    Type(MediaType),
    /// Per-item caption
    Description(String),
    /// Accessibility text
    AltText(String),
    /// Tagged users
    UserTags(Vec<UserTag>),
    /// Location
    Location(Location),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_round_trips_unknown_values() {
        let parsed: MediaType = serde_json::from_str("\"CAROUSEL_ALBUM\"").unwrap();
        assert_eq!(parsed, MediaType::Other("CAROUSEL_ALBUM".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"CAROUSEL_ALBUM\"");
    }

    #[test]
    fn media_type_is_case_insensitive() {
        let parsed: MediaType = serde_json::from_str("\"Video\"").unwrap();
        assert_eq!(parsed, MediaType::Video);
    }

    #[test]
    fn from_file_normalizes_separators() {
        let media = Media::from_file("shots\\day1\\clip.webm");
        assert_eq!(media.file_path().as_deref(), Some("shots/day1/clip.webm"));
        assert_eq!(media.media_type(), &MediaType::Video);
        assert!(media.public_url().is_none());
    }

    #[test]
    fn blank_url_is_not_public() {
        let media = Media::from_url("   ", MediaType::Image);
        assert!(media.public_url().is_none());
    }

    #[test]
    fn legacy_media_with_nulls_loads() {
        let json = r#"{
            "file_path": "a.jpg",
            "URL": null,
            "type": "image",
            "description": null,
            "alt_text": "",
            "user_tags": null,
            "location": {"id": null, "name": null}
        }"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.description(), "");
        assert!(media.user_tags().is_empty());
        assert_eq!(media.location(), &Location::default());
    }

    #[test]
    fn canonical_keys_win_over_legacy_spellings() {
        let json = r#"{
            "file_path": "a.jpg",
            "file": "old/a.jpg",
            "URL": "https://cdn.example/a.jpg",
            "url": "https://old.example/a.jpg"
        }"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.file_path().as_deref(), Some("a.jpg"));
        assert_eq!(media.public_url(), Some("https://cdn.example/a.jpg"));

        let legacy: Media =
            serde_json::from_str(r#"{"URL": "", "url": "https://old.example/b.jpg"}"#).unwrap();
        assert_eq!(legacy.public_url(), Some("https://old.example/b.jpg"));
    }

    #[test]
    fn numeric_ids_load_as_strings() {
        let json = r#"{
            "URL": "https://cdn.example/a.jpg",
            "user_tags": [{"user_id": 17841400, "x": 0.5, "y": 0.5}],
            "location": {"id": 110843418940484, "name": "Harbor"}
        }"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert_eq!(media.user_tags()[0].user_id(), "17841400");
        assert_eq!(media.location().id().as_deref(), Some("110843418940484"));
    }

    #[test]
    fn loaded_tag_coordinates_are_clamped() {
        let tag: UserTag =
            serde_json::from_str(r#"{"username": "someone", "x": 3.0, "y": -1.0}"#).unwrap();
        assert_eq!(tag.user_id(), "someone");
        assert_eq!(*tag.x(), 1.0);
        assert_eq!(*tag.y(), 0.0);
    }

    #[test]
    fn has_source_needs_path_or_url() {
        assert!(Media::from_file("a.jpg").has_source());
        assert!(Media::from_url("https://cdn.example/a.jpg", MediaType::Image).has_source());
        assert!(!Media::from_url(" ", MediaType::Image).has_source());
    }

    #[test]
    fn user_tag_coordinates_are_clamped() {
        let tag = UserTag::new("42", 1.5, -0.2);
        assert_eq!(*tag.x(), 1.0);
        assert_eq!(*tag.y(), 0.0);
    }
}
