//! Graph API seam: request shapes, identifiers and the transport trait.

use async_trait::async_trait;
use postprep_core::{Media, MediaType, UserTag};
use postprep_error::{JsonError, PostprepResult};
use serde::{Deserialize, Serialize};

/// Id of a media container created on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct ContainerId(pub String);

/// Id of a published media object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct PublishedId(pub String);

/// Body of a Graph API response.
///
/// Success carries an `id`; failures carry an `error` object instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    /// Id of the created or published object.
    #[serde(default)]
    pub id: Option<String>,
    /// Error payload returned by the platform.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl GraphResponse {
    /// Response carrying an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            error: None,
        }
    }

    /// Response carrying an error message.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            id: None,
            error: Some(serde_json::json!({ "message": message.into() })),
        }
    }

    /// The id, if present and non-blank.
    pub fn usable_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Short description of why the response is unusable.
    pub fn describe_failure(&self) -> String {
        match &self.error {
            Some(error) => error
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            None => "response carried no id".to_string(),
        }
    }
}

/// Request to create one media container.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerRequest {
    /// Image or video container.
    Media {
        /// Whether `url` goes out as `video_url` rather than `image_url`.
        video: bool,
        /// Public media URL.
        url: String,
        /// Per-item caption.
        caption: Option<String>,
        /// Alt text.
        accessibility_caption: Option<String>,
        /// Tagged users.
        user_tags: Vec<UserTag>,
        /// Location page id.
        location_id: Option<String>,
    },
    /// Carousel parent container.
    Carousel {
        /// Child containers in display order.
        children: Vec<ContainerId>,
        /// Post caption.
        caption: Option<String>,
    },
}

impl ContainerRequest {
    /// Container request for one media item.
    ///
    /// Returns `None` when the item has no public URL or is neither an image
    /// nor a video.
    pub fn for_media(media: &Media) -> Option<Self> {
        let url = media.public_url()?;
        let video = match media.media_type() {
            MediaType::Image => false,
            MediaType::Video => true,
            MediaType::Other(_) => return None,
        };
        let location_id = media
            .location()
            .id()
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);

        Some(Self::Media {
            video,
            url: url.to_string(),
            caption: non_blank(media.description()),
            accessibility_caption: non_blank(media.alt_text()),
            user_tags: media.user_tags().clone(),
            location_id,
        })
    }

    /// Carousel parent request.
    pub fn carousel(children: Vec<ContainerId>, caption: &str) -> Self {
        Self::Carousel {
            children,
            caption: non_blank(caption),
        }
    }

    /// Form fields for the request, without the access token.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the user tags cannot be serialized.
    pub fn to_form(&self) -> PostprepResult<Vec<(&'static str, String)>> {
        let mut form = Vec::new();
        match self {
            Self::Media {
                video,
                url,
                caption,
                accessibility_caption,
                user_tags,
                location_id,
            } => {
                form.push((if *video { "video_url" } else { "image_url" }, url.clone()));
                if let Some(caption) = caption {
                    form.push(("caption", caption.clone()));
                }
                if let Some(alt) = accessibility_caption {
                    form.push(("accessibility_caption", alt.clone()));
                }
                if !user_tags.is_empty() {
                    let tags = serde_json::to_string(&serde_json::json!({ "in": user_tags }))
                        .map_err(|e| JsonError::new(format!("Failed to encode user tags: {}", e)))?;
                    form.push(("user_tags", tags));
                }
                if let Some(location_id) = location_id {
                    form.push(("location_id", location_id.clone()));
                }
            }
            Self::Carousel { children, caption } => {
                let children = children
                    .iter()
                    .map(|child| child.0.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                form.push(("children", children));
                if let Some(caption) = caption {
                    form.push(("caption", caption.clone()));
                }
            }
        }
        Ok(form)
    }
}

fn non_blank(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

/// Transport for the three Graph API calls the publisher makes.
///
/// Implementations return `Err` only for transport or decoding failures; an
/// API-level rejection is an `Ok` response without an id.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// `POST {base}/{account}/media`
    async fn create_container(&self, request: &ContainerRequest) -> PostprepResult<GraphResponse>;

    /// `POST {base}/{account}/media_publish` with `creation_id`.
    async fn publish_container(&self, creation_id: &ContainerId) -> PostprepResult<GraphResponse>;
}
