//! Maps a viewer request onto the protected resource it targets.

mod pattern;

use crate::authz::AccessTarget;
use crate::cookie::extract_cookie;
use crate::ctx::ViewerRequest;
pub use pattern::PathPattern;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    RoomMedia,
    DocumentInputMedia,
    MediaTrash,
    Unknown,
}

impl ResourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::RoomMedia => "roomMedia",
            ResourceCategory::DocumentInputMedia => "documentInputMedia",
            ResourceCategory::MediaTrash => "mediaTrash",
            ResourceCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the handler needs to know about a request before authorizing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestClassification {
    pub category: ResourceCategory,
    pub room_id: Option<String>,
    pub document_input_id: Option<String>,
    pub session_token: Option<String>,
}

impl RequestClassification {
    /// What to ask the authorization service about. `None` for unknown paths.
    pub fn access_target(&self) -> Option<AccessTarget> {
        match self.category {
            ResourceCategory::RoomMedia => self.room_id.clone().map(AccessTarget::Room),
            ResourceCategory::DocumentInputMedia => self
                .document_input_id
                .clone()
                .map(AccessTarget::DocumentInput),
            ResourceCategory::MediaTrash => Some(AccessTarget::MediaTrash),
            ResourceCategory::Unknown => None,
        }
    }
}

/// Patterns in precedence order. The first match wins.
const PATTERNS: &[(PathPattern, ResourceCategory)] = &[
    (
        PathPattern::new("/room-media/", 1),
        ResourceCategory::RoomMedia,
    ),
    (
        PathPattern::new("/document-input-media/", 2),
        ResourceCategory::DocumentInputMedia,
    ),
    (
        PathPattern::new("/media-trash/", 0),
        ResourceCategory::MediaTrash,
    ),
];

#[derive(Debug, Clone)]
pub struct RequestClassifier {
    session_cookie_name: String,
    patterns: &'static [(PathPattern, ResourceCategory)],
}

impl RequestClassifier {
    pub fn new(session_cookie_name: impl Into<String>) -> Self {
        Self {
            session_cookie_name: session_cookie_name.into(),
            patterns: PATTERNS,
        }
    }

    /// Category and ids of a path, without looking at cookies.
    pub fn categorize<'a>(&self, path: &'a str) -> (ResourceCategory, Vec<&'a str>) {
        self.patterns
            .iter()
            .find_map(|(pattern, category)| pattern.captures(path).map(|ids| (*category, ids)))
            .unwrap_or((ResourceCategory::Unknown, Vec::new()))
    }

    pub fn classify(&self, request: &ViewerRequest) -> RequestClassification {
        // An empty token is as good as none.
        let session_token = extract_cookie(&request.headers, &self.session_cookie_name)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        let (category, ids) = self.categorize(&request.uri);
        let mut ids = ids.into_iter().map(str::to_string);

        let (room_id, document_input_id) = match category {
            ResourceCategory::RoomMedia => (ids.next(), None),
            ResourceCategory::DocumentInputMedia => (ids.next(), ids.next()),
            ResourceCategory::MediaTrash | ResourceCategory::Unknown => (None, None),
        };

        RequestClassification {
            category,
            room_id,
            document_input_id,
            session_token,
        }
    }
}
