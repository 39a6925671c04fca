//! Tutorial shapes: the stored document, the API record, and request payloads.
//!
//! Stored documents carry an internal `version` counter that must never reach
//! clients; [`to_api_shape`] is the one place that maps a document to what the
//! API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tutorial as persisted by the store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TutorialDocument {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

/// A tutorial as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn to_api_shape(doc: TutorialDocument) -> Tutorial {
    let TutorialDocument {
        id,
        title,
        description,
        published,
        created_at,
        updated_at,
        version: _,
    } = doc;
    Tutorial {
        id,
        title,
        description,
        published,
        created_at,
        updated_at,
    }
}

impl From<TutorialDocument> for Tutorial {
    fn from(doc: TutorialDocument) -> Self {
        to_api_shape(doc)
    }
}

/// Fields accepted when creating a tutorial. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTutorial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

/// Validated input for [`crate::store::TutorialStore::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTutorial {
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
}

impl CreateTutorial {
    /// Title must be present and non-empty; `published` defaults to false.
    pub fn validate(self) -> Option<NewTutorial> {
        let title = self.title.filter(|t| !t.is_empty())?;
        Some(NewTutorial {
            title,
            description: self.description,
            published: self.published.unwrap_or(false),
        })
    }
}

/// Partial update. `None` (omitted or null) leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TutorialPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

impl TutorialPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.published.is_none()
    }

    pub fn apply(&self, doc: &mut TutorialDocument) {
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(description) = &self.description {
            doc.description = Some(description.clone());
        }
        if let Some(published) = self.published {
            doc.published = published;
        }
    }
}

/// Query over stored tutorials. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorialFilter {
    /// Case-insensitive literal substring of `title`.
    pub title_contains: Option<String>,
    pub published: Option<bool>,
}

impl TutorialFilter {
    pub fn title(title: Option<String>) -> Self {
        Self {
            title_contains: title.filter(|t| !t.is_empty()),
            published: None,
        }
    }

    pub fn published() -> Self {
        Self {
            title_contains: None,
            published: Some(true),
        }
    }

    pub fn matches(&self, doc: &TutorialDocument) -> bool {
        if let Some(published) = self.published {
            if doc.published != published {
                return false;
            }
        }
        match &self.title_contains {
            Some(needle) => doc.title.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, published: bool) -> TutorialDocument {
        let now = Utc::now();
        TutorialDocument {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            published,
            created_at: now,
            updated_at: now,
            version: 3,
        }
    }

    #[test]
    fn api_shape_renames_id_and_hides_version() {
        let d = doc("Rust Ownership", false);
        let id = d.id;
        let json = serde_json::to_value(to_api_shape(d)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["id"], serde_json::json!(id.to_string()));
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(obj.contains_key("description"));
        assert!(!obj.contains_key("version"));
        assert!(!obj.contains_key("_id"));
        assert!(!obj.contains_key("created_at"));
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn create_requires_non_empty_title() {
        assert!(CreateTutorial::default().validate().is_none());
        let empty = CreateTutorial {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.validate().is_none());

        let ok = CreateTutorial {
            title: Some("A".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(ok.title, "A");
        assert!(!ok.published);
        assert!(ok.description.is_none());
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let f = TutorialFilter::title(Some("Node".into()));
        assert!(f.matches(&doc("Node.js Guide", false)));
        assert!(f.matches(&doc("ADVANCED NODE", true)));
        assert!(!f.matches(&doc("React", false)));
    }

    #[test]
    fn title_filter_treats_pattern_characters_literally() {
        let f = TutorialFilter::title(Some("c++".into()));
        assert!(f.matches(&doc("Modern C++", false)));
        assert!(!f.matches(&doc("C", false)));
    }

    #[test]
    fn empty_title_query_matches_everything() {
        assert_eq!(TutorialFilter::title(Some(String::new())), TutorialFilter::default());
        assert!(TutorialFilter::default().matches(&doc("anything", false)));
    }

    #[test]
    fn published_filter_is_equality() {
        let f = TutorialFilter::published();
        assert!(f.matches(&doc("a", true)));
        assert!(!f.matches(&doc("a", false)));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut d = doc("Before", false);
        let patch = TutorialPatch {
            published: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut d);
        assert_eq!(d.title, "Before");
        assert!(d.published);
        assert!(TutorialPatch::default().is_empty());
    }
}
