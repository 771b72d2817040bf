//! Map entry model - a shared map-code submission with its comments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::models::ValidationError;

/// A single shared map-code submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MapEntry {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    pub name: String,
    /// The map code text blob
    pub code: String,
    pub description: String,
    pub image_url: String,
    /// Distinct tags in the order they were given
    pub tags: Vec<String>,
    /// Username of the uploader
    pub uploaded_by: String,
    /// Denormalized count of users whose like set contains this entry
    #[ts(type = "number")]
    pub likes: u64,
    /// Upload timestamp (milliseconds since epoch)
    #[ts(type = "number")]
    pub upload_date: i64,
    /// Append-only, ordered by creation
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl MapEntry {
    /// Build a stored entry from a validated upload.
    pub fn from_upload(upload: NewMapEntry, upload_date: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: upload.name,
            code: upload.code,
            description: upload.description,
            image_url: upload.image_url,
            tags: upload.tags,
            uploaded_by: upload.uploaded_by,
            likes: 0,
            upload_date,
            comments: Vec::new(),
        }
    }

    /// Case-insensitive substring match on name, description or any tag.
    ///
    /// `needle` must already be passed through [`fold_case`].
    pub fn matches_query(&self, needle: &str) -> bool {
        fold_case(&self.name).contains(needle)
            || fold_case(&self.description).contains(needle)
            || self.tags.iter().any(|t| fold_case(t).contains(needle))
    }

    /// True when every given tag is on this entry.
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.tags.contains(tag))
    }
}

/// Lowercase one character at a time, so a `Σ` folds the same wherever it
/// sits in a word (unlike `str::to_lowercase`).
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A comment on a map entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    /// Creation timestamp (milliseconds since epoch)
    #[ts(type = "number")]
    pub created_at: i64,
}

impl Comment {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            username: username.into(),
            content: content.into(),
            created_at,
        }
    }
}

/// Upload form payload for a new map entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewMapEntry {
    pub name: String,
    pub code: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uploaded_by: String,
}

impl NewMapEntry {
    /// Parse a comma-separated tag list the way the upload form does.
    pub fn parse_tags(input: &str) -> Vec<String> {
        input.split(',').map(|tag| tag.trim().to_string()).collect()
    }

    /// Trim every field and normalize tags, then check required fields.
    pub fn normalized(self) -> Result<Self, Vec<ValidationError>> {
        let upload = Self {
            name: self.name.trim().to_string(),
            code: self.code.trim_end().to_string(),
            description: self.description.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            tags: normalize_tags(self.tags),
            uploaded_by: self.uploaded_by.trim().to_string(),
        };

        let mut errors = Vec::new();
        let required = [
            ("name", &upload.name),
            ("code", &upload.code),
            ("description", &upload.description),
            ("imageUrl", &upload.image_url),
            ("uploadedBy", &upload.uploaded_by),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::required(field));
            }
        }
        if upload.tags.is_empty() {
            errors.push(ValidationError::new("tags", "at least one tag is required"));
        }

        if errors.is_empty() {
            Ok(upload)
        } else {
            Err(errors)
        }
    }
}

/// Trim tags, drop blanks, and drop repeats keeping the first occurrence.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        normalized.push(tag.to_string());
    }
    normalized
}

/// Ordering for browse views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortCriterion {
    /// Most liked first
    Likes,
    /// Newest upload first
    #[default]
    Date,
}

impl SortCriterion {
    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::Likes => "likes",
            SortCriterion::Date => "date",
        }
    }

    /// Stable sort, so ties keep their collection order.
    pub fn sort(self, entries: &mut [MapEntry]) {
        match self {
            SortCriterion::Likes => entries.sort_by(|a, b| b.likes.cmp(&a.likes)),
            SortCriterion::Date => entries.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "likes" => Ok(SortCriterion::Likes),
            "date" => Ok(SortCriterion::Date),
            other => Err(format!("Unknown sort criterion: {other} (expected likes or date)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> NewMapEntry {
        NewMapEntry {
            name: "  Parkour1 ".to_string(),
            code: "1234-5678-9012\n".to_string(),
            description: "Jump around".to_string(),
            image_url: "https://img.example/p1.png".to_string(),
            tags: vec!["parkour".to_string(), " fun".to_string()],
            uploaded_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_normalized_trims_fields() {
        let normalized = upload().normalized().unwrap();
        assert_eq!(normalized.name, "Parkour1");
        assert_eq!(normalized.code, "1234-5678-9012");
        assert_eq!(normalized.tags, vec!["parkour", "fun"]);
    }

    #[test]
    fn test_normalized_reports_every_missing_field() {
        let errors = NewMapEntry::default().normalized().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "code", "description", "imageUrl", "uploadedBy", "tags"]
        );
    }

    #[test]
    fn test_parse_tags_matches_form_input() {
        let tags = normalize_tags(NewMapEntry::parse_tags("parkour, fun,,parkour , pvp"));
        assert_eq!(tags, vec!["parkour", "fun", "pvp"]);
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let entry = MapEntry::from_upload(upload().normalized().unwrap(), 0);
        assert!(entry.matches_query("park"));
        assert!(entry.matches_query("jump"));
        assert!(entry.matches_query("fun"));
        assert!(!entry.matches_query("racing"));
    }

    #[test]
    fn test_fold_case_ignores_word_position() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("Σ"), "σ");
        assert_eq!(fold_case("Parkour"), "parkour");
    }

    #[test]
    fn test_has_all_tags() {
        let entry = MapEntry::from_upload(upload().normalized().unwrap(), 0);
        assert!(entry.has_all_tags(&[]));
        assert!(entry.has_all_tags(&["fun".to_string(), "parkour".to_string()]));
        assert!(!entry.has_all_tags(&["fun".to_string(), "pvp".to_string()]));
        assert!(!entry.has_all_tags(&["Fun".to_string()]));
    }

    #[test]
    fn test_sort_criterion_parse() {
        assert_eq!("likes".parse::<SortCriterion>().unwrap(), SortCriterion::Likes);
        assert_eq!(" DATE ".parse::<SortCriterion>().unwrap(), SortCriterion::Date);
        assert!("rating".parse::<SortCriterion>().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = MapEntry::from_upload(upload().normalized().unwrap(), 42);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["imageUrl"], "https://img.example/p1.png");
        assert_eq!(value["uploadedBy"], "alice");
        assert_eq!(value["uploadDate"], 42);
        assert_eq!(value["likes"], 0);
    }
}
