//! # Domain Model
//!
//! The four record kinds persisted by listed: [`List`], [`Item`], [`Tag`] and
//! [`ListTagLink`], plus the input and patch types used to create and update them.
//!
//! ## Record Shape
//!
//! Records serialize with camelCase field names (`listId`, `createdAt`, ...).
//! Optional fields are omitted when absent. Unknown fields are ignored on read,
//! so collections written by older app versions (with a denormalized `tags`
//! array or an `isDeleted` flag on lists) still load.
//!
//! ## List Lifecycle
//!
//! ```text
//! Active --soft delete--> Trashed --restore--> Active
//!                         Trashed --purge (retention elapsed)--> gone
//! ```
//!
//! A list is trashed exactly when `deleted_at` is set. It stays restorable for
//! [`RETENTION_DAYS`] whole days; see [`days_remaining`].
//!
//! ## Tags on Lists
//!
//! The list/tag relation lives only in the `listTags` collection. [`List`] has
//! no tag field; [`ListWithTags`] is the derived, denormalized view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of days a trashed list can be restored before it is purged.
pub const RETENTION_DAYS: i64 = 14;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole days left before a list trashed at `deleted_at` becomes purgeable.
///
/// `RETENTION_DAYS - floor((now - deleted_at) / 1 day)`. Zero or less means
/// the retention window has elapsed.
pub fn days_remaining(deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_days = (now - deleted_at).num_seconds().div_euclid(SECONDS_PER_DAY);
    RETENTION_DAYS - elapsed_days
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl List {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Days left in the trash, or `None` for an active list.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.deleted_at.map(|deleted_at| days_remaining(deleted_at, now))
    }

    /// True when the list is trashed and its retention window has elapsed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.days_remaining(now).is_some_and(|days| days <= 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// Display color, opaque to the domain (the app uses hex strings).
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership of a list in a tag's filter group.
///
/// Unique by `(list_id, tag_id)`; `created_at` does not take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTagLink {
    pub list_id: Uuid,
    pub tag_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListTagLink {
    pub fn is_pair(&self, list_id: Uuid, tag_id: Uuid) -> bool {
        self.list_id == list_id && self.tag_id == tag_id
    }
}

/// A list together with the ids of its tags, derived from the link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWithTags {
    #[serde(flatten)]
    pub list: List,
    pub tags: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    pub description: Option<String>,
    /// Tags to attach at creation time.
    pub tags: Vec<Uuid>,
}

impl NewList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<Uuid>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update for a list. `None` leaves a field untouched;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl NewItem {
    pub fn new(list_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            list_id,
            name: name.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl ItemPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    /// Falls back to [`crate::validation::DEFAULT_TAG_COLOR`] when absent.
    pub color: Option<String>,
}

impl NewTag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Some(color.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Ordering applied to list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Creation time, most recent first.
    #[default]
    Newest,
    Oldest,
    /// Case-insensitive by name.
    Name,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn list_deleted_at(deleted_at: Option<DateTime<Utc>>) -> List {
        List {
            id: Uuid::new_v4(),
            name: "Groceries".to_string(),
            description: None,
            created_at: t0(),
            updated_at: t0(),
            deleted_at,
        }
    }

    #[test]
    fn days_remaining_counts_whole_elapsed_days() {
        assert_eq!(days_remaining(t0(), t0()), 14);
        assert_eq!(days_remaining(t0(), t0() + Duration::hours(23)), 14);
        assert_eq!(days_remaining(t0(), t0() + Duration::days(1)), 13);
        assert_eq!(days_remaining(t0(), t0() + Duration::days(13)), 1);
        assert_eq!(days_remaining(t0(), t0() + Duration::days(14)), 0);
        assert_eq!(days_remaining(t0(), t0() + Duration::days(20)), -6);
    }

    #[test]
    fn days_remaining_floors_negative_elapsed_time() {
        // Deletion stamped slightly in the future (clock skew) still floors.
        assert_eq!(days_remaining(t0(), t0() - Duration::hours(1)), 15);
    }

    #[test]
    fn active_list_has_no_expiry() {
        let list = list_deleted_at(None);
        assert!(list.is_active());
        assert_eq!(list.days_remaining(t0()), None);
        assert!(!list.is_expired(t0() + Duration::days(100)));
    }

    #[test]
    fn trashed_list_expires_after_retention() {
        let list = list_deleted_at(Some(t0()));
        assert!(list.is_trashed());
        assert!(!list.is_expired(t0() + Duration::days(13)));
        assert!(list.is_expired(t0() + Duration::days(14)));
    }

    #[test]
    fn list_serializes_camel_case_and_omits_absent_fields() {
        let list = list_deleted_at(None);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("deletedAt").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn list_ignores_legacy_fields() {
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{"id":"{}","name":"Old","isDeleted":false,"tags":[1,2],
                "createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}}"#,
            id
        );
        let list: List = serde_json::from_str(&raw).unwrap();
        assert_eq!(list.id, id);
        assert!(list.is_active());
    }

    #[test]
    fn list_with_tags_flattens_list_fields() {
        let tag = Uuid::new_v4();
        let view = ListWithTags {
            list: list_deleted_at(None),
            tags: vec![tag],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Groceries");
        assert_eq!(json["tags"][0], tag.to_string());
    }

    #[test]
    fn sort_by_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&SortBy::Newest).unwrap(), "\"newest\"");
        let parsed: SortBy = serde_json::from_str("\"oldest\"").unwrap();
        assert_eq!(parsed, SortBy::Oldest);
    }
}
