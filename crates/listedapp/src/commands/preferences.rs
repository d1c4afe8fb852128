//! Persisted user preferences.
//!
//! Stored as a single record in the `preferences` collection. When nothing is
//! stored yet, the caller-provided defaults apply.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::SortBy;
use crate::store::repository::{Change, Record, Repository};
use crate::store::{Collection, EntityStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Default,
    Typewriter,
    Handwritten,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub is_dark_mode: bool,
    pub font_style: FontStyle,
    pub layout: Layout,
    pub sort_by: SortBy,
}

impl Preferences {
    pub fn with_sort(sort_by: SortBy) -> Self {
        Self {
            sort_by,
            ..Default::default()
        }
    }
}

impl Record for Preferences {
    const COLLECTION: Collection = Collection::Preferences;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub is_dark_mode: Option<bool>,
    pub font_style: Option<FontStyle>,
    pub layout: Option<Layout>,
    pub sort_by: Option<SortBy>,
}

pub fn load<S: EntityStore>(repo: &Repository<S>, defaults: Preferences) -> Result<Preferences> {
    Ok(repo
        .load::<Preferences>()?
        .into_iter()
        .next()
        .unwrap_or(defaults))
}

/// Merge `patch` into the stored preferences (or `defaults`) and save.
pub fn update<S: EntityStore>(
    repo: &Repository<S>,
    patch: PreferencesPatch,
    defaults: Preferences,
) -> Result<Preferences> {
    repo.mutate(|stored: &mut Vec<Preferences>| {
        let mut prefs = stored.first().copied().unwrap_or(defaults);
        if let Some(dark) = patch.is_dark_mode {
            prefs.is_dark_mode = dark;
        }
        if let Some(font_style) = patch.font_style {
            prefs.font_style = font_style;
        }
        if let Some(layout) = patch.layout {
            prefs.layout = layout;
        }
        if let Some(sort_by) = patch.sort_by {
            prefs.sort_by = sort_by;
        }
        *stored = vec![prefs];
        debug!(?prefs, "preferences saved");
        Ok(Change::Changed(prefs))
    })
}
