use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::MapEntry;

/// Tabs of a user's profile page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProfileTab {
    #[default]
    Uploaded,
    Liked,
    Saved,
}

/// A user's profile as seen by the active identity.
///
/// `liked` and `saved` are only filled in on the viewer's own profile.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileView {
    pub username: String,
    pub is_own_profile: bool,
    pub uploaded: Vec<MapEntry>,
    pub liked: Vec<MapEntry>,
    pub saved: Vec<MapEntry>,
}

impl ProfileView {
    pub fn tab(&self, tab: ProfileTab) -> &[MapEntry] {
        match tab {
            ProfileTab::Uploaded => &self.uploaded,
            ProfileTab::Liked => &self.liked,
            ProfileTab::Saved => &self.saved,
        }
    }
}
