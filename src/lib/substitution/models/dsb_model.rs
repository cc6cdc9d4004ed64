//! Module with timetable model compatible with mobileapi.dsbcontrol.de's REST API
use serde::{Deserialize, Serialize};

/// Token the API hands out when the credentials are wrong.
pub const EMPTY_AUTH_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Deserialize, Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct TimetableItem {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Deserialize, Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Timetable {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub childs: Vec<TimetableItem>,
}
