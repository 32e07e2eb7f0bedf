use serde::Serialize;
use std::collections::BTreeMap;

/// Wire form of a curricular unit. Times are rendered as wall-clock strings;
/// block indices never leave the crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitResponse {
    pub name: String,
    pub shifts: BTreeMap<String, Vec<ShiftResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub class_groups: Vec<String>,
    pub lessons: Vec<LessonResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonResponse {
    pub day: String,
    pub start: String,
    pub end: String,
}
