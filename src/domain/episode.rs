//! Episode domain model.

use serde::{Deserialize, Serialize};

/// An episode from the catalog.
///
/// `code` is the season/episode code such as `S01E01` (wire name `episode`).
/// `air_date` is free text as published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub name: String,
    pub air_date: String,
    #[serde(rename = "episode")]
    pub code: String,
    pub characters: Vec<String>,
}
