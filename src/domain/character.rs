//! Character domain model.
//!
//! A [`Character`] is one record of the remote catalog. Identity is the
//! numeric id alone: two records with the same id are the same entity even if
//! other fields differ between fetches.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Stable numeric identifier of a character.
pub type CharacterId = i64;

/// A named place a character is associated with (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
}

/// A character from the catalog.
///
/// Field names follow the catalog's JSON. The episode list is renamed from the
/// wire name `episode` because it holds URLs of every episode the character
/// appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: String,
    pub gender: String,
    pub origin: Place,
    pub location: Place,
    pub image: String,
    #[serde(rename = "episode")]
    pub episodes: Vec<String>,
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Returns the trailing path segment of an episode URL, used as its display number.
///
/// Falls back to the full input when the URL has no non-empty trailing segment.
///
/// # Examples
///
/// ```
/// use rickmorty_explorer::domain::episode_number;
///
/// assert_eq!(episode_number("https://rickandmortyapi.com/api/episode/28"), "28");
/// assert_eq!(episode_number("not-a-url"), "not-a-url");
/// ```
#[must_use]
pub fn episode_number(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: CharacterId, name: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            status: "Alive".to_string(),
            gender: "Male".to_string(),
            origin: Place { name: "Earth (C-137)".to_string() },
            location: Place { name: "Citadel of Ricks".to_string() },
            image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
            episodes: vec![],
        }
    }

    #[test]
    fn equality_uses_id_only() {
        let a = character(1, "Rick Sanchez");
        let mut b = character(1, "Rick");
        b.status = "Dead".to_string();
        assert_eq!(a, b);
        assert_ne!(a, character(2, "Rick Sanchez"));
    }

    #[test]
    fn decodes_catalog_json() {
        let json = r#"{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": [
                "https://rickandmortyapi.com/api/episode/1",
                "https://rickandmortyapi.com/api/episode/2"
            ],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }"#;

        let decoded: Character = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.origin.name, "Earth (C-137)");
        assert_eq!(decoded.location.name, "Citadel of Ricks");
        assert_eq!(decoded.episodes.len(), 2);
    }

    #[test]
    fn episode_number_handles_trailing_slash() {
        assert_eq!(episode_number("https://rickandmortyapi.com/api/episode/7/"), "7");
    }
}
