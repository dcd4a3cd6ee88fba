//! Response envelopes of the catalog API.

use crate::domain::Character;
use serde::Deserialize;

/// Body of `GET {base}/character`.
///
/// Only the `results` array is used; the pagination `info` block is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CharactersResponse {
    pub results: Vec<Character>,
}
