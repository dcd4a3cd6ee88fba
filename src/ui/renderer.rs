//! Plain-text renderer for the explorer view models.
//!
//! The renderer is a pure function of a [`ListViewModel`]: the innermost open
//! screen is drawn (episode over detail over list) and an outstanding alert is
//! appended below it.
//!
//! # Example
//!
//! ```rust
//! use rickmorty_explorer::app::ListState;
//! use rickmorty_explorer::ui::render;
//!
//! let text = render(&ListState::new().compute_viewmodel());
//! assert!(text.contains("hidden"));
//! ```

use crate::ui::viewmodel::{AlertView, CharacterCard, DetailViewModel, EpisodeViewModel, ListViewModel};
use std::fmt::Write;

const FAVORITE_MARK: &str = "★";

/// Renders the innermost open screen of `vm`.
#[must_use]
pub fn render(vm: &ListViewModel) -> String {
    let mut out = String::new();

    match &vm.detail {
        Some(detail) => match &detail.episode {
            Some(episode) => render_episode(&mut out, episode),
            None => render_detail(&mut out, detail),
        },
        None => render_list(&mut out, vm),
    }

    // Alerts belong to the screen that raised them.
    let alert = vm.detail.as_ref().map_or(vm.alert.as_ref(), |d| d.alert.as_ref());
    if let Some(alert) = alert {
        render_alert(&mut out, alert);
    }

    out
}

fn render_list(out: &mut String, vm: &ListViewModel) {
    if !vm.visible {
        let _ = writeln!(out, "== Characters (hidden) ==");
        return;
    }

    let _ = writeln!(out, "== Characters (page {}) ==", vm.page);
    if !vm.search_text.is_empty() {
        let _ = writeln!(out, "Search: {}", vm.search_text);
    }

    if vm.cards.is_empty() && !vm.loading {
        let _ = writeln!(out, "  No characters");
    }
    for card in &vm.cards {
        render_card(out, card);
    }

    if vm.loading {
        let _ = writeln!(out, "  Loading...");
    }
}

fn render_card(out: &mut String, card: &CharacterCard) {
    let mark = if card.is_favorite { FAVORITE_MARK } else { " " };
    let _ = writeln!(out, "{mark} [{}] {} ({})", card.id, card.name, card.status);
}

fn render_detail(out: &mut String, detail: &DetailViewModel) {
    let mark = if detail.is_favorite { FAVORITE_MARK } else { "☆" };
    let _ = writeln!(out, "== {} {mark} ==", detail.name);
    let _ = writeln!(out, "Status:   {}", detail.status);
    let _ = writeln!(out, "Gender:   {}", detail.gender);
    let _ = writeln!(out, "Origin:   {}", detail.origin);
    let _ = writeln!(out, "Location: {}", detail.location);
    let _ = writeln!(out, "Image:    {}", detail.image);

    let numbers: Vec<&str> = detail.episodes.iter().map(|e| e.number.as_str()).collect();
    let _ = writeln!(out, "Episodes: {}", numbers.join(", "));
}

fn render_episode(out: &mut String, episode: &EpisodeViewModel) {
    let _ = writeln!(out, "== {}: {} ==", episode.code, episode.name);
    let _ = writeln!(out, "Air date:   {}", episode.air_date);
    let _ = writeln!(out, "Characters: {}", episode.character_count);
}

fn render_alert(out: &mut String, alert: &AlertView) {
    let _ = writeln!(out, "!! {}: {} [{}]", alert.title, alert.message, alert.button);
}
