//! HUD overlays
//!
//! Text and screens drawn by the host page on top of the game surface. The
//! game only pushes text and visibility; layout is the page's business.

use crate::sim::{GamePhase, GameState};

/// Overlay elements the game writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudElement {
    Score,
    FinalScore,
    HighScore,
    StartScreen,
    GameOverScreen,
    Controls,
}

impl HudElement {
    /// DOM element id
    pub fn id(&self) -> &'static str {
        match self {
            HudElement::Score => "score",
            HudElement::FinalScore => "final-score",
            HudElement::HighScore => "high-score",
            HudElement::StartScreen => "start-screen",
            HudElement::GameOverScreen => "game-over-screen",
            HudElement::Controls => "controls",
        }
    }
}

/// Write access to the overlay elements
pub trait Overlay {
    fn set_text(&mut self, element: HudElement, text: &str);
    fn set_visible(&mut self, element: HudElement, visible: bool);
}

/// Push the current state to the overlays
pub fn sync(overlay: &mut dyn Overlay, state: &GameState, best: u64) {
    let over = state.phase == GamePhase::Over;

    overlay.set_text(HudElement::Score, &state.score.to_string());
    overlay.set_text(HudElement::HighScore, &best.to_string());
    overlay.set_visible(HudElement::StartScreen, state.phase == GamePhase::Idle);
    overlay.set_visible(HudElement::GameOverScreen, over);
    overlay.set_visible(HudElement::Controls, !over);
    if over {
        overlay.set_text(HudElement::FinalScore, &state.score.to_string());
    }
}

/// Overlay backed by DOM elements looked up by id
#[cfg(target_arch = "wasm32")]
pub struct DomOverlay {
    document: web_sys::Document,
    /// Last written values, to avoid touching the DOM every frame
    cache: std::collections::HashMap<(HudElement, bool), String>,
}

#[cfg(target_arch = "wasm32")]
impl DomOverlay {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            cache: std::collections::HashMap::new(),
        }
    }

    fn changed(&mut self, element: HudElement, is_text: bool, value: &str) -> bool {
        let key = (element, is_text);
        if self.cache.get(&key).map(String::as_str) == Some(value) {
            return false;
        }
        self.cache.insert(key, value.to_string());
        true
    }
}

#[cfg(target_arch = "wasm32")]
impl Overlay for DomOverlay {
    fn set_text(&mut self, element: HudElement, text: &str) {
        if !self.changed(element, true, text) {
            return;
        }
        if let Some(el) = self.document.get_element_by_id(element.id()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(&mut self, element: HudElement, visible: bool) {
        use wasm_bindgen::JsCast;

        let display = match (element, visible) {
            (_, false) => "none",
            (HudElement::StartScreen | HudElement::GameOverScreen, true) => "flex",
            (_, true) => "block",
        };
        if !self.changed(element, false, display) {
            return;
        }
        if let Some(el) = self
            .document
            .get_element_by_id(element.id())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }
}
