//! Trainer card WASM bindings.
//!
//! This module provides JavaScript bindings for the trainer card data
//! model, so the UI edits one card object whose slot invariants are
//! enforced on this side of the boundary.
//!
//! # Example
//!
//! ```typescript
//! import { Trainer } from '@cardforge/wasm';
//!
//! const trainer = new Trainer(
//!   'Pallet Town', 'Kanto',
//!   '#f4f4f4', '#222222', '#cc0000', '#ffffff',
//! );
//! trainer.name = 'Ash Ketchum';
//! trainer.set_team_slot(0, 25, 'Pikachu');
//! const badgeId = trainer.set_badge(0, badgeDataUrl);
//!
//! header.textContent = trainer.id_line(new Date().getFullYear());
//! link.download = trainer.export_file_name();
//! ```

use cardforge_core::card::{City, CityTheme, Species};
use wasm_bindgen::prelude::*;

/// Trainer card wrapper for JavaScript.
#[wasm_bindgen]
pub struct Trainer {
    inner: cardforge_core::card::Trainer,
}

#[wasm_bindgen]
impl Trainer {
    /// Create an empty card for a home city and its theme colors.
    ///
    /// All team and badge slots start empty; the display fields start
    /// blank and the title starts at its default.
    #[wasm_bindgen(constructor)]
    pub fn new(
        city_name: &str,
        city_region: &str,
        theme_background: &str,
        theme_text: &str,
        theme_accent: &str,
        theme_badge_background: &str,
    ) -> Self {
        let theme = CityTheme::new(
            theme_background,
            theme_text,
            theme_accent,
            theme_badge_background,
        );
        Self {
            inner: cardforge_core::card::Trainer::new(City::new(city_name, city_region, theme)),
        }
    }

    /// Get the trainer name
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// Set the trainer name
    #[wasm_bindgen(setter)]
    pub fn set_name(&mut self, value: String) {
        self.inner.name = value;
    }

    /// Get the trainer age
    #[wasm_bindgen(getter)]
    pub fn age(&self) -> String {
        self.inner.age.clone()
    }

    /// Set the trainer age
    #[wasm_bindgen(setter)]
    pub fn set_age(&mut self, value: String) {
        self.inner.age = value;
    }

    /// Get the trainer height
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> String {
        self.inner.height.clone()
    }

    /// Set the trainer height
    #[wasm_bindgen(setter)]
    pub fn set_height(&mut self, value: String) {
        self.inner.height = value;
    }

    /// Get the card photo reference (typically a data URL)
    #[wasm_bindgen(getter)]
    pub fn photo(&self) -> String {
        self.inner.photo.clone()
    }

    /// Set the card photo reference
    #[wasm_bindgen(setter)]
    pub fn set_photo(&mut self, value: String) {
        self.inner.photo = value;
    }

    /// Get the card title
    #[wasm_bindgen(getter)]
    pub fn card_title(&self) -> String {
        self.inner.card_title.clone()
    }

    /// Set the card title
    #[wasm_bindgen(setter)]
    pub fn set_card_title(&mut self, value: String) {
        self.inner.card_title = value;
    }

    /// Get the custom background reference, if one is set
    #[wasm_bindgen(getter)]
    pub fn custom_background(&self) -> Option<String> {
        self.inner.custom_background.clone()
    }

    /// Set or clear the custom background reference
    #[wasm_bindgen(setter)]
    pub fn set_custom_background(&mut self, value: Option<String>) {
        self.inner.custom_background = value;
    }

    /// Title to render, falling back to the default when empty.
    pub fn display_title(&self) -> String {
        self.inner.display_title().to_string()
    }

    /// The home city as `{ name, region, theme }`.
    pub fn city(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.city)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the home city with one from the catalog.
    pub fn set_city(&mut self, city: JsValue) -> Result<(), JsValue> {
        self.inner.city =
            serde_wasm_bindgen::from_value(city).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Number of occupied team slots.
    pub fn team_count(&self) -> usize {
        self.inner.team_count()
    }

    /// The team slots as an array of `{ id, name }` or `null`.
    pub fn team(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.team())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Place a species into a team slot, replacing any previous occupant.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range.
    pub fn set_team_slot(&mut self, slot: usize, species_id: u32, species_name: &str) -> Result<(), JsValue> {
        self.inner
            .set_team_slot(slot, Species::new(species_id, species_name))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Empty a team slot.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range.
    pub fn clear_team_slot(&mut self, slot: usize) -> Result<(), JsValue> {
        self.inner
            .clear_team_slot(slot)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The badge slots as an array of `{ id, image }` or `null`.
    pub fn badges(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.badges())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of collected badges.
    pub fn badge_count(&self) -> usize {
        self.inner.collected_badges().count()
    }

    /// The identifier of the badge in a slot, if one is pinned there.
    pub fn badge_id(&self, slot: usize) -> Option<String> {
        self.inner.badge(slot).map(|b| b.id.clone())
    }

    /// The image reference of the badge in a slot, if one is pinned there.
    pub fn badge_image(&self, slot: usize) -> Option<String> {
        self.inner.badge(slot).map(|b| b.image.clone())
    }

    /// Pin a badge image into a slot and return the minted badge id.
    ///
    /// Each call mints a fresh id, so re-uploading into the same slot
    /// yields a badge distinguishable from the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range.
    pub fn set_badge(&mut self, slot: usize, image: &str) -> Result<String, JsValue> {
        self.inner
            .set_badge(slot, image.to_string())
            .map(|badge| badge.id.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Empty a badge slot.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range.
    pub fn clear_badge(&mut self, slot: usize) -> Result<(), JsValue> {
        self.inner
            .clear_badge(slot)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Format the card's ID line for a calendar year, e.g.
    /// `ID No. 01037 - 2026`.
    pub fn id_line(&self, year: i32) -> String {
        self.inner.id_line(year)
    }

    /// File name for a card export download, e.g.
    /// `ash_ketchum_trainer_card.png`.
    pub fn export_file_name(&self) -> String {
        self.inner.export_file_name()
    }

    /// Serialize the whole card to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize a card from JSON
    pub fn from_json(value: JsValue) -> Result<Trainer, JsValue> {
        let inner: cardforge_core::card::Trainer =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}
