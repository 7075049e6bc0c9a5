//! Trainer card data model and slot management.
//!
//! This module provides functionality for:
//! - Modeling a trainer card (identity fields, city theme, team and badge slots)
//! - Bounds-checked slot operations that keep the card arrays dense
//! - Stable badge identifiers generated from a per-card sequence counter
//! - Derived card text (trainer ID line, display title, export file name)
//!
//! # Architecture
//!
//! The card is a plain data structure: rendering and persistence live in the
//! host application. Slot arrays are fixed-size (`TEAM_SIZE` and
//! `BADGE_SLOTS`) so a card always serializes with every slot present,
//! occupied or not.
//!
//! Slot pickers go through [`TeamSelection`] and [`BadgeSelection`]: a
//! selection is created when a picker opens, carries the validated slot
//! index, and is consumed exactly once when the picker closes. Because the
//! selection types are not `Clone`, a stale picker cannot write into a slot
//! twice.
//!
//! # Examples
//!
//! ```ignore
//! use cardforge_core::card::{City, CityTheme, Species, Trainer};
//!
//! let mut trainer = Trainer::new(City::new(
//!     "Pallet Town",
//!     "Kanto",
//!     CityTheme::new("#f4f4f4", "#222222", "#cc0000", "#ffffff"),
//! ));
//! trainer.name = "Ash Ketchum".to_string();
//! trainer.set_team_slot(0, Species::new(25, "Pikachu"))?;
//! let id = trainer.id_line(2026);
//! let file = trainer.export_file_name();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of team slots on a card.
pub const TEAM_SIZE: usize = 6;

/// Number of badge slots on a card.
pub const BADGE_SLOTS: usize = 8;

/// Title shown on a card whose own title is empty.
pub const DEFAULT_CARD_TITLE: &str = "TRAINER CARD";

/// Errors that can occur during card slot operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// A team slot index was outside `0..TEAM_SIZE`.
    #[error("Team slot {slot} is out of range 0..{}", TEAM_SIZE)]
    TeamSlotOutOfRange { slot: usize },

    /// A badge slot index was outside `0..BADGE_SLOTS`.
    #[error("Badge slot {slot} is out of range 0..{}", BADGE_SLOTS)]
    BadgeSlotOutOfRange { slot: usize },
}

/// Color theme applied to a card, derived from the trainer's home city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTheme {
    /// Card background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Accent color for borders and highlights.
    pub accent: String,
    /// Background color behind the badge row.
    pub badge_background: String,
}

impl CityTheme {
    /// Creates a theme from its four color values.
    pub fn new(
        background: impl Into<String>,
        text: impl Into<String>,
        accent: impl Into<String>,
        badge_background: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            accent: accent.into(),
            badge_background: badge_background.into(),
        }
    }
}

/// A home city with its display theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub region: String,
    pub theme: CityTheme,
}

impl City {
    /// Creates a city entry.
    pub fn new(name: impl Into<String>, region: impl Into<String>, theme: CityTheme) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            theme,
        }
    }
}

/// A species occupying a team slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Numeric species identifier from the species catalog.
    pub id: u32,
    pub name: String,
}

impl Species {
    /// Creates a species entry.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A badge pinned to one of the card's badge slots.
///
/// The `id` is unique within the owning card for the card's whole lifetime,
/// including across removals and re-uploads into the same slot, so hosts can
/// use it as a stable render key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable identifier of the form `badge-{slot}-{seq}`.
    pub id: String,
    /// Image reference for the badge, typically a data URL.
    pub image: String,
}

/// A trainer card: identity fields plus fixed-size team and badge slots.
///
/// Simple display fields are public and can be edited directly. The slot
/// arrays are private so that every write goes through a bounds-checked
/// operation and badge identifiers stay unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub name: String,
    pub age: String,
    pub height: String,
    /// Photo shown on the card, typically a data URL produced by the
    /// crop pipeline.
    pub photo: String,
    pub city: City,
    team: [Option<Species>; TEAM_SIZE],
    badges: [Option<Badge>; BADGE_SLOTS],
    pub card_title: String,
    /// Custom backdrop image overriding the city theme background.
    pub custom_background: Option<String>,
    /// Monotonic counter behind badge id generation. Serialized so that a
    /// reloaded card never reissues an id it has already handed out.
    #[serde(default)]
    badge_seq: u32,
}

impl Trainer {
    /// Creates an empty card for the given home city.
    ///
    /// All team and badge slots start empty and the title starts at
    /// [`DEFAULT_CARD_TITLE`].
    pub fn new(city: City) -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            height: String::new(),
            photo: String::new(),
            city,
            team: Default::default(),
            badges: Default::default(),
            card_title: DEFAULT_CARD_TITLE.to_string(),
            custom_background: None,
            badge_seq: 0,
        }
    }

    /// Returns the team slots in slot order.
    pub fn team(&self) -> &[Option<Species>; TEAM_SIZE] {
        &self.team
    }

    /// Returns the species in a team slot, if the slot is valid and occupied.
    pub fn team_slot(&self, slot: usize) -> Option<&Species> {
        self.team.get(slot).and_then(|s| s.as_ref())
    }

    /// Number of occupied team slots.
    pub fn team_count(&self) -> usize {
        self.team.iter().filter(|s| s.is_some()).count()
    }

    /// Places a species into a team slot, replacing any previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TeamSlotOutOfRange`] if `slot >= TEAM_SIZE`.
    pub fn set_team_slot(&mut self, slot: usize, species: Species) -> Result<(), CardError> {
        if slot >= TEAM_SIZE {
            return Err(CardError::TeamSlotOutOfRange { slot });
        }
        self.team[slot] = Some(species);
        Ok(())
    }

    /// Empties a team slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TeamSlotOutOfRange`] if `slot >= TEAM_SIZE`.
    pub fn clear_team_slot(&mut self, slot: usize) -> Result<(), CardError> {
        if slot >= TEAM_SIZE {
            return Err(CardError::TeamSlotOutOfRange { slot });
        }
        self.team[slot] = None;
        Ok(())
    }

    /// Returns the badge slots in slot order.
    pub fn badges(&self) -> &[Option<Badge>; BADGE_SLOTS] {
        &self.badges
    }

    /// Returns the badge in a slot, if the slot is valid and occupied.
    pub fn badge(&self, slot: usize) -> Option<&Badge> {
        self.badges.get(slot).and_then(|b| b.as_ref())
    }

    /// Iterates over collected badges in slot order, skipping empty slots.
    pub fn collected_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter_map(|b| b.as_ref())
    }

    /// Pins a badge image into a slot, replacing any previous badge there.
    ///
    /// Each call mints a fresh identifier, so re-uploading into the same
    /// slot yields a badge distinguishable from the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::BadgeSlotOutOfRange`] if `slot >= BADGE_SLOTS`.
    pub fn set_badge(&mut self, slot: usize, image: String) -> Result<&Badge, CardError> {
        if slot >= BADGE_SLOTS {
            return Err(CardError::BadgeSlotOutOfRange { slot });
        }
        Ok(self.insert_badge(slot, image))
    }

    /// Empties a badge slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::BadgeSlotOutOfRange`] if `slot >= BADGE_SLOTS`.
    pub fn clear_badge(&mut self, slot: usize) -> Result<(), CardError> {
        if slot >= BADGE_SLOTS {
            return Err(CardError::BadgeSlotOutOfRange { slot });
        }
        self.badges[slot] = None;
        Ok(())
    }

    /// Title to render on the card, falling back to [`DEFAULT_CARD_TITLE`]
    /// when the card's own title is empty.
    pub fn display_title(&self) -> &str {
        if self.card_title.is_empty() {
            DEFAULT_CARD_TITLE
        } else {
            &self.card_title
        }
    }

    /// Formats the card's ID line for a given calendar year.
    ///
    /// The numeric part is the sum of the UTF-16 code units of the trainer
    /// name, zero-padded to at least five digits. Longer sums are printed in
    /// full rather than truncated.
    ///
    /// # Example
    ///
    /// ```ignore
    /// assert_eq!(trainer.id_line(2026), "ID No. 01037 - 2026");
    /// ```
    pub fn id_line(&self, year: i32) -> String {
        let hash: u64 = self.name.encode_utf16().map(u64::from).sum();
        format!("ID No. {:05} - {}", hash, year)
    }

    /// File name for a card export download.
    ///
    /// The trainer name is lowercased, every whitespace character becomes an
    /// underscore, and the `_trainer_card.png` suffix is appended.
    pub fn export_file_name(&self) -> String {
        let stem: String = self
            .name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!("{}_trainer_card.png", stem)
    }

    /// Writes a badge into a slot that is already known to be in range.
    fn insert_badge(&mut self, slot: usize, image: String) -> &Badge {
        self.badge_seq += 1;
        let badge = Badge {
            id: format!("badge-{}-{}", slot, self.badge_seq),
            image,
        };
        self.badges[slot].insert(badge)
    }
}

/// A single-use team picker context.
///
/// Created when a picker opens for a specific slot and consumed by
/// [`apply`](Self::apply) or [`clear`](Self::clear) when it closes. The type
/// is deliberately not `Clone`, so one opened picker can commit at most one
/// slot write.
#[derive(Debug, PartialEq, Eq)]
pub struct TeamSelection {
    slot: usize,
}

impl TeamSelection {
    /// Opens a picker for a team slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TeamSlotOutOfRange`] if `slot >= TEAM_SIZE`.
    pub fn begin(slot: usize) -> Result<Self, CardError> {
        if slot >= TEAM_SIZE {
            return Err(CardError::TeamSlotOutOfRange { slot });
        }
        Ok(Self { slot })
    }

    /// Slot this picker targets.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Commits the picked species into the target slot.
    pub fn apply(self, trainer: &mut Trainer, species: Species) {
        trainer.team[self.slot] = Some(species);
    }

    /// Closes the picker by emptying the target slot.
    pub fn clear(self, trainer: &mut Trainer) {
        trainer.team[self.slot] = None;
    }
}

/// A single-use badge upload context, mirroring [`TeamSelection`].
#[derive(Debug, PartialEq, Eq)]
pub struct BadgeSelection {
    slot: usize,
}

impl BadgeSelection {
    /// Opens an upload context for a badge slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::BadgeSlotOutOfRange`] if `slot >= BADGE_SLOTS`.
    pub fn begin(slot: usize) -> Result<Self, CardError> {
        if slot >= BADGE_SLOTS {
            return Err(CardError::BadgeSlotOutOfRange { slot });
        }
        Ok(Self { slot })
    }

    /// Slot this upload targets.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Commits the uploaded image into the target slot and returns the
    /// freshly minted badge.
    pub fn apply(self, trainer: &mut Trainer, image: String) -> &Badge {
        trainer.insert_badge(self.slot, image)
    }

    /// Closes the upload by emptying the target slot.
    pub fn clear(self, trainer: &mut Trainer) {
        trainer.badges[self.slot] = None;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
