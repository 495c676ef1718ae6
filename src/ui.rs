//! Floating text labels
//!
//! Labels mirror game events: health numbers over the player and each
//! enemy, the currency counter, the door caption and the prompt shown while
//! the room is open. Removing a label that is already gone is a no-op, so
//! teardown order never matters.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::consts::LABEL_OFFSET_Y;
use crate::sim::{EnemyId, GameEvent, GameState};

/// Which label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKey {
    Currency,
    DoorCaption,
    PlayerHealth,
    EnemyHealth(EnemyId),
    RoomPrompt,
}

/// Visual style, mapped to a font and color by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Hud,
    Caption,
    PlayerHealth,
    EnemyHealth,
    Warning,
}

impl LabelStyle {
    pub fn color(&self) -> &'static str {
        match self {
            LabelStyle::Hud | LabelStyle::Caption | LabelStyle::PlayerHealth => "#ffffff",
            LabelStyle::EnemyHealth | LabelStyle::Warning => "#ff0000",
        }
    }

    pub fn font_px(&self) -> u32 {
        match self {
            LabelStyle::Hud => 20,
            LabelStyle::Warning => 24,
            LabelStyle::Caption | LabelStyle::PlayerHealth | LabelStyle::EnemyHealth => 16,
        }
    }

    /// Whether `pos` is the label's center (otherwise its top-left corner)
    pub fn centered(&self) -> bool {
        !matches!(self, LabelStyle::Hud | LabelStyle::Caption)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub style: LabelStyle,
}

/// All labels currently on screen
#[derive(Debug, Clone, Default)]
pub struct LabelBoard {
    labels: BTreeMap<LabelKey, Label>,
}

const CURRENCY_POS: Vec2 = Vec2::new(16.0, 16.0);
const DOOR_CAPTION_OFFSET: Vec2 = Vec2::new(-20.0, 40.0);
const ROOM_PROMPT: &str = "Return to the blank room tab!";

fn above(pos: Vec2) -> Vec2 {
    pos - Vec2::new(0.0, LABEL_OFFSET_Y)
}

fn currency_text(currency: u64) -> String {
    format!("Currency: {}", currency)
}

impl LabelBoard {
    /// Labels for a freshly started scene
    pub fn new(state: &GameState) -> Self {
        let mut board = Self::default();
        board.set(
            LabelKey::DoorCaption,
            "Go through the door",
            state.tuning.door_pos + DOOR_CAPTION_OFFSET,
            LabelStyle::Caption,
        );
        board.show_scene_hud(state);
        for enemy in state.enemies.iter() {
            board.show_enemy(state, enemy.id);
        }
        board
    }

    pub fn set(&mut self, key: LabelKey, text: impl Into<String>, pos: Vec2, style: LabelStyle) {
        self.labels.insert(
            key,
            Label {
                text: text.into(),
                pos,
                style,
            },
        );
    }

    /// Change a label's text if it still exists
    pub fn set_text(&mut self, key: LabelKey, text: impl Into<String>) {
        if let Some(label) = self.labels.get_mut(&key) {
            label.text = text.into();
        }
    }

    /// Remove a label; returns false if it was already gone
    pub fn remove(&mut self, key: LabelKey) -> bool {
        self.labels.remove(&key).is_some()
    }

    pub fn get(&self, key: LabelKey) -> Option<&Label> {
        self.labels.get(&key)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabelKey, &Label)> {
        self.labels.iter()
    }

    /// Update labels for one game event
    pub fn apply(&mut self, event: &GameEvent, state: &GameState) {
        match event {
            GameEvent::BulletFired { .. } => {}
            GameEvent::EnemySpawned { id } => self.show_enemy(state, *id),
            GameEvent::EnemyHit { id, health } => {
                self.set_text(LabelKey::EnemyHealth(*id), health.to_string())
            }
            GameEvent::EnemyKilled { id } => {
                self.remove(LabelKey::EnemyHealth(*id));
            }
            GameEvent::EnemiesCleared { ids } => {
                for id in ids {
                    self.remove(LabelKey::EnemyHealth(*id));
                }
            }
            GameEvent::PlayerHit { health } => {
                self.set_text(LabelKey::PlayerHealth, health.to_string())
            }
            GameEvent::PlayerDied => {
                self.remove(LabelKey::PlayerHealth);
            }
            GameEvent::CurrencyChanged { currency } => {
                self.set_text(LabelKey::Currency, currency_text(*currency))
            }
            GameEvent::RoomOpened { .. } => {
                self.remove(LabelKey::Currency);
                self.remove(LabelKey::PlayerHealth);
                self.set(LabelKey::RoomPrompt, ROOM_PROMPT, state.center(), LabelStyle::Warning);
            }
            GameEvent::RoomClosed { .. } => {
                self.remove(LabelKey::RoomPrompt);
                self.show_scene_hud(state);
            }
        }
    }

    /// Apply a batch of events in order
    pub fn apply_all(&mut self, events: &[GameEvent], state: &GameState) {
        for event in events {
            self.apply(event, state);
        }
    }

    /// Keep health labels over their bodies
    pub fn follow(&mut self, state: &GameState) {
        if let Some(label) = self.labels.get_mut(&LabelKey::PlayerHealth) {
            label.pos = above(state.player.pos);
        }
        for enemy in state.enemies.iter() {
            if let Some(label) = self.labels.get_mut(&LabelKey::EnemyHealth(enemy.id)) {
                label.pos = above(enemy.pos);
            }
        }
    }

    fn show_scene_hud(&mut self, state: &GameState) {
        self.set(
            LabelKey::Currency,
            currency_text(state.currency),
            CURRENCY_POS,
            LabelStyle::Hud,
        );
        if state.player.is_alive() {
            self.set(
                LabelKey::PlayerHealth,
                state.player.health.to_string(),
                above(state.player.pos),
                LabelStyle::PlayerHealth,
            );
        }
    }

    fn show_enemy(&mut self, state: &GameState, id: EnemyId) {
        // May already be dead by the time the event is applied
        if let Some(enemy) = state.enemies.get(id) {
            self.set(
                LabelKey::EnemyHealth(id),
                enemy.health.to_string(),
                above(enemy.pos),
                LabelStyle::EnemyHealth,
            );
        }
    }
}
