//! Main scene / secondary room orchestration
//!
//! The session owns the game state and drives the tick. Touching the door
//! parks the main scene and opens the room in another window, carrying the
//! balance in the URL. While the room is open each update only checks the
//! room watch; once the room reports closed, the balance is re-read from
//! the URL and the main scene resumes.

use crate::consts::ROOM_PAGE;
use crate::platform::query;
use crate::platform::{RoomPortal, RoomSignal, RoomWatch};
use crate::sim::{GameState, Phase, TickInput, tick};

pub struct Session<P: RoomPortal> {
    state: GameState,
    portal: P,
    room: Option<RoomWatch>,
}

impl<P: RoomPortal> Session<P> {
    pub fn new(state: GameState, portal: P) -> Self {
        log::info!(
            "Session started (seed {}, currency {})",
            state.seed,
            state.currency
        );
        Self {
            state,
            portal,
            room: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn portal(&self) -> &P {
        &self.portal
    }

    pub fn portal_mut(&mut self) -> &mut P {
        &mut self.portal
    }

    pub fn is_room_open(&self) -> bool {
        self.room.is_some()
    }

    /// One frame step: resume from the room if it closed, otherwise tick.
    pub fn update(&mut self, input: &TickInput, dt_ms: f32) {
        if !self.poll_room() {
            return;
        }

        tick(&mut self.state, input, dt_ms);

        if self.state.phase == Phase::RoomOpen && self.room.is_none() {
            self.open_room();
        }
    }

    /// Returns true when the main scene may run this frame
    fn poll_room(&mut self) -> bool {
        let Some(watch) = &self.room else {
            return true;
        };
        match watch.poll() {
            None => false,
            Some(RoomSignal::Closed) => {
                self.room = None;
                let returned = query::currency_from_query(&self.portal.query());
                self.state.leave_room(returned);
                log::info!("Back from the room (currency {})", self.state.currency);
                true
            }
        }
    }

    fn open_room(&mut self) {
        let url = query::room_url(ROOM_PAGE, self.state.currency);
        match self.portal.open(&url) {
            Ok(watch) => {
                log::info!("Opened room: {}", url);
                self.room = Some(watch);
            }
            Err(e) => {
                log::warn!("Could not open room ({}), resuming", e);
                self.state.leave_room(None);
            }
        }
    }
}
