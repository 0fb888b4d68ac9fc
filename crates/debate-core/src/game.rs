//! Core game state machine.
//!
//! This module contains the `GameState` turn engine: group setup, the
//! pre-game order rolls, wheel resolution, card answering and the two
//! countdowns that can end a card or the whole game.

use crate::actions::{GameAction, GameEvent};
use crate::cards::DeckColor;
use crate::config::GameConfig;
use crate::deck::{DealtCard, DeckAllocator};
use crate::group::{starting_group, Group, GroupId, InitialRoll, Response};
use crate::timer::Countdown;
use crate::wheel::{RollSource, WheelOutcome, PRE_GAME_FACES, WHEEL_FACES};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Groups needed to play (and the most that may join)
pub const MIN_GROUPS: usize = 4;

/// Answered cards that end the game
pub const CARDS_TO_WIN: usize = 12;

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A group answered all its cards
    Completed { group: usize },
    /// The game countdown ran out
    TimeUp,
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Groups are being registered
    Setup,
    /// Every group rolls once; the lowest roll starts
    InitialRoll,
    /// Turns are being played
    Playing,
    /// Game is over
    Ended { reason: EndReason },
}

/// Reasons a request is refused. State is never changed by a refused request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("All groups have already joined")]
    RosterFull,

    #[error("Color {0} is already taken")]
    ColorTaken(DeckColor),

    #[error("Group name can't be empty")]
    BlankName,

    #[error("Need 4 groups to play")]
    NotEnoughGroups,

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("The wheel is already spinning")]
    SpinInProgress,

    #[error("A card is waiting for an answer")]
    CardPending,

    #[error("No card to answer")]
    NoCard,

    #[error("No group at index {0}")]
    NoSuchGroup(usize),

    #[error("Group {0} has already rolled")]
    AlreadyRolled(usize),

    #[error("Every group must roll first")]
    RollsIncomplete,

    #[error("Game is over")]
    GameOver,
}

/// The card on the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCard {
    pub card: DealtCard,
    /// Group answering it
    pub group: usize,
    /// Lending group, for borrowed cards
    pub borrowed_from: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinTarget {
    /// Pre-game order roll for a group
    Order(usize),
    /// In-game spin for the active group
    Turn(usize),
}

impl SpinTarget {
    fn group(&self) -> usize {
        match self {
            SpinTarget::Order(group) | SpinTarget::Turn(group) => *group,
        }
    }
}

/// A spin waiting for its delay to elapse
#[derive(Debug, Clone)]
struct PendingSpin {
    target: SpinTarget,
    delay: Countdown,
}

/// Read-only projection handed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub groups: Vec<Group>,
    pub active_group: Option<usize>,
    pub clockwise: bool,
    pub extra_turns: u8,
    pub current_card: Option<CurrentCard>,
    pub last_spin: Option<u8>,
    pub spinning: bool,
    pub initial_rolls: Vec<InitialRoll>,
    /// Preview of who starts, once every group has rolled
    pub starting_group: Option<InitialRoll>,
    pub available_colors: Vec<DeckColor>,
    /// Seconds left on the card countdown while a card is shown
    pub card_seconds_left: Option<u32>,
    pub game_seconds_left: u32,
    /// Cards still dealable, per deck
    pub cards_remaining: Vec<(DeckColor, usize)>,
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RollSource = StdRng> {
    config: GameConfig,
    phase: GamePhase,
    groups: Vec<Group>,
    next_group_id: GroupId,
    /// Index of the group whose turn it is
    active_group: Option<usize>,
    clockwise: bool,
    /// Banked extra turns
    extra_turns: u8,
    current_card: Option<CurrentCard>,
    /// Discarded once play starts
    initial_rolls: Vec<InitialRoll>,
    decks: DeckAllocator,
    pending_spin: Option<PendingSpin>,
    last_spin: Option<u8>,
    card_timer: Countdown,
    game_timer: Countdown,
    rng: R,
}

impl GameState<StdRng> {
    /// Create a new session with default timings
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Create a new session with custom timings
    pub fn with_config(config: GameConfig) -> Self {
        Self::with_source(config, StdRng::from_entropy())
    }

    /// Create a reproducible session
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_source(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for GameState<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RollSource> GameState<R> {
    /// Create a new session drawing its randomness from `rng`
    pub fn with_source(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            phase: GamePhase::Setup,
            groups: Vec::with_capacity(MIN_GROUPS),
            next_group_id: 1,
            active_group: None,
            clockwise: true,
            extra_turns: 0,
            current_card: None,
            initial_rolls: Vec::with_capacity(MIN_GROUPS),
            decks: DeckAllocator::new(),
            pending_spin: None,
            last_spin: None,
            card_timer: Countdown::new(config.card_seconds),
            game_timer: Countdown::new(config.game_seconds),
            rng,
        }
    }

    // ==================== Queries ====================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn active_group(&self) -> Option<usize> {
        self.active_group
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn extra_turns(&self) -> u8 {
        self.extra_turns
    }

    pub fn current_card(&self) -> Option<&CurrentCard> {
        self.current_card.as_ref()
    }

    pub fn initial_rolls(&self) -> &[InitialRoll] {
        &self.initial_rolls
    }

    pub fn decks(&self) -> &DeckAllocator {
        &self.decks
    }

    pub fn last_spin(&self) -> Option<u8> {
        self.last_spin
    }

    pub fn is_spinning(&self) -> bool {
        self.pending_spin.is_some()
    }

    /// The wheel's randomness, e.g. to queue rolls on a [`crate::ScriptedRolls`]
    pub fn roll_source_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn card_timer(&self) -> &Countdown {
        &self.card_timer
    }

    pub fn game_timer(&self) -> &Countdown {
        &self.game_timer
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Ended { .. })
    }

    /// The group that answered all its cards, if that is how the game ended
    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            GamePhase::Ended {
                reason: EndReason::Completed { group },
            } => Some(group),
            _ => None,
        }
    }

    /// Palette colors no group has taken yet
    pub fn available_colors(&self) -> Vec<DeckColor> {
        DeckColor::ALL
            .into_iter()
            .filter(|c| !self.groups.iter().any(|g| g.color == *c))
            .collect()
    }

    /// Who will start, once every group has rolled
    pub fn starting_group(&self) -> Option<InitialRoll> {
        if self.groups.len() < MIN_GROUPS || self.initial_rolls.len() < self.groups.len() {
            return None;
        }
        starting_group(&self.initial_rolls)
    }

    /// Group that gets a borrowed card: the one before `group` in turn order
    pub fn previous_group(&self, group: usize) -> Option<usize> {
        let n = self.groups.len();
        if n == 0 {
            return None;
        }
        Some(if self.clockwise {
            (group + n - 1) % n
        } else {
            (group + 1) % n
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            groups: self.groups.clone(),
            active_group: self.active_group,
            clockwise: self.clockwise,
            extra_turns: self.extra_turns,
            current_card: self.current_card.clone(),
            last_spin: self.last_spin,
            spinning: self.is_spinning(),
            initial_rolls: self.initial_rolls.clone(),
            starting_group: self.starting_group(),
            available_colors: self.available_colors(),
            card_seconds_left: self
                .current_card
                .as_ref()
                .map(|_| self.card_timer.remaining()),
            game_seconds_left: self.game_timer.remaining(),
            cards_remaining: DeckColor::ALL
                .into_iter()
                .map(|c| (c, self.decks.remaining(c)))
                .collect(),
        }
    }

    // ==================== Actions ====================

    /// Apply a UI or timer request to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::CreateGroup { name, color } => self.create_group(&name, color),
            GameAction::RollForOrder { group } => self.roll_for_order(group),
            GameAction::StartGame => self.start_game(),
            GameAction::Spin => self.spin(),
            GameAction::Respond { agree } => self.respond(agree),
            GameAction::CloseCard => self.close_card(),
            GameAction::CardTimeUp => self.card_time_up(),
            GameAction::GameTimeUp => self.game_time_up(),
            GameAction::Tick => self.tick(),
        }
    }

    /// Register a group. The fourth group opens the order rolls.
    pub fn create_group(
        &mut self,
        name: &str,
        color: DeckColor,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.groups.len() >= MIN_GROUPS {
            return Err(GameError::RosterFull);
        }
        if self.phase != GamePhase::Setup {
            return Err(GameError::InvalidPhase);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::BlankName);
        }
        if self.groups.iter().any(|g| g.color == color) {
            return Err(GameError::ColorTaken(color));
        }

        let index = self.groups.len();
        self.groups
            .push(Group::new(self.next_group_id, name.to_string(), color));
        self.next_group_id += 1;
        debug!(group = index, group_name = name, %color, "group created");

        let mut events = vec![GameEvent::GroupCreated {
            group: index,
            name: name.to_string(),
            color,
        }];

        if self.groups.len() == MIN_GROUPS {
            self.phase = GamePhase::InitialRoll;
            debug!("all groups in, rolling for order");
            events.push(GameEvent::RollPhaseStarted);
        }

        Ok(events)
    }

    /// Roll the pre-game wheel for one group
    pub fn roll_for_order(&mut self, group: usize) -> Result<Vec<GameEvent>, GameError> {
        self.require_phase(GamePhase::InitialRoll)?;
        if self.pending_spin.is_some() {
            return Err(GameError::SpinInProgress);
        }
        if group >= self.groups.len() {
            return Err(GameError::NoSuchGroup(group));
        }
        if self.initial_rolls.iter().any(|r| r.group == group) {
            return Err(GameError::AlreadyRolled(group));
        }

        Ok(self.arm_spin(SpinTarget::Order(group)))
    }

    /// Confirm the lowest roller and start play
    pub fn start_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require_phase(GamePhase::InitialRoll)?;
        if self.pending_spin.is_some() {
            return Err(GameError::SpinInProgress);
        }
        let winner = self.starting_group().ok_or(GameError::RollsIncomplete)?;

        self.active_group = Some(winner.group);
        self.phase = GamePhase::Playing;
        self.initial_rolls.clear();
        self.game_timer.start();
        debug!(group = winner.group, roll = winner.roll, "game started");

        Ok(vec![GameEvent::GameStarted {
            starting_group: winner.group,
            roll: winner.roll,
        }])
    }

    /// Spin the wheel.
    ///
    /// Before play this rolls for the next group that has no roll yet,
    /// starting from the last group created. During play it spins for the
    /// active group. The roll commits once the spin delay has elapsed.
    pub fn spin(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.pending_spin.is_some() {
            return Err(GameError::SpinInProgress);
        }
        match self.phase {
            GamePhase::Setup => Err(GameError::NotEnoughGroups),
            GamePhase::Ended { .. } => Err(GameError::GameOver),
            GamePhase::InitialRoll => {
                let group = (0..self.groups.len())
                    .rev()
                    .find(|g| !self.initial_rolls.iter().any(|r| r.group == *g))
                    .ok_or(GameError::InvalidPhase)?;
                self.roll_for_order(group)
            }
            GamePhase::Playing => {
                if self.current_card.is_some() {
                    return Err(GameError::CardPending);
                }
                let group = self.active_group.ok_or(GameError::InvalidPhase)?;
                Ok(self.arm_spin(SpinTarget::Turn(group)))
            }
        }
    }

    /// Answer the current card
    pub fn respond(&mut self, agree: bool) -> Result<Vec<GameEvent>, GameError> {
        self.require_playing()?;
        let group = self
            .current_card
            .as_ref()
            .map(|c| c.group)
            .ok_or(GameError::NoCard)?;
        if group >= self.groups.len() {
            debug_assert!(false, "card held by unknown group {group}");
            return Err(GameError::NoSuchGroup(group));
        }

        self.card_timer.stop();
        let Some(current) = self.current_card.take() else {
            return Err(GameError::NoCard);
        };

        let owner = &mut self.groups[group];
        owner
            .responses
            .push(Response::new(&current.card, agree, current.borrowed_from));
        let answered = owner.card_count();
        debug!(group, card = current.card.id, agree, answered, "card answered");

        let mut events = vec![GameEvent::CardAnswered {
            group,
            card_id: current.card.id,
            agree,
        }];

        if answered >= CARDS_TO_WIN {
            events.extend(self.end_game(EndReason::Completed { group }));
            events.push(GameEvent::Celebration);
        } else if self.extra_turns > 0 {
            self.extra_turns -= 1;
            events.push(GameEvent::ExtraTurnUsed {
                group,
                remaining: self.extra_turns,
            });
        } else {
            events.extend(self.advance_turn());
        }

        Ok(events)
    }

    /// Dismiss the current card without answering. The card stays used.
    pub fn close_card(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require_playing()?;
        let current = self.current_card.take().ok_or(GameError::NoCard)?;
        self.card_timer.stop();
        debug!(group = current.group, card = current.card.id, "card closed");

        let mut events = vec![GameEvent::CardClosed {
            group: current.group,
        }];
        events.extend(self.advance_turn());
        Ok(events)
    }

    /// The card countdown ran out. Banked extra turns are kept.
    pub fn card_time_up(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require_playing()?;
        let current = self.current_card.take().ok_or(GameError::NoCard)?;
        self.card_timer.stop();
        debug!(group = current.group, card = current.card.id, "card timed out");

        let mut events = vec![GameEvent::CardTimeUp {
            group: current.group,
        }];
        events.extend(self.advance_turn());
        Ok(events)
    }

    /// The game countdown ran out
    pub fn game_time_up(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require_playing()?;
        Ok(self.end_game(EndReason::TimeUp))
    }

    /// Advance every armed countdown by one second
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        if self.is_finished() {
            return Ok(events);
        }

        if self.game_timer.tick() {
            events.extend(self.game_time_up()?);
            return Ok(events);
        }

        let spin_done = self
            .pending_spin
            .as_mut()
            .map(|spin| spin.delay.tick())
            .unwrap_or(false);

        if spin_done {
            if let Some(spin) = self.pending_spin.take() {
                events.extend(self.commit_spin(spin.target));
            }
        } else if self.card_timer.tick() {
            events.extend(self.card_time_up()?);
        }

        Ok(events)
    }

    /// Pass the turn to the next group in the current direction.
    ///
    /// Does nothing once the game has ended.
    pub fn advance_turn(&mut self) -> Vec<GameEvent> {
        if self.is_finished() {
            return Vec::new();
        }
        let Some(from) = self.active_group else {
            return Vec::new();
        };
        let n = self.groups.len();
        debug_assert!(from < n, "active group {from} out of range");

        let to = if self.clockwise {
            (from + 1) % n
        } else {
            (from + n - 1) % n
        };
        self.active_group = Some(to);
        debug!(from, to, clockwise = self.clockwise, "turn passed");

        vec![GameEvent::TurnPassed { from, to }]
    }

    // ==================== Helper Methods ====================

    fn require_phase(&self, phase: GamePhase) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if self.phase != phase {
            return Err(GameError::InvalidPhase);
        }
        Ok(())
    }

    fn require_playing(&self) -> Result<(), GameError> {
        self.require_phase(GamePhase::Playing)
    }

    /// Start the wheel. With no configured delay the roll commits at once.
    fn arm_spin(&mut self, target: SpinTarget) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::SpinStarted {
            group: target.group(),
        }];

        if self.config.spin_seconds == 0 {
            events.extend(self.commit_spin(target));
        } else {
            let mut delay = Countdown::new(self.config.spin_seconds);
            delay.start();
            self.pending_spin = Some(PendingSpin { target, delay });
        }

        events
    }

    fn commit_spin(&mut self, target: SpinTarget) -> Vec<GameEvent> {
        match target {
            SpinTarget::Order(group) => {
                let roll = self.rng.roll(PRE_GAME_FACES);
                self.last_spin = Some(roll);
                self.initial_rolls.push(InitialRoll { group, roll });
                debug!(group, roll, "order roll recorded");
                vec![GameEvent::InitialRollRecorded { group, roll }]
            }
            SpinTarget::Turn(group) => {
                let roll = self.rng.roll(WHEEL_FACES);
                self.last_spin = Some(roll);
                self.resolve_roll(group, roll)
            }
        }
    }

    fn resolve_roll(&mut self, group: usize, roll: u8) -> Vec<GameEvent> {
        debug_assert!(group < self.groups.len(), "spin for unknown group {group}");
        let outcome = WheelOutcome::from_roll(roll);
        debug!(group, roll, ?outcome, "wheel stopped");

        let mut events = vec![GameEvent::WheelStopped {
            group,
            roll,
            outcome,
        }];

        match outcome {
            WheelOutcome::Card(value) => {
                let color = self.groups[group].color;
                match self
                    .decks
                    .draw(color, &[], |available| value as usize % available)
                {
                    Some(card) => events.extend(self.show_card(group, card, None)),
                    None => {
                        events.push(GameEvent::DeckExhausted { group, deck: color });
                        events.extend(self.advance_turn());
                    }
                }
            }

            WheelOutcome::Reverse => {
                self.clockwise = !self.clockwise;
                events.push(GameEvent::DirectionChanged {
                    clockwise: self.clockwise,
                });
                events.extend(self.advance_turn());
            }

            WheelOutcome::Borrow => {
                let Some(lender) = self.previous_group(group) else {
                    return events;
                };
                let excluded = self.groups[lender].answered_ids();
                let color = self.groups[lender].color;
                let rng = &mut self.rng;

                match self
                    .decks
                    .draw(color, &excluded, |available| rng.pick(available))
                {
                    Some(card) => events.extend(self.show_card(group, card, Some(lender))),
                    None => {
                        events.push(GameEvent::DeckExhausted { group, deck: color });
                        events.extend(self.advance_turn());
                    }
                }
            }

            WheelOutcome::ExtraTurn => {
                self.extra_turns = self.extra_turns.saturating_add(1);
                events.push(GameEvent::ExtraTurnGranted {
                    group,
                    banked: self.extra_turns,
                });
                events.extend(self.arm_spin(SpinTarget::Turn(group)));
            }

            WheelOutcome::Skip => {
                events.extend(self.advance_turn());
            }
        }

        events
    }

    fn show_card(
        &mut self,
        group: usize,
        card: DealtCard,
        borrowed_from: Option<usize>,
    ) -> Vec<GameEvent> {
        self.current_card = Some(CurrentCard {
            card: card.clone(),
            group,
            borrowed_from,
        });
        self.card_timer.start();

        vec![GameEvent::CardDealt {
            group,
            card,
            borrowed_from,
        }]
    }

    fn end_game(&mut self, reason: EndReason) -> Vec<GameEvent> {
        self.phase = GamePhase::Ended { reason };
        self.current_card = None;
        self.pending_spin = None;
        self.card_timer.stop();
        self.game_timer.stop();
        debug!(?reason, "game over");

        vec![GameEvent::GameOver { reason }]
    }
}
