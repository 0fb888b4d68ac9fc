//! One game session driven from the terminal.

use debate_core::{
    EndReason, GameAction, GameEvent, GamePhase, GameState, RollSource, WheelOutcome,
    CARDS_TO_WIN,
};
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::protocol::{Command, HELP};

/// Seconds left on a card when the host prints a reminder
const CARD_WARNING: u32 = 10;

/// Owns the engine and turns its events into lines of text
pub struct Session<R: RollSource = StdRng> {
    game: GameState<R>,
}

impl<R: RollSource> Session<R> {
    pub fn new(game: GameState<R>) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    /// Run one command. Refused requests print the reason and change nothing.
    pub fn handle(&mut self, command: &Command) -> Vec<String> {
        match command {
            Command::Status => return self.board(),
            Command::Json => {
                return match serde_json::to_string(&self.game.snapshot()) {
                    Ok(json) => vec![json],
                    Err(e) => vec![format!("! {e}")],
                }
            }
            Command::Help => return HELP.lines().map(str::to_string).collect(),
            _ => {}
        }
        let Some(action) = command.action() else {
            return Vec::new();
        };
        self.apply(action)
    }

    /// Advance the engine by one second
    pub fn tick(&mut self) -> Vec<String> {
        let mut lines = self.apply(GameAction::Tick);
        if self.game.current_card().is_some()
            && self.game.card_timer().is_running()
            && self.game.card_timer().remaining() == CARD_WARNING
            && self.game.config().card_seconds > CARD_WARNING
        {
            lines.push(format!("{CARD_WARNING} seconds left!"));
        }
        lines
    }

    fn apply(&mut self, action: GameAction) -> Vec<String> {
        match self.game.apply_action(action) {
            Ok(events) => {
                let mut lines: Vec<String> = events.iter().map(|e| self.describe(e)).collect();
                if events
                    .iter()
                    .any(|e| matches!(e, GameEvent::GameStarted { .. } | GameEvent::GameOver { .. }))
                {
                    lines.extend(self.board());
                }
                lines
            }
            Err(e) => {
                debug!(error = %e, "request refused");
                vec![format!("! {e}")]
            }
        }
    }

    fn name(&self, group: usize) -> &str {
        self.game
            .group(group)
            .map(|g| g.name.as_str())
            .unwrap_or("?")
    }

    fn describe(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::GroupCreated { group, name, color } => {
                format!("Group {} \"{name}\" plays the {color} deck", group + 1)
            }
            GameEvent::RollPhaseStarted => {
                "All four groups are in. Roll for order with `roll`.".to_string()
            }
            GameEvent::SpinStarted { group } => {
                format!("The wheel spins for {}...", self.name(*group))
            }
            GameEvent::InitialRollRecorded { group, roll } => {
                format!("{} rolled {roll}", self.name(*group))
            }
            GameEvent::GameStarted {
                starting_group,
                roll,
            } => {
                info!(group = starting_group, "game started");
                format!(
                    "{} starts with the lowest roll ({roll})",
                    self.name(*starting_group)
                )
            }
            GameEvent::WheelStopped { roll, outcome, .. } => {
                let what = match outcome {
                    WheelOutcome::Card(_) => "card",
                    WheelOutcome::Reverse => "reverse",
                    WheelOutcome::Borrow => "borrow a card",
                    WheelOutcome::ExtraTurn => "extra turn",
                    WheelOutcome::Skip => "lose the turn",
                };
                format!("Wheel: {roll} ({what})")
            }
            GameEvent::CardDealt {
                group,
                card,
                borrowed_from,
            } => {
                let from = borrowed_from
                    .map(|lender| format!(", borrowed from {}", self.name(lender)))
                    .unwrap_or_default();
                format!(
                    "[{} #{}{from}] {}\n  {}, agree or disagree? ({} s)",
                    card.deck,
                    card.id,
                    card.text,
                    self.name(*group),
                    self.game.config().card_seconds
                )
            }
            GameEvent::DeckExhausted { deck, .. } => {
                format!("The {deck} deck has no cards left")
            }
            GameEvent::DirectionChanged { clockwise } => {
                format!("Direction is now {}", direction(*clockwise))
            }
            GameEvent::ExtraTurnGranted { group, banked } => {
                format!("Extra turn for {} ({banked} banked)", self.name(*group))
            }
            GameEvent::ExtraTurnUsed { group, remaining } => {
                format!("{} plays again ({remaining} banked)", self.name(*group))
            }
            GameEvent::CardAnswered {
                group,
                card_id,
                agree,
            } => {
                let verb = if *agree { "agrees" } else { "disagrees" };
                format!("{} {verb} with card #{card_id}", self.name(*group))
            }
            GameEvent::CardClosed { group } => format!("{} closed the card", self.name(*group)),
            GameEvent::CardTimeUp { group } => format!("Time's up for {}!", self.name(*group)),
            GameEvent::TurnPassed { to, .. } => format!("Turn: {}", self.name(*to)),
            GameEvent::Celebration => "*** Congratulations! ***".to_string(),
            GameEvent::GameOver { reason } => match reason {
                EndReason::Completed { group } => {
                    info!(group, "game completed");
                    format!(
                        "Game over: {} answered all {CARDS_TO_WIN} cards",
                        self.name(*group)
                    )
                }
                EndReason::TimeUp => {
                    info!("game timed out");
                    "Game over: time is up".to_string()
                }
            },
        }
    }

    /// Text rendering of the snapshot
    pub fn board(&self) -> Vec<String> {
        let snapshot = self.game.snapshot();
        let mut lines = Vec::new();

        let phase = match snapshot.phase {
            GamePhase::Setup => "setup",
            GamePhase::InitialRoll => "rolling for order",
            GamePhase::Playing => "playing",
            GamePhase::Ended { .. } => "ended",
        };
        lines.push(format!(
            "-- {phase} | {} left | {} --",
            clock(snapshot.game_seconds_left),
            direction(snapshot.clockwise)
        ));

        for (index, group) in snapshot.groups.iter().enumerate() {
            let marker = if snapshot.active_group == Some(index) {
                '>'
            } else {
                ' '
            };
            let mut line = format!(
                "{marker} {}. {} [{}] {}/{CARDS_TO_WIN}",
                index + 1,
                group.name,
                group.color,
                group.card_count()
            );
            if group.card_count() > 0 {
                line.push_str(&format!(" ({} agreed)", group.agreed_count()));
            }
            if let Some(roll) = snapshot.initial_rolls.iter().find(|r| r.group == index) {
                line.push_str(&format!(" rolled {}", roll.roll));
            }
            lines.push(line);
        }

        match snapshot.phase {
            GamePhase::Setup => {
                let colors: Vec<&str> = snapshot.available_colors.iter().map(|c| c.key()).collect();
                lines.push(format!("Free colors: {}", colors.join(", ")));
            }
            GamePhase::InitialRoll => {
                if let Some(first) = snapshot.starting_group {
                    lines.push(format!(
                        "{} will start, type `start`",
                        self.name(first.group)
                    ));
                }
            }
            _ => {}
        }

        if snapshot.extra_turns > 0 {
            lines.push(format!("Extra turns: {}", snapshot.extra_turns));
        }
        if let (Some(current), Some(left)) = (&snapshot.current_card, snapshot.card_seconds_left)
        {
            lines.push(format!(
                "Card [{} #{}] {} ({})",
                current.card.deck,
                current.card.id,
                current.card.text,
                clock(left)
            ));
        }
        if snapshot.spinning {
            lines.push("The wheel is spinning".to_string());
        }

        lines
    }
}

fn direction(clockwise: bool) -> &'static str {
    if clockwise {
        "clockwise"
    } else {
        "counter-clockwise"
    }
}

fn clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_core::{DeckColor, GameConfig, ScriptedRolls};

    fn session(rolls: Vec<u8>, config: GameConfig) -> Session<ScriptedRolls> {
        let game = GameState::with_source(config, ScriptedRolls::new(5).with_rolls(rolls));
        Session::new(game)
    }

    fn instant() -> GameConfig {
        GameConfig {
            spin_seconds: 0,
            ..GameConfig::default()
        }
    }

    fn run(session: &mut Session<ScriptedRolls>, line: &str) -> Vec<String> {
        let command: Command = line.parse().unwrap();
        session.handle(&command)
    }

    fn add_groups(session: &mut Session<ScriptedRolls>) {
        run(session, "add red Rojo");
        run(session, "add green Verde");
        run(session, "add purple Violeta");
        run(session, "add blue Azul");
    }

    #[test]
    fn test_setup_through_first_card() {
        // Order rolls go last group first: Azul 9, Violeta 2, Verde 7, Rojo 4
        let mut session = session(vec![9, 2, 7, 4, 1], instant());
        add_groups(&mut session);
        assert_eq!(session.game().phase(), GamePhase::InitialRoll);

        for _ in 0..4 {
            run(&mut session, "roll");
        }
        let lines = run(&mut session, "start");
        assert_eq!(lines[0], "Violeta starts with the lowest roll (2)");
        assert!(lines.iter().any(|l| l.starts_with("> 3. Violeta [purple]")));

        let lines = run(&mut session, "spin");
        assert_eq!(lines[1], "Wheel: 1 (card)");
        assert!(lines[2].starts_with("[purple #2]"));

        let lines = run(&mut session, "agree");
        assert_eq!(
            lines,
            vec![
                "Violeta agrees with card #2".to_string(),
                "Turn: Azul".to_string()
            ]
        );
    }

    #[test]
    fn test_refused_request_prints_reason() {
        let mut session = session(Vec::new(), instant());
        run(&mut session, "add red Rojo");
        let lines = run(&mut session, "add red Otro");
        assert_eq!(lines, vec!["! Color red is already taken".to_string()]);
        assert_eq!(session.game().groups().len(), 1);

        let lines = run(&mut session, "spin");
        assert_eq!(lines, vec!["! Need 4 groups to play".to_string()]);
    }

    #[test]
    fn test_status_lists_free_colors() {
        let mut session = session(Vec::new(), instant());
        run(&mut session, "add green Verde");
        let lines = run(&mut session, "status");
        assert_eq!(lines[0], "-- setup | 30:00 left | clockwise --");
        assert_eq!(lines[1], "  1. Verde [green] 0/12");
        assert_eq!(lines[2], "Free colors: red, purple, blue");
    }

    #[test]
    fn test_ticks_drive_spin_and_card_warning() {
        let config = GameConfig {
            card_seconds: 12,
            ..GameConfig::default()
        };
        let mut session = session(vec![1, 5, 5, 5, 3], config);
        add_groups(&mut session);
        for group in 1..=4 {
            run(&mut session, &format!("roll {group}"));
            for _ in 0..3 {
                session.tick();
            }
        }
        run(&mut session, "start");

        let lines = run(&mut session, "spin");
        assert_eq!(lines, vec!["The wheel spins for Rojo...".to_string()]);
        assert!(session.tick().is_empty());
        assert!(session.tick().is_empty());
        let lines = session.tick();
        assert!(lines[1].starts_with("[red #"));

        assert!(session.tick().is_empty());
        assert_eq!(session.tick(), vec!["10 seconds left!".to_string()]);
    }

    #[test]
    fn test_game_over_by_time() {
        let config = GameConfig {
            game_seconds: 2,
            ..instant()
        };
        let mut session = session(vec![1, 5, 5, 5], config);
        add_groups(&mut session);
        for _ in 0..4 {
            run(&mut session, "roll");
        }
        run(&mut session, "start");

        assert!(session.tick().is_empty());
        let lines = session.tick();
        assert_eq!(lines[0], "Game over: time is up");
        assert!(lines[1].starts_with("-- ended | 00:00 left"));
        assert_eq!(
            run(&mut session, "spin"),
            vec!["! Game is over".to_string()]
        );
    }

    #[test]
    fn test_json_snapshot() {
        let mut session = session(Vec::new(), instant());
        run(&mut session, "add blue Azul");
        let lines = run(&mut session, "json");
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["phase"], "Setup");
        assert_eq!(value["groups"][0]["name"], "Azul");
        assert_eq!(value["groups"][0]["color"], "blue");
    }

    #[test]
    fn test_help() {
        let mut session = session(Vec::new(), instant());
        let lines = run(&mut session, "help");
        assert_eq!(lines[0], "Commands:");
        assert!(session.game().groups().is_empty());
        assert_eq!(session.game().available_colors(), DeckColor::ALL.to_vec());
    }
}
