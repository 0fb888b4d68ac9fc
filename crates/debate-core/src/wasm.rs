//! WebAssembly bindings for the debate turn engine.
//!
//! This module exposes the engine to a JavaScript UI through wasm-bindgen.
//! The page owns the 1-second interval and calls `tick` from it.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{GameAction, GameEvent};
#[cfg(feature = "wasm")]
use crate::cards::DeckColor;
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::game::{GameError, GameState};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn events_json(result: Result<Vec<GameEvent>, GameError>) -> Result<String, JsValue> {
    match result {
        Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new session. `config_json` may be empty for default timings.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: Option<u64>) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            serde_json::from_str(config_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let state = match seed {
            Some(seed) => GameState::with_seed(config, seed),
            None => GameState::with_config(config),
        };
        Ok(WasmGame { state })
    }

    /// Get the current snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current phase as JSON
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(&self.state.phase()).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Colors still free, as a JSON array of keys
    #[wasm_bindgen(js_name = availableColors)]
    pub fn available_colors(&self) -> String {
        serde_json::to_string(&self.state.available_colors()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = createGroup)]
    pub fn create_group(&mut self, name: &str, color: &str) -> Result<String, JsValue> {
        let color: DeckColor = color
            .parse()
            .map_err(|e: crate::cards::UnknownColor| JsValue::from_str(&e.to_string()))?;
        events_json(self.state.create_group(name, color))
    }

    pub fn spin(&mut self) -> Result<String, JsValue> {
        events_json(self.state.spin())
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) -> Result<String, JsValue> {
        events_json(self.state.start_game())
    }

    pub fn respond(&mut self, agree: bool) -> Result<String, JsValue> {
        events_json(self.state.respond(agree))
    }

    #[wasm_bindgen(js_name = closeCard)]
    pub fn close_card(&mut self) -> Result<String, JsValue> {
        events_json(self.state.close_card())
    }

    /// Advance all countdowns by one second
    pub fn tick(&mut self) -> Result<String, JsValue> {
        events_json(self.state.tick())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;
        events_json(self.state.apply_action(action))
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}
