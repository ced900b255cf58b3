//! WebAssembly bindings for the tactics engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::config::GameConfig;
use crate::game::GameState;
use crate::player::Player;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game on a `width` x `height` board
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, starting_credits: u32) -> Result<WasmGame, JsValue> {
        let config = GameConfig::new(width, height, starting_credits)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame {
            state: GameState::with_config(config),
        })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.state.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the side to move ("blue" or "red")
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> String {
        self.state.current_player.to_string()
    }

    /// Get valid actions as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        let actions = self.state.valid_actions();
        serde_json::to_string(&actions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply an action from JSON and return the notices it produced as JSON.
    ///
    /// A rejected action is not a JS error: its notice (if any) is returned
    /// the same way. Only malformed JSON throws.
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        let transition = self.state.reduce(action);
        let notices = transition.notices();
        self.state = transition.state;

        Ok(serde_json::to_string(&notices).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Get the winner ("blue" or "red") if the game is finished
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.state.winner().map(|p| p.to_string())
    }

    /// Get the current phase as JSON
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(&self.state.phase).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Get remaining credits for "blue" or "red"
    #[wasm_bindgen(js_name = getCredits)]
    pub fn get_credits(&self, player: &str) -> Result<u32, JsValue> {
        let player = match player {
            "blue" => Player::Blue,
            "red" => Player::Red,
            other => return Err(JsValue::from_str(&format!("Unknown player: {}", other))),
        };
        Ok(self.state.credits.get(player))
    }
}
