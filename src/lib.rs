pub mod engine;
pub mod world;

use log::debug;

use engine::{Output, handle_step, render_map, render_room, try_handle_build, try_handle_movement};
use world::{Player, World};

pub use world::{load_world_from_file, load_world_from_str};

pub struct GameState {
    pub world: World,
    pub player: Player,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the initial render.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
                initialized: false,
            })
        }

        /// Initialize the game and return the initial render output.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            self.initialized = true;
            match self.state.initialize() {
                Some(out) => to_value(&WasmStepResult {
                    blocks: out.blocks,
                    quit: false,
                })
                .unwrap_or(JsValue::NULL),
                None => JsValue::NULL,
            }
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.state.step(input);
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameState {
    pub fn new(world: World) -> Self {
        let mut player = Player::new(world.start_room.clone());
        player.position = world.start_position;

        GameState {
            world,
            player,
        }
    }

    /// Place the player in the start room and describe it.
    pub fn initialize(&mut self) -> Option<Output> {
        self.player.location = self.world.start_room.clone();
        self.player.position = self.world.start_position;
        let room = self.world.rooms.get(&self.player.location)?;
        let mut out = Output::new();
        render_room(&mut out, room, &self.player);
        Some(out)
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let input = input.trim();
        let lower = input.to_lowercase();
        let mut quit = false;
        debug!("input: {:?}", input);

        let mut parts = input.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        if lower.is_empty() {
            // nothing to do
        } else if lower == "quit" || lower == "exit" {
            out.say("Goodbye.");
            quit = true;
        } else if verb.eq_ignore_ascii_case("step") {
            handle_step(&mut out, &self.world, &mut self.player, &args.join(" "));
        } else if try_handle_build(&mut out, &mut self.world, &self.player, verb, &args) {
            // handled
        } else if let Some(room) = self.world.rooms.get(&self.player.location) {
            if lower == "look" || lower == "l" {
                render_room(&mut out, room, &self.player);
            } else if lower == "map" {
                render_map(&mut out, room);
            } else {
                let prev_room_id = self.player.location.clone();
                if try_handle_movement(&mut out, &mut self.player, &self.world, room, &lower) {
                    if self.player.location != prev_room_id {
                        if let Some(next) = self.world.rooms.get(&self.player.location) {
                            render_room(&mut out, next, &self.player);
                        }
                    }
                } else {
                    out.say("I don't understand that command.");
                }
            }
        } else {
            out.say(format!(
                "Error: you are in an unknown room '{}'",
                self.player.location
            ));
            quit = true;
        }

        (out, quit)
    }
}
