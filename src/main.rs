use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use log::warn;

use grid_rooms::engine::{self, OutputBlock};
use grid_rooms::world;
use grid_rooms::GameState;

fn flush_output(out: engine::Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Map(map) => {
                // map text carries its own trailing newline
                print!("{}", map);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!(); // visual separation before first event
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
            OutputBlock::Exits(exits) => {
                println!("\n{}", exits);
                printed_anything = true;
            }
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let world_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("worlds/keep.toml"));

    let world = match world::load_world_from_file(&world_path) {
        Ok(w) => {
            println!("Using world file: {}", world_path.display());
            w
        }
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", world_path.display());
            std::process::exit(1);
        }
    };

    for problem in world::validate_world(&world) {
        warn!("{}", problem.message);
    }

    println!("Welcome to {}!", world.name);
    if !world.desc.trim().is_empty() {
        println!("{}", world.desc.trim());
    }
    println!();
    println!("Type 'look' to look around, 'step <direction>' to move, 'quit' to exit.\n");

    let mut state = GameState::new(world);

    // Initial room render
    match state.initialize() {
        Some(out) => flush_output(out),
        None => {
            eprintln!("Error: start_room '{}' not found.", state.world.start_room);
            return Ok(());
        }
    }

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = state.step(input);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
