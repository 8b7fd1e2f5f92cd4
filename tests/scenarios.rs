use grid_rooms::engine::OutputBlock;
use grid_rooms::world::{self, GridPos, Room, World};
use grid_rooms::{GameState, load_world_from_str};

fn rect_world() -> World {
    let mut world = World::new("test", "Test", "hall");
    let mut hall = Room::new_grid("hall", "Hall", "A plain hall.");
    hall.ensure_grid().auto_build_grid(5, 5).unwrap();
    world.insert_room(hall);
    world
}

fn texts(out: &grid_rooms::engine::Output) -> Vec<String> {
    out.lines().into_iter().map(String::from).collect()
}

#[test]
fn step_north_from_interior_succeeds() {
    let mut state = GameState::new(rect_world());
    state.player.position = Some(GridPos::new(1, 1));

    let (out, quit) = state.step("step north");

    assert!(!quit);
    assert_eq!(state.player.grid_position(), GridPos::new(1, 2));
    assert_eq!(
        texts(&out),
        vec!["You step north to position (1, 2).", "You see: .."],
        "stepping onto floor should confirm and describe the cell",
    );
}

#[test]
fn step_west_off_the_grid_is_refused() {
    let mut state = GameState::new(rect_world());

    let (out, _) = state.step("step west");

    assert_eq!(texts(&out), vec!["You cannot go that way."]);
    assert_eq!(state.player.position, None, "position must stay unset");
}

#[test]
fn step_into_marked_wall_bumps() {
    let mut world = rect_world();
    if let Some(grid) = world.rooms.get_mut("hall").and_then(|r| r.grid_mut()) {
        grid.set_grid_cell(2, 2, world::WALL_MARKER);
    }
    let mut state = GameState::new(world);
    state.player.position = Some(GridPos::new(2, 1));

    let (out, _) = state.step("STEP North");

    assert_eq!(texts(&out), vec!["You bump into a wall."]);
    assert_eq!(state.player.grid_position(), GridPos::new(2, 1));
}

#[test]
fn step_outside_grid_room_is_refused() {
    let mut world = rect_world();
    world.insert_room(Room::new("yard", "Yard", ""));
    world.start_room = "yard".to_string();
    let mut state = GameState::new(world);

    let (out, _) = state.step("step north");

    assert_eq!(texts(&out), vec!["You cannot use 'step' here."]);
}

#[test]
fn map_shows_door_initial() {
    let mut world = rect_world();
    world.insert_room(Room::new("yard", "Yard", ""));
    world
        .add_door("hall", "north", GridPos::new(2, 3), "yard")
        .unwrap();
    let mut state = GameState::new(world);

    let (out, _) = state.step("map");

    match out.blocks.as_slice() {
        [OutputBlock::Map(map)] => {
            let rows: Vec<&str> = map.lines().collect();
            assert_eq!(rows[4 - 3], "[#][.][N][.][#]");
        }
        other => panic!("expected a single map block, got {:?}", other),
    }
}

#[test]
fn empty_grid_room_map_message() {
    let mut world = World::new("test", "Test", "void");
    world.insert_room(Room::new_grid("void", "Void", ""));
    let mut state = GameState::new(world);

    let (out, _) = state.step("map");

    assert_eq!(texts(&out), vec!["The grid is empty."]);
}

#[test]
fn build_then_walk_through_new_door() {
    let mut world = rect_world();
    world.insert_room(Room::new("yard", "Yard", "Open sky."));
    let mut state = GameState::new(world);

    let (out, _) = state.step("@door north 2 4 yard");
    assert_eq!(texts(&out), vec!["A door north at (2, 4) now leads to 'yard'."]);

    let (out, _) = state.step("north");
    assert_eq!(state.player.location, "yard");
    assert_eq!(texts(&out)[0], "You go north.");
    assert!(
        out.blocks.contains(&OutputBlock::Title("Yard".to_string())),
        "arriving should describe the new room",
    );
}

#[test]
fn eleventh_door_is_refused() {
    let mut world = rect_world();
    world.insert_room(Room::new("yard", "Yard", ""));
    let mut state = GameState::new(world);

    for (i, dir) in world::Direction::ALL.iter().enumerate() {
        let (out, _) = state.step(&format!("@door {} {} 0 yard", dir, i));
        assert!(!texts(&out)[0].starts_with("Build failed"), "door {dir}");
    }
    let (out, _) = state.step("@door north 0 0 yard");
    assert_eq!(
        texts(&out),
        vec!["Build failed: room already has the maximum of 10 doors"]
    );
}

#[test]
fn bundled_world_loads_and_plays() {
    let world = load_world_from_str(include_str!("../worlds/keep.toml")).unwrap();
    assert!(
        world::validate_world(&world).is_empty(),
        "bundled world should validate cleanly",
    );

    let mut state = GameState::new(world);
    let out = state.initialize().unwrap();
    assert_eq!(out.blocks[0], OutputBlock::Title("Great Hall".to_string()));
    assert_eq!(state.player.grid_position(), GridPos::new(1, 1));

    // (3, 2) holds the stone pillar
    let (out, _) = state.step("step east");
    assert_eq!(texts(&out)[0], "You step east to position (2, 1).");
    let (out, _) = state.step("step north");
    assert_eq!(texts(&out)[0], "You step north to position (2, 2).");
    let (out, _) = state.step("step east");
    assert_eq!(texts(&out), vec!["You bump into a wall."]);

    let (_, _) = state.step("down");
    assert_eq!(state.player.location, "cellar");
    let (_, _) = state.step("u");
    assert_eq!(state.player.location, "hall");

    let (out, quit) = state.step("quit");
    assert!(quit);
    assert_eq!(texts(&out), vec!["Goodbye."]);
}

#[test]
fn unknown_command_is_reported() {
    let mut state = GameState::new(rect_world());
    let (out, quit) = state.step("dance");
    assert!(!quit);
    assert_eq!(texts(&out), vec!["I don't understand that command."]);
}

#[test]
fn huge_builds_fail_and_keep_the_room() {
    let mut state = GameState::new(rect_world());

    let (out, quit) = state.step("@circle 1100000000");
    assert!(!quit);
    assert_eq!(
        texts(&out),
        vec!["Build failed: a grid 2200000001 cells across exceeds the limit of 256"]
    );
    let (out, _) = state.step("@rect 100000 100000");
    assert!(texts(&out)[0].starts_with("Build failed"));

    let grid = state.world.rooms["hall"].grid().unwrap();
    assert_eq!(grid.cell_count(), 25);
}

#[test]
fn step_from_the_edge_of_the_coordinate_range() {
    let toml = r####"
[world]
id = "edge"
name = "Edge"
start_room = "hall"
player_position = [2147483647, 0]

[[room]]
id = "hall"
name = "Hall"
layout = { kind = "rect", width = 3, height = 3 }
"####;
    let mut state = GameState::new(load_world_from_str(toml).unwrap());

    let (out, _) = state.step("step east");

    assert_eq!(texts(&out), vec!["You cannot go that way."]);
    assert_eq!(state.player.grid_position(), GridPos::new(i32::MAX, 0));
}
