#![allow(dead_code)]

use std::time::Duration;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::IVec2;
use pacman_valentine::{
    constants::mechanics,
    error::GameError,
    events::GameEvent,
    game::Game,
    map::{builder::Map, direction::Direction},
    systems::{
        EntityType, FireControl, GameStage, GhostBundle, GlobalState, Heart, HeartBundle, PelletCount, PlayerBundle,
        PlayerLives, Position, PowerState, Pursuit, RestartRequested, Rose, RoseBundle, RoseSpawner, ScoreResource,
        SpawnRng,
    },
    time::{GameTime, ManualClock},
};
use rand::{rngs::SmallRng, SeedableRng};

pub const TEST_SEED: u64 = 0x5EED;

/// An open 5x5 room with the player in the top-left corner and a ghost in the bottom-right.
pub const OPEN_BOARD: [&str; 7] = [
    "#######",
    "#X....#",
    "#.....#",
    "#.....#",
    "#.....#",
    "#....G#",
    "#######",
];

/// A single corridor running right from the player.
pub const CORRIDOR_BOARD: [&str; 3] = [
    "##########",
    "#X.......#",
    "##########",
];

/// Builds a world holding every resource the gameplay systems need, without entities.
pub fn create_test_world() -> World {
    create_test_world_with(&OPEN_BOARD)
}

pub fn create_test_world_with(board: &[&str]) -> World {
    let mut world = World::new();
    let map = create_test_map(board);

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(PelletCount(map.count_pellets()));
    world.insert_resource(map);
    world.insert_resource(ScoreResource(0));
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(PlayerLives::default());
    world.insert_resource(GameStage::Playing);
    world.insert_resource(PowerState::default());
    world.insert_resource(FireControl::default());
    world.insert_resource(RoseSpawner::default());
    world.insert_resource(RestartRequested::default());
    world.insert_resource(Pursuit::default());
    world.insert_resource(SpawnRng(SmallRng::seed_from_u64(TEST_SEED)));
    world.insert_resource(GameTime::default());

    world
}

pub fn create_test_map(board: &[&str]) -> Map {
    Map::parse(board).expect("Failed to create test map")
}

/// Builds a full game on `board`, driven by a manual clock the caller keeps a handle to.
pub fn create_test_game(board: &[&str]) -> (Game, ManualClock) {
    let clock = ManualClock::new();
    let game = Game::new(create_test_map(board), clock.clone(), SmallRng::seed_from_u64(TEST_SEED))
        .expect("Failed to create test game");
    (game, clock)
}

/// Builds a full game on the reference maze.
pub fn create_reference_game() -> (Game, ManualClock) {
    let clock = ManualClock::new();
    let map = Map::reference().expect("Reference map should be valid");
    let game = Game::new(map, clock.clone(), SmallRng::seed_from_u64(TEST_SEED)).expect("Failed to create test game");
    (game, clock)
}

pub fn spawn_test_player(world: &mut World, position: IVec2) -> Entity {
    world
        .spawn(PlayerBundle::new(position, mechanics::START_DIRECTION))
        .id()
}

pub fn spawn_test_ghost(world: &mut World, index: u8, position: IVec2) -> Entity {
    world.spawn(GhostBundle::new(index, position)).id()
}

/// Spawns a ghost standing at `position` whose spawn point is elsewhere.
pub fn spawn_test_ghost_away_from_spawn(world: &mut World, index: u8, position: IVec2, spawn: IVec2) -> Entity {
    let mut bundle = GhostBundle::new(index, spawn);
    bundle.position = Position(position);
    world.spawn(bundle).id()
}

pub fn spawn_test_heart(world: &mut World, position: IVec2, direction: Direction) -> Entity {
    world
        .spawn(HeartBundle {
            heart: Heart::new(direction),
            position: Position(position),
            entity_type: EntityType::Heart,
        })
        .id()
}

pub fn spawn_test_rose(world: &mut World, position: IVec2) -> Entity {
    world
        .spawn(RoseBundle {
            rose: Rose {
                spawned_at: Duration::ZERO,
            },
            position: Position(position),
            entity_type: EntityType::Rose,
        })
        .id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

pub fn set_time(world: &mut World, now: Duration) {
    world.resource_mut::<GameTime>().now = now;
}

pub fn position_of(world: &World, entity: Entity) -> IVec2 {
    world.get::<Position>(entity).expect("Entity should have a position").0
}
