use glam::IVec2;
use pacman_valentine::{
    constants::MapTile,
    error::{GameError, MapError},
    map::{builder::Map, direction::Direction, layout::Layout},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn map_error(result: Result<Map, GameError>) -> MapError {
    match result {
        Err(GameError::Map(error)) => error,
        other => panic!("Expected a map error, got {:?}", other),
    }
}

#[test]
fn test_reference_map() {
    let map = Map::reference().expect("Reference map should be valid");

    assert_that(&map.width()).is_equal_to(20);
    assert_that(&map.height()).is_equal_to(20);
    assert_that(&map.count_pellets()).is_equal_to(233);
    assert_that(&map.player_start()).is_equal_to(IVec2::new(1, 1));
    assert_eq!(
        map.ghost_starts(),
        &[IVec2::new(18, 18), IVec2::new(18, 1), IVec2::new(1, 18)]
    );
}

#[test]
fn test_reference_map_border_is_solid() {
    let map = Map::reference().unwrap();

    for i in 0..20 {
        assert!(map.is_wall(IVec2::new(i, 0)));
        assert!(map.is_wall(IVec2::new(i, 19)));
        assert!(map.is_wall(IVec2::new(0, i)));
        assert!(map.is_wall(IVec2::new(19, i)));
    }
}

#[test]
fn test_out_of_bounds_is_wall() {
    let map = common::create_test_map(&common::OPEN_BOARD);

    assert_that(&map.is_wall(IVec2::new(-1, 3))).is_true();
    assert_that(&map.is_wall(IVec2::new(3, 7))).is_true();
    assert_that(&map.tile(IVec2::new(100, 100))).is_none();
}

#[test]
fn test_step() {
    let map = common::create_test_map(&common::OPEN_BOARD);

    assert_that(&map.step(IVec2::new(1, 1), Direction::Right)).is_equal_to(Some(IVec2::new(2, 1)));
    assert_that(&map.step(IVec2::new(1, 1), Direction::Up)).is_none();
    assert_that(&map.step(IVec2::new(1, 1), Direction::Left)).is_none();
}

#[test]
fn test_consume_pellet_and_reset() {
    let mut map = common::create_test_map(&common::OPEN_BOARD);
    let before = map.count_pellets();
    let pos = IVec2::new(2, 1);

    assert_that(&map.consume_pellet(pos)).is_true();
    assert_that(&map.tile(pos)).is_equal_to(Some(MapTile::Floor));
    assert_that(&map.count_pellets()).is_equal_to(before - 1);

    // Already eaten, and the player's start was never a pellet
    assert_that(&map.consume_pellet(pos)).is_false();
    assert_that(&map.consume_pellet(IVec2::new(1, 1))).is_false();

    map.reset();
    assert_that(&map.count_pellets()).is_equal_to(before);
    assert_that(&map.tile(pos)).is_equal_to(Some(MapTile::Pellet));
}

#[test]
fn test_rejects_open_border() {
    let error = map_error(Map::parse(&["#####", "#X.. ", "#####"]));
    assert_eq!(error, MapError::OpenBorder(IVec2::new(4, 1)));
}

#[test]
fn test_rejects_unreachable_ghost_spawn() {
    let error = map_error(Map::parse(&["#######", "#X.#G #", "#######"]));
    assert_eq!(error, MapError::UnreachableSpawn(IVec2::new(4, 1)));
}

#[test]
fn test_rejects_unreachable_pellet() {
    let error = map_error(Map::parse(&["#######", "#X.#. #", "#######"]));
    assert_eq!(error, MapError::UnreachablePellet(IVec2::new(4, 1)));
}

#[test]
fn test_rejects_board_without_pellets() {
    let error = map_error(Map::parse(&["#####", "#X G#", "#####"]));
    assert_eq!(error, MapError::NoPellets);
}

#[test]
fn test_rejects_player_spawn_on_wall() {
    let mut layout = Layout::reference();
    layout.player_start = IVec2::new(2, 3);

    assert_eq!(map_error(Map::new(layout)), MapError::PlayerSpawnNotFloor(IVec2::new(2, 3)));
}

#[test]
fn test_rejects_player_spawn_on_pellet() {
    let mut layout = Layout::reference();
    layout.player_start = IVec2::new(1, 2);

    assert_eq!(map_error(Map::new(layout)), MapError::PlayerSpawnNotFloor(IVec2::new(1, 2)));
}

#[test]
fn test_rejects_spawns_out_of_bounds() {
    let mut layout = Layout::reference();
    layout.ghost_starts.push(IVec2::new(20, 5));

    assert_eq!(map_error(Map::new(layout)), MapError::SpawnOutOfBounds(IVec2::new(20, 5)));
}

#[test]
fn test_rejects_ghost_spawn_in_wall() {
    let mut layout = Layout::reference();
    layout.ghost_starts[1] = IVec2::new(9, 6);

    assert_eq!(map_error(Map::new(layout)), MapError::SpawnInWall(IVec2::new(9, 6)));
}

#[test]
fn test_rejects_dimension_mismatch() {
    let mut layout = Layout::reference();
    layout.tiles.pop();

    assert_eq!(
        map_error(Map::new(layout)),
        MapError::DimensionMismatch {
            width: 20,
            height: 20,
            tiles: 399
        }
    );
}

#[test]
fn test_parse_errors_surface_through_map() {
    let result = Map::parse(&["###", "#?#", "###"]);
    assert!(matches!(result, Err(GameError::MapParse(_))));
}
