//! Map parsing functionality for converting raw ASCII boards into layouts.

use glam::IVec2;

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::map::layout::Layout;

/// Parser for converting raw board layouts into structured map data.
///
/// | char | meaning                         |
/// |------|---------------------------------|
/// | `#`  | wall                            |
/// | `.`  | pellet                          |
/// | ` `  | floor                           |
/// | `X`  | player start (floor)            |
/// | `G`  | ghost start (floor), in reading order |
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// # Arguments
    ///
    /// * `c` - The character to parse
    ///
    /// # Returns
    ///
    /// The parsed map tile, or an error if the character is unknown.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            ' ' => Ok(MapTile::Floor),
            'X' => Ok(MapTile::Floor), // Player's starting position, treated as floor
            'G' => Ok(MapTile::Floor), // Ghost starting position, treated as floor
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board into a layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, its rows differ in width, it contains
    /// unknown characters, or it does not have exactly one player start.
    pub fn parse_board(raw_board: &[&str]) -> Result<Layout, ParseError> {
        let width = raw_board.first().map(|row| row.chars().count()).ok_or(ParseError::EmptyBoard)?;
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut player_start: Option<IVec2> = None;
        let mut ghost_starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in line.chars().enumerate() {
                tiles.push(Self::parse_character(character)?);

                let pos = IVec2::new(x as i32, y as i32);
                match character {
                    'X' if player_start.is_some() => return Err(ParseError::MultiplePlayerStarts(pos)),
                    'X' => player_start = Some(pos),
                    'G' => ghost_starts.push(pos),
                    _ => {}
                }
            }
        }

        Ok(Layout {
            width: width as u32,
            height: raw_board.len() as u32,
            tiles,
            player_start: player_start.ok_or(ParseError::MissingPlayerStart)?,
            ghost_starts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('#'), Ok(MapTile::Wall));
        assert_eq!(MapTileParser::parse_character('.'), Ok(MapTile::Pellet));
        assert_eq!(MapTileParser::parse_character(' '), Ok(MapTile::Floor));
        assert_eq!(MapTileParser::parse_character('X'), Ok(MapTile::Floor));
        assert_eq!(MapTileParser::parse_character('G'), Ok(MapTile::Floor));
        assert_eq!(MapTileParser::parse_character('o'), Err(ParseError::UnknownCharacter('o')));
    }
}
