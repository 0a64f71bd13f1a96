//! Board geometry constants and coordinate math
//!
//! Pure functions shared by the rules engine and the presentation layer:
//! board<->pixel mapping, diagonal direction vectors, and bounds checks.
//! Positions are `(col, row)` pairs with the origin at the top-left corner;
//! rows grow downward.

/// Width/height of one board tile in pixels.
pub const TILE_SIZE: i32 = 64;

/// Number of rows on the board.
pub const NUM_ROWS: u8 = 8;

/// Number of columns on the board.
pub const NUM_COLS: u8 = 8;

/// Horizontal offset of the board inside the window, in pixels.
pub const BOARD_X_OFFSET: i32 = 50;

/// Vertical offset of the board inside the window, in pixels.
pub const BOARD_Y_OFFSET: i32 = 150;

/// Rows that hold Black men when a fresh game is set up.
pub const BLACK_STARTING_ROWS: [u8; 3] = [0, 1, 2];

/// Rows that hold White men when a fresh game is set up.
pub const WHITE_STARTING_ROWS: [u8; 3] = [5, 6, 7];

/// The four diagonal direction vectors, as `(col, row)` deltas.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Offset from a tile's top-left corner to its center, plus the sprite margin.
#[inline]
pub const fn origin_offset() -> i32 {
    TILE_SIZE / 2 + 32
}

/// Whether a (possibly negative) candidate point lies on the board.
#[inline]
pub fn in_bounds(point: (i8, i8)) -> bool {
    point.0 >= 0 && point.0 <= NUM_COLS as i8 - 1 && point.1 >= 0 && point.1 <= NUM_ROWS as i8 - 1
}

/// Whether a square can ever hold a piece. Only the dark squares of the
/// alternating pattern are playable in draughts.
#[inline]
pub fn playable(pos: (u8, u8)) -> bool {
    (pos.0 + pos.1) % 2 == 1
}

/// Step outward from `origin` along `dir`, `range` tiles away.
///
/// Returns a signed point; callers check [`in_bounds`] before converting back
/// to a board position.
#[inline]
pub fn step(origin: (u8, u8), dir: (i8, i8), range: i8) -> (i8, i8) {
    (origin.0 as i8 + dir.0 * range, origin.1 as i8 + dir.1 * range)
}

/// Unit direction pointing from `from` toward `to`, componentwise signum.
#[inline]
pub fn ray_direction(from: (u8, u8), to: (u8, u8)) -> (i8, i8) {
    (
        (to.0 as i8 - from.0 as i8).signum(),
        (to.1 as i8 - from.1 as i8).signum(),
    )
}

/// Map a board position to the pixel center of its tile.
pub fn board_to_world(pos: (u8, u8)) -> (i32, i32) {
    let offset_x = origin_offset() + BOARD_X_OFFSET;
    let offset_y = origin_offset() + BOARD_Y_OFFSET;
    (
        pos.0 as i32 * TILE_SIZE + offset_x,
        pos.1 as i32 * TILE_SIZE + offset_y,
    )
}

/// Map a pixel coordinate back to the board position of its tile, or `None`
/// when the point lies outside the board.
pub fn world_to_board(world: (i32, i32)) -> Option<(u8, u8)> {
    let offset_x = origin_offset() + BOARD_X_OFFSET;
    let offset_y = origin_offset() + BOARD_Y_OFFSET;
    let col = (world.0 - offset_x).div_euclid(TILE_SIZE);
    let row = (world.1 - offset_y).div_euclid(TILE_SIZE);
    if in_bounds((col as i8, row as i8)) {
        Some((col as u8, row as u8))
    } else {
        None
    }
}

/// Human-readable square name in algebraic style: files `A`-`H` left to
/// right, ranks `8`-`1` top to bottom. Used for logs and debugging output.
pub fn square_name(pos: (u8, u8)) -> String {
    let letter = (b'A' + pos.0) as char;
    let digit = NUM_ROWS - pos.1;
    format!("{letter}{digit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds((0, 0)));
        assert!(in_bounds((7, 7)));
        assert!(!in_bounds((-1, 0)));
        assert!(!in_bounds((0, 8)));
        assert!(!in_bounds((8, 3)));
    }

    #[test]
    fn test_playable_checker_pattern() {
        assert!(!playable((0, 0)));
        assert!(playable((1, 0)));
        assert!(playable((0, 1)));
        assert!(!playable((1, 1)));
        assert!(playable((4, 5)));
    }

    #[test]
    fn test_step_and_ray_direction() {
        assert_eq!(step((3, 4), (1, 1), 2), (5, 6));
        assert_eq!(step((0, 0), (-1, -1), 1), (-1, -1));
        assert_eq!(ray_direction((3, 4), (5, 6)), (1, 1));
        assert_eq!(ray_direction((5, 6), (3, 4)), (-1, -1));
        assert_eq!(ray_direction((2, 2), (2, 2)), (0, 0));
    }

    #[test]
    fn test_world_round_trip() {
        for &pos in &[(0u8, 0u8), (3, 4), (7, 7)] {
            let world = board_to_world(pos);
            assert_eq!(world_to_board(world), Some(pos));
        }
        assert_eq!(world_to_board((0, 0)), None);
    }

    #[test]
    fn test_square_name() {
        assert_eq!(square_name((0, 0)), "A8");
        assert_eq!(square_name((7, 7)), "H1");
        assert_eq!(square_name((4, 3)), "E5");
    }
}
