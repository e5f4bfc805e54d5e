// Selection and scrolling for the time-cell grids

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// New selection index after a move, staying inside `len` items laid out
/// `columns` per row
pub fn step(selected: usize, len: usize, columns: usize, movement: Move) -> usize {
    if len == 0 {
        return 0;
    }
    let selected = selected.min(len - 1);

    match movement {
        Move::Left => selected.saturating_sub(1),
        Move::Right => (selected + 1).min(len - 1),
        Move::Up => selected.checked_sub(columns).unwrap_or(selected),
        Move::Down => {
            if selected + columns < len {
                selected + columns
            } else {
                selected
            }
        }
    }
}

pub fn row_count(len: usize, columns: usize) -> usize {
    len.div_ceil(columns)
}

/// First row to draw so that the selected row is on screen
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let row = selected / columns;
    if visible_rows == 0 || row < visible_rows {
        0
    } else {
        row + 1 - visible_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_within_grid() {
        // 0 1 2
        // 3 4 5
        // 6
        assert_eq!(step(4, 7, 3, Move::Left), 3);
        assert_eq!(step(4, 7, 3, Move::Right), 5);
        assert_eq!(step(4, 7, 3, Move::Up), 1);
        assert_eq!(step(3, 7, 3, Move::Down), 6);
    }

    #[test]
    fn test_step_stops_at_edges() {
        assert_eq!(step(0, 7, 3, Move::Left), 0);
        assert_eq!(step(6, 7, 3, Move::Right), 6);
        assert_eq!(step(1, 7, 3, Move::Up), 1);
        assert_eq!(step(4, 7, 3, Move::Down), 4);
        assert_eq!(step(0, 0, 3, Move::Down), 0);
    }

    #[test]
    fn test_step_clamps_stale_selection() {
        assert_eq!(step(10, 2, 3, Move::Left), 0);
    }

    #[test]
    fn test_scrolling() {
        assert_eq!(row_count(7, 3), 3);
        assert_eq!(row_count(0, 3), 0);
        assert_eq!(first_visible_row(1, 3, 2), 0);
        assert_eq!(first_visible_row(6, 3, 2), 1);
        assert_eq!(first_visible_row(9, 3, 2), 2);
    }
}
