use crate::Result;

/// Cardinal directions in clockwise order, starting from `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ]
    }

    pub fn from_i32(n: i32) -> Direction {
        match n.rem_euclid(4) {
            0 => Direction::Right,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Up,
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    pub fn index(self) -> usize {
        self.to_i32() as usize
    }

    pub fn opposite(self) -> Direction {
        self.turn_right(2)
    }

    /// Negative `n` turns left.
    pub fn turn_right(self, n: i32) -> Direction {
        Direction::from_i32(self.to_i32() + n)
    }

    pub fn dx(self) -> i32 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            _ => 0,
        }
    }

    pub fn dy(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            _ => 0,
        }
    }

    pub fn step(self, origin: (i32, i32)) -> (i32, i32) {
        self.step_by(origin, 1)
    }

    pub fn step_by(self, (x, y): (i32, i32), n: i32) -> (i32, i32) {
        (x + n * self.dx(), y + n * self.dy())
    }
}

/// Row-major grid addressed by `(column, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<T> {
    pub number_of_rows: i32,
    pub number_of_columns: i32,
    row_data: Vec<Vec<T>>,
}

impl Map<char> {
    /// Rectangular block of text; surrounding whitespace is trimmed.
    pub fn from_string(s: &str) -> Result<Map<char>> {
        let rows: Vec<&str> = s.trim().lines().map(|row| row.trim()).collect();
        if rows.is_empty() || rows[0].is_empty() {
            anyhow::bail!("empty grid");
        }

        let number_of_cols = rows[0].chars().count();
        if !rows.iter().all(|row| row.chars().count() == number_of_cols) {
            anyhow::bail!("rows are not all the same length");
        }

        Ok(Map {
            number_of_rows: rows.len().try_into()?,
            number_of_columns: number_of_cols.try_into()?,
            row_data: rows.iter().map(|row| row.chars().collect()).collect(),
        })
    }

    /// Ragged block of text, right-padded with `blank` and surrounded by a
    /// one-cell border of `blank`. Leading whitespace is kept.
    pub fn from_ragged(s: &str, blank: char) -> Result<Map<char>> {
        let rows: Vec<&str> = s.lines().collect();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            anyhow::bail!("empty grid");
        }

        let border: Vec<char> = std::iter::repeat(blank).take(width + 2).collect();
        let mut row_data = vec![border.clone()];
        for row in &rows {
            let mut padded = vec![blank];
            padded.extend(row.chars());
            padded.resize(width + 2, blank);
            row_data.push(padded);
        }
        row_data.push(border);

        Ok(Map {
            number_of_rows: row_data.len().try_into()?,
            number_of_columns: (width + 2).try_into()?,
            row_data,
        })
    }
}

impl<T> Map<T> {
    pub fn at(&self, (col, row): (i32, i32)) -> Option<&T> {
        if !self.in_bounds((col, row)) {
            return None;
        }
        Some(&self.row_data[row as usize][col as usize])
    }

    pub fn in_bounds(&self, (col, row): (i32, i32)) -> bool {
        !(row < 0 || row >= self.number_of_rows || col < 0 || col >= self.number_of_columns)
    }

    pub fn neighbours(&self, p: (i32, i32)) -> impl Iterator<Item = (i32, i32)> + '_ {
        Direction::all()
            .into_iter()
            .map(move |d| d.step(p))
            .filter(move |q| self.in_bounds(*q))
    }

    pub fn indexed_iter(&self) -> impl Iterator<Item = ((i32, i32), &T)> + '_ {
        self.row_data.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, value)| ((x as i32, y as i32), value))
        })
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<(i32, i32)>
    where
        F: FnMut(&T) -> bool,
    {
        self.indexed_iter()
            .find(|(_, value)| predicate(value))
            .map(|(p, _)| p)
    }

    pub fn try_map<F, B>(&self, mut f: F) -> Result<Map<B>>
    where
        F: FnMut(&T) -> Result<B>,
    {
        let row_data = self
            .row_data
            .iter()
            .map(|row| row.iter().map(&mut f).collect::<Result<Vec<B>>>())
            .collect::<Result<Vec<Vec<B>>>>()?;
        Ok(Map {
            number_of_rows: self.number_of_rows,
            number_of_columns: self.number_of_columns,
            row_data,
        })
    }

    /// Cells walked from `origin` (exclusive) towards the edge of the map.
    pub fn ray(
        &self,
        origin: (i32, i32),
        direction: Direction,
    ) -> impl Iterator<Item = &T> + '_ {
        (1..)
            .map(move |n| direction.step_by(origin, n))
            .map_while(move |p| self.at(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_four_times_is_identity() {
        for d in Direction::all() {
            assert_eq!(d.turn_right(4), d);
            assert_eq!(d.turn_right(-4), d);
            assert_eq!(d.turn_right(1).turn_right(-1), d);
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(Direction::Up.turn_right(1), Direction::Right);
        assert_eq!(Direction::Right.turn_right(-1), Direction::Up);
    }

    #[test]
    fn ragged_text_is_padded_with_border() {
        let map = Map::from_ragged("  .#\n.", ' ').unwrap();
        assert_eq!(map.number_of_columns, 6);
        assert_eq!(map.number_of_rows, 4);
        assert_eq!(map.at((0, 0)), Some(&' '));
        assert_eq!(map.at((3, 1)), Some(&'.'));
        assert_eq!(map.at((4, 1)), Some(&'#'));
        assert_eq!(map.at((1, 2)), Some(&'.'));
        assert_eq!(map.at((2, 2)), Some(&' '));
        assert_eq!(map.at((6, 2)), None);
    }

    #[test]
    fn rectangular_text_must_be_rectangular() {
        assert!(Map::from_string("123\n45").is_err());
        assert!(Map::from_string("").is_err());

        let map = Map::from_string("123\n456\n").unwrap();
        assert_eq!(map.find(|c| *c == '5'), Some((1, 1)));
        assert_eq!(map.neighbours((0, 0)).count(), 2);
        assert_eq!(map.neighbours((1, 1)).count(), 3);
    }

    #[test]
    fn neighbours_stay_on_the_map() {
        let map = Map::from_string("123\n456\n789").unwrap();
        assert_eq!(map.neighbours((1, 1)).count(), 4);
        assert_eq!(map.neighbours((1, 2)).count(), 3);
        assert_eq!(map.neighbours((2, 2)).count(), 2);

        let mut around: Vec<(i32, i32)> = map.neighbours((0, 1)).collect();
        around.sort();
        assert_eq!(around, vec![(0, 0), (0, 2), (1, 1)]);
    }

    #[test]
    fn ray_stops_at_edge() {
        let map = Map::from_string("123\n456\n789").unwrap();
        let right: Vec<char> = map.ray((0, 1), Direction::Right).copied().collect();
        assert_eq!(right, vec!['5', '6']);
        let up: Vec<char> = map.ray((2, 2), Direction::Up).copied().collect();
        assert_eq!(up, vec!['6', '3']);
        assert_eq!(map.ray((0, 0), Direction::Left).count(), 0);
    }
}
