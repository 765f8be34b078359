use std::collections::HashMap;
use std::collections::VecDeque;

use advent_2022::grid::{Direction, Map};
use advent_2022::support::{self, Timing};
use advent_2022::Result;
use itertools::Itertools;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum CubeError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("cube net does not close: {unresolved} face edges left unresolved")]
    UnresolvableNet { unresolved: usize },
    #[error("position {0:?} is off the map")]
    OutOfBounds((i32, i32)),
}

type CubeResult<T> = std::result::Result<T, CubeError>;

fn malformed(message: impl Into<String>) -> CubeError {
    CubeError::MalformedInput(message.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileType {
    Void,
    Floor,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    StepForward(i32),
    TurnRight(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    pos: (i32, i32),
    facing: Direction,
}

/// The net, padded so that every cell of it has a blank neighbour on the map.
#[derive(Debug)]
struct Board {
    tiles: Map<TileType>,
    face_size: i32,
}

trait Wrapper {
    fn wrap(&self, board: &Board, state: State) -> CubeResult<State>;
}

impl State {
    fn turn_right(&mut self, n: i32) {
        self.facing = self.facing.turn_right(n);
    }

    /// Coordinates are already one-based thanks to the border.
    fn value(&self) -> i64 {
        let (col, row) = self.pos;
        1000 * row as i64 + 4 * col as i64 + self.facing.to_i32() as i64
    }
}

fn parse_path(path: &str) -> CubeResult<Vec<Instruction>> {
    let mut steps = Vec::new();

    for (is_number, token) in &path.chars().group_by(|ch| ch.is_ascii_digit()) {
        let token: String = token.collect();
        if is_number {
            let n = token
                .parse()
                .map_err(|_| malformed(format!("bad step count {:?}", token)))?;
            steps.push(Instruction::StepForward(n));
            continue;
        }
        for ch in token.chars() {
            steps.push(match ch {
                'L' => Instruction::TurnRight(-1),
                'R' => Instruction::TurnRight(1),
                _ => return Err(malformed(format!("unexpected {:?} in path", ch))),
            });
        }
    }

    Ok(steps)
}

fn parse_scenario(s: &str) -> CubeResult<(Board, Vec<Instruction>)> {
    let (diagram, path) = s
        .split_once("\n\n")
        .ok_or_else(|| malformed("expected a map and a path separated by a blank line"))?;

    if diagram.trim().is_empty() {
        return Err(malformed("empty map"));
    }
    let path = path.trim();
    if path.is_empty() {
        return Err(malformed("empty path"));
    }

    let tiles = Map::from_ragged(diagram, ' ')
        .and_then(|chars| {
            chars.try_map(|ch| match ch {
                ' ' => Ok(TileType::Void),
                '.' => Ok(TileType::Floor),
                '#' => Ok(TileType::Wall),
                _ => anyhow::bail!("unexpected {:?} in map", ch),
            })
        })
        .map_err(|e| malformed(e.to_string()))?;

    let cells = tiles
        .indexed_iter()
        .filter(|(_, t)| **t != TileType::Void)
        .count() as i32;
    let face_size = (1..=cells).find(|n| 6 * n * n >= cells).unwrap_or(0);
    if face_size == 0 || 6 * face_size * face_size != cells {
        return Err(malformed(format!("{} cells cannot form six square faces", cells)));
    }

    tracing::debug!(
        width = tiles.number_of_columns - 2,
        height = tiles.number_of_rows - 2,
        face_size,
        "parsed map"
    );

    Ok((Board { tiles, face_size }, parse_path(path)?))
}

impl Board {
    fn tile(&self, pos: (i32, i32)) -> CubeResult<TileType> {
        self.tiles.at(pos).copied().ok_or(CubeError::OutOfBounds(pos))
    }

    fn start(&self) -> CubeResult<State> {
        (0..self.tiles.number_of_columns)
            .map(|x| (x, 1))
            .find(|p| self.tiles.at(*p) == Some(&TileType::Floor))
            .map(|pos| State {
                pos,
                facing: Direction::Right,
            })
            .ok_or_else(|| malformed("no open tile on the top row"))
    }

    /// `None` when the walker is blocked by a wall.
    fn step_forward<W: Wrapper>(&self, wrapper: &W, state: State) -> CubeResult<Option<State>> {
        let mut next = State {
            pos: state.facing.step(state.pos),
            facing: state.facing,
        };
        if self.tile(next.pos)? == TileType::Void {
            next = wrapper.wrap(self, state)?;
        }

        match self.tile(next.pos)? {
            TileType::Floor => Ok(Some(next)),
            TileType::Wall => Ok(None),
            TileType::Void => Err(CubeError::OutOfBounds(next.pos)),
        }
    }

    fn walk<W: Wrapper>(&self, wrapper: &W, steps: &[Instruction]) -> CubeResult<State> {
        let mut state = self.start()?;

        for ins in steps {
            match *ins {
                Instruction::TurnRight(n) => state.turn_right(n),
                Instruction::StepForward(n) => {
                    for _ in 0..n {
                        match self.step_forward(wrapper, state)? {
                            Some(next) => state = next,
                            None => break,
                        }
                    }
                }
            }
        }

        Ok(state)
    }
}

/// Leaving the net re-enters it from the far side of the same row or column.
struct FlatWrapper {}

impl Wrapper for FlatWrapper {
    fn wrap(&self, board: &Board, state: State) -> CubeResult<State> {
        let back = state.facing.opposite();
        let mut pos = state.pos;
        while board.tiles.at(back.step(pos)).map_or(false, |t| *t != TileType::Void) {
            pos = back.step(pos);
        }
        Ok(State {
            pos,
            facing: state.facing,
        })
    }
}

type FaceIndex = usize;

#[derive(Debug, Clone)]
struct Face {
    origin: (i32, i32),
    neighbours: [Option<FaceIndex>; 4],
}

/// Faces of the folded cube. Each face is numbered in discovery order and
/// knows which face lies beyond each of its four edges.
#[derive(Debug)]
struct CubeWrapper {
    face_size: i32,
    faces: Vec<Face>,
    by_block: HashMap<(i32, i32), FaceIndex>,
}

impl CubeWrapper {
    fn from(board: &Board) -> CubeResult<CubeWrapper> {
        let mut rv = CubeWrapper::discover(board)?;
        rv.close_edges()?;
        Ok(rv)
    }

    fn block_of(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (
            (x - 1).div_euclid(self.face_size),
            (y - 1).div_euclid(self.face_size),
        )
    }

    fn face_at(&self, pos: (i32, i32)) -> CubeResult<FaceIndex> {
        self.by_block
            .get(&self.block_of(pos))
            .copied()
            .ok_or(CubeError::OutOfBounds(pos))
    }

    fn add_face(&mut self, pos: (i32, i32)) -> CubeResult<FaceIndex> {
        if self.faces.len() == 6 {
            return Err(malformed("net has more than six faces"));
        }
        let block = self.block_of(pos);
        let index = self.faces.len();
        self.faces.push(Face {
            origin: (
                block.0 * self.face_size + 1,
                block.1 * self.face_size + 1,
            ),
            neighbours: [None; 4],
        });
        self.by_block.insert(block, index);
        Ok(index)
    }

    fn join(&mut self, a: FaceIndex, direction: Direction, b: FaceIndex) {
        self.faces[a].neighbours[direction.index()] = Some(b);
        self.faces[b].neighbours[direction.opposite().index()] = Some(a);
    }

    fn discover(board: &Board) -> CubeResult<CubeWrapper> {
        let face_size = board.face_size;
        let start = board
            .tiles
            .find(|t| *t != TileType::Void)
            .ok_or_else(|| malformed("empty map"))?;

        let mut rv = CubeWrapper {
            face_size,
            faces: Vec::new(),
            by_block: HashMap::new(),
        };
        rv.add_face(start)?;

        let mut q = VecDeque::new();
        q.push_back(start);

        while let Some(pos) = q.pop_front() {
            let face = rv.face_at(pos)?;
            for d in Direction::all() {
                let next = d.step_by(pos, face_size);
                if board.tiles.at(next).map_or(true, |t| *t == TileType::Void) {
                    continue;
                }
                let next_face = match rv.by_block.get(&rv.block_of(next)).copied() {
                    Some(index) => index,
                    None => {
                        q.push_back(next);
                        rv.add_face(next)?
                    }
                };
                rv.join(face, d, next_face);
            }
        }

        if rv.faces.len() != 6 {
            return Err(malformed(format!(
                "net has {} faces, expected 6",
                rv.faces.len()
            )));
        }

        tracing::debug!(faces = ?rv.by_block, "discovered faces");
        Ok(rv)
    }

    fn neighbour(&self, face: FaceIndex, direction: Direction) -> Option<FaceIndex> {
        self.faces[face].neighbours[direction.index()]
    }

    fn edge_towards(&self, face: FaceIndex, other: FaceIndex) -> Option<Direction> {
        Direction::all()
            .into_iter()
            .find(|d| self.neighbour(face, *d) == Some(other))
    }

    fn unresolved(&self) -> usize {
        self.faces
            .iter()
            .flat_map(|f| f.neighbours.iter())
            .filter(|n| n.is_none())
            .count()
    }

    /// Three faces meet at every corner of a cube. If `face` already knows the
    /// face across one edge at a corner, that face knows the third one, which
    /// must then be across the other edge at the same corner.
    fn resolve_around_corner(&mut self, face: FaceIndex, direction: Direction) -> bool {
        for delta in [-1, 1] {
            let common = match self.neighbour(face, direction.turn_right(delta)) {
                Some(f) => f,
                None => continue,
            };
            let common_edge = match self.edge_towards(common, face) {
                Some(d) => d,
                None => continue,
            };
            let missing = match self.neighbour(common, common_edge.turn_right(delta)) {
                Some(f) if f != face => f,
                _ => continue,
            };
            let back_edge = match self.edge_towards(missing, common) {
                Some(d) => d.turn_right(delta),
                None => continue,
            };
            if self.neighbour(missing, back_edge).map_or(false, |f| f != face) {
                continue;
            }

            self.faces[face].neighbours[direction.index()] = Some(missing);
            self.faces[missing].neighbours[back_edge.index()] = Some(face);
            return true;
        }
        false
    }

    fn close_edges(&mut self) -> CubeResult<()> {
        let mut passes = 0;
        loop {
            let unresolved = self.unresolved();
            if unresolved == 0 {
                tracing::debug!(passes, "all face edges resolved");
                return Ok(());
            }

            let mut progress = false;
            for face in 0..self.faces.len() {
                for d in Direction::all() {
                    if self.neighbour(face, d).is_none() && self.resolve_around_corner(face, d) {
                        progress = true;
                    }
                }
            }
            passes += 1;

            if !progress {
                return Err(CubeError::UnresolvableNet { unresolved });
            }
        }
    }

    /// Edges are parameterised clockwise around the face, so the two sides of
    /// a fold run in opposite directions.
    fn position_on_edge(&self, edge: Direction, (x, y): (i32, i32)) -> i32 {
        let face_size = self.face_size;
        match edge {
            Direction::Up => x,
            Direction::Right => y,
            Direction::Down => face_size - 1 - x,
            Direction::Left => face_size - 1 - y,
        }
    }

    fn coords_of_position_on_edge(&self, edge: Direction, t: i32) -> (i32, i32) {
        let face_size = self.face_size;
        match edge {
            Direction::Up => (t, 0),
            Direction::Right => (face_size - 1, t),
            Direction::Down => (face_size - 1 - t, face_size - 1),
            Direction::Left => (0, face_size - 1 - t),
        }
    }
}

impl Wrapper for CubeWrapper {
    fn wrap(&self, _board: &Board, state: State) -> CubeResult<State> {
        let face = self.face_at(state.pos)?;
        let (ox, oy) = self.faces[face].origin;
        let local = (state.pos.0 - ox, state.pos.1 - oy);

        let t = self.position_on_edge(state.facing, local);
        let next_face = self
            .neighbour(face, state.facing)
            .ok_or(CubeError::UnresolvableNet { unresolved: 1 })?;
        let entry_edge = self
            .edge_towards(next_face, face)
            .ok_or(CubeError::UnresolvableNet { unresolved: 1 })?;

        let (x, y) = self.coords_of_position_on_edge(entry_edge, self.face_size - 1 - t);
        let (nx, ny) = self.faces[next_face].origin;
        Ok(State {
            pos: (nx + x, ny + y),
            facing: entry_edge.opposite(),
        })
    }
}

fn solve(text: &str) -> CubeResult<i64> {
    let (board, steps) = parse_scenario(text)?;
    let cube = CubeWrapper::from(&board)?;
    Ok(board.walk(&cube, &steps)?.value())
}

fn solve_flat(text: &str) -> CubeResult<i64> {
    let (board, steps) = parse_scenario(text)?;
    Ok(board.walk(&FlatWrapper {}, &steps)?.value())
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec22");

    println!("Answer part A: {}", solve_flat(&input)?);
    println!("Answer part B: {}", solve(&input)?);
    Ok(())
}
