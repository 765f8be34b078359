use advent_2022::grid::{Direction, Map};
use advent_2022::support::{self, Timing};
use advent_2022::Result;

fn parse_forest(s: &str) -> Result<Map<u32>> {
    Map::from_string(s)?.try_map(|ch| match ch.to_digit(10) {
        Some(height) => Ok(height),
        None => anyhow::bail!("bad tree height {:?}", ch),
    })
}

fn is_visible(forest: &Map<u32>, pos: (i32, i32), height: u32) -> bool {
    Direction::all()
        .into_iter()
        .any(|d| forest.ray(pos, d).all(|other| *other < height))
}

/// Trees seen from `pos` looking along `direction`, up to and including the
/// first one that blocks the view.
fn viewing_distance(
    forest: &Map<u32>,
    pos: (i32, i32),
    direction: Direction,
    height: u32,
) -> usize {
    let mut distance = 0;
    for other in forest.ray(pos, direction) {
        distance += 1;
        if *other >= height {
            break;
        }
    }
    distance
}

fn scenic_score(forest: &Map<u32>, pos: (i32, i32), height: u32) -> usize {
    Direction::all()
        .into_iter()
        .map(|d| viewing_distance(forest, pos, d, height))
        .product()
}

fn count_visible(forest: &Map<u32>) -> usize {
    forest
        .indexed_iter()
        .filter(|(pos, height)| is_visible(forest, *pos, **height))
        .count()
}

fn best_scenic_score(forest: &Map<u32>) -> usize {
    forest
        .indexed_iter()
        .map(|(pos, height)| scenic_score(forest, pos, *height))
        .max()
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec8");

    let forest = parse_forest(&input)?;
    tracing::debug!(
        width = forest.number_of_columns,
        height = forest.number_of_rows,
        "parsed forest"
    );

    println!("Answer part A: {}", count_visible(&forest));
    println!("Answer part B: {}", best_scenic_score(&forest));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "30373
25512
65332
33549
35390
";

    #[test]
    fn sample() {
        let forest = parse_forest(SAMPLE).unwrap();
        assert_eq!(count_visible(&forest), 21);
        assert_eq!(best_scenic_score(&forest), 8);
    }

    #[test]
    fn scenic_score_of_single_trees() {
        let forest = parse_forest(SAMPLE).unwrap();
        assert_eq!(scenic_score(&forest, (2, 1), 5), 4);
        assert_eq!(scenic_score(&forest, (2, 3), 5), 8);
        // Edge trees see nothing in at least one direction.
        assert_eq!(scenic_score(&forest, (0, 0), 3), 0);
    }

    #[test]
    fn edges_are_always_visible() {
        let forest = parse_forest("999\n919\n999").unwrap();
        assert_eq!(count_visible(&forest), 8);
    }

    #[test]
    fn bad_digit() {
        assert!(parse_forest("12a\n456").is_err());
    }
}
