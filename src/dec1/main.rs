use advent_2022::support::{self, Timing};
use advent_2022::Result;
use itertools::Itertools;

fn parse_elves(s: &str) -> Result<Vec<i64>> {
    s.trim()
        .split("\n\n")
        .map(|group| {
            group
                .lines()
                .map(|line| -> Result<i64> { Ok(line.trim().parse()?) })
                .sum::<Result<i64>>()
        })
        .collect()
}

fn top_calories(elves: &[i64], n: usize) -> i64 {
    elves.iter().sorted().rev().take(n).sum()
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec1");

    let elves = parse_elves(&input)?;
    tracing::debug!(elves = elves.len(), "parsed calorie groups");

    println!("Answer part A: {}", top_calories(&elves, 1));
    println!("Answer part B: {}", top_calories(&elves, 3));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1000
2000
3000

4000

5000
6000

7000
8000
9000

10000
";

    #[test]
    fn sample() {
        let elves = parse_elves(SAMPLE).unwrap();
        assert_eq!(elves, vec![6000, 4000, 11000, 24000, 10000]);
        assert_eq!(top_calories(&elves, 1), 24000);
        assert_eq!(top_calories(&elves, 3), 45000);
    }

    #[test]
    fn fewer_elves_than_requested() {
        let elves = parse_elves("5\n\n7\n").unwrap();
        assert_eq!(top_calories(&elves, 3), 12);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_elves("1000\nlots\n").is_err());
    }
}
