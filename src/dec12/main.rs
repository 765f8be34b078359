use std::cmp::Reverse;
use std::collections::HashMap;

use advent_2022::grid::Map;
use advent_2022::support::{self, Timing};
use advent_2022::Result;
use priority_queue::PriorityQueue;

struct Hill {
    elevations: Map<u8>,
    start: (i32, i32),
    goal: (i32, i32),
}

fn parse_hill(s: &str) -> Result<Hill> {
    let chars = Map::from_string(s)?;

    let start = match chars.find(|ch| *ch == 'S') {
        Some(p) => p,
        None => anyhow::bail!("no starting square"),
    };
    let goal = match chars.find(|ch| *ch == 'E') {
        Some(p) => p,
        None => anyhow::bail!("no goal square"),
    };

    let elevations = chars.try_map(|ch| match ch {
        'S' => Ok(0),
        'E' => Ok(25),
        'a'..='z' => Ok(*ch as u8 - b'a'),
        _ => anyhow::bail!("bad elevation {:?}", ch),
    })?;

    Ok(Hill {
        elevations,
        start,
        goal,
    })
}

impl Hill {
    fn elevation(&self, p: (i32, i32)) -> u8 {
        *self.elevations.at(p).unwrap_or(&u8::MAX)
    }

    fn distances_to_goal(&self) -> HashMap<(i32, i32), usize> {
        let mut distances = HashMap::new();
        let mut q = PriorityQueue::new();
        q.push(self.goal, Reverse(0));

        while let Some((pos, Reverse(distance))) = q.pop() {
            distances.insert(pos, distance);
            let height = self.elevation(pos);

            // Searching backwards from the goal.
            for prev in self.elevations.neighbours(pos) {
                if distances.contains_key(&prev) || self.elevation(prev) + 1 < height {
                    continue;
                }
                q.push_increase(prev, Reverse(distance + 1));
            }
        }

        tracing::debug!(reachable = distances.len(), "searched hill");
        distances
    }
}

fn solve(hill: &Hill) -> Result<(usize, usize)> {
    let distances = hill.distances_to_goal();

    let from_start = match distances.get(&hill.start) {
        Some(d) => *d,
        None => anyhow::bail!("goal is not reachable from the start"),
    };

    let from_lowest = distances
        .iter()
        .filter(|(p, _)| hill.elevation(**p) == 0)
        .map(|(_, d)| *d)
        .min()
        .unwrap_or(from_start);

    Ok((from_start, from_lowest))
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec12");

    let hill = parse_hill(&input)?;
    let (from_start, from_lowest) = solve(&hill)?;

    println!("Answer part A: {}", from_start);
    println!("Answer part B: {}", from_lowest);
    Ok(())
}
