use advent_2022::support::{self, Timing};
use advent_2022::Result;
use regex::Regex;

const NUM_RESOURCES: usize = 4; // Ore Clay Obsidian Geode
const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODES: usize = 3;

const QUALITY_MINUTES: i64 = 24;
const LONG_MINUTES: i64 = 32;
const LONG_BLUEPRINTS: usize = 3;

type ResourceVector = [i64; NUM_RESOURCES];
type RobotVector = [i64; NUM_RESOURCES];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Blueprint {
    id: i64,
    costs: [ResourceVector; NUM_RESOURCES],
}

impl Blueprint {
    /// Nothing can be spent faster than this per minute, so more robots of a
    /// kind than this never help.
    fn max_useful_robots(&self) -> RobotVector {
        let mut rv = [i64::MAX; NUM_RESOURCES];
        for resource in [ORE, CLAY, OBSIDIAN] {
            rv[resource] = self.costs.iter().map(|c| c[resource]).max().unwrap_or(0);
        }
        rv
    }
}

#[derive(Clone, Debug)]
struct State {
    robots: RobotVector,
    resources: ResourceVector,
    minutes_left: i64,
}

impl State {
    fn initial_state(minutes: i64) -> State {
        State {
            robots: [1, 0, 0, 0],
            resources: [0, 0, 0, 0],
            minutes_left: minutes,
        }
    }

    fn geodes_if_idle(&self) -> i64 {
        self.resources[GEODES] + self.robots[GEODES] * self.minutes_left
    }

    /// As if a new geode robot were built every remaining minute.
    fn upper_bound_geodes(&self) -> i64 {
        self.geodes_if_idle() + self.minutes_left * (self.minutes_left - 1) / 2
    }

    /// Minutes of collecting before `cost` is affordable, or `None` if the
    /// robots needed to collect it don't exist yet.
    fn minutes_until_affordable(&self, cost: &ResourceVector) -> Option<i64> {
        let mut wait = 0;
        for i in 0..NUM_RESOURCES {
            let missing = cost[i] - self.resources[i];
            if missing <= 0 {
                continue;
            }
            if self.robots[i] == 0 {
                return None;
            }
            wait = wait.max((missing + self.robots[i] - 1) / self.robots[i]);
        }
        Some(wait)
    }

    fn build(&self, robot: usize, blueprint: &Blueprint) -> Option<State> {
        let elapsed = self.minutes_until_affordable(&blueprint.costs[robot])? + 1;
        // A robot finished in the last minute collects nothing.
        if elapsed >= self.minutes_left {
            return None;
        }

        let mut next = self.clone();
        for i in 0..NUM_RESOURCES {
            next.resources[i] += self.robots[i] * elapsed - blueprint.costs[robot][i];
        }
        next.robots[robot] += 1;
        next.minutes_left -= elapsed;
        Some(next)
    }
}

struct Search<'a> {
    blueprint: &'a Blueprint,
    max_useful_robots: RobotVector,
    iter: i64,
    max_geodes_ever_seen: i64,
}

impl<'a> Search<'a> {
    fn new(blueprint: &'a Blueprint) -> Search<'a> {
        Search {
            blueprint,
            max_useful_robots: blueprint.max_useful_robots(),
            iter: 0,
            max_geodes_ever_seen: 0,
        }
    }

    fn evaluate(&mut self, state: &State) {
        self.iter += 1;
        self.max_geodes_ever_seen = self.max_geodes_ever_seen.max(state.geodes_if_idle());

        if state.upper_bound_geodes() <= self.max_geodes_ever_seen {
            return;
        }

        for robot in [GEODES, OBSIDIAN, CLAY, ORE] {
            if state.robots[robot] >= self.max_useful_robots[robot] {
                continue;
            }
            if let Some(next) = state.build(robot, self.blueprint) {
                self.evaluate(&next);
            }
        }
    }

    fn max_geodes(mut self, minutes: i64) -> i64 {
        self.evaluate(&State::initial_state(minutes));
        tracing::debug!(
            blueprint = self.blueprint.id,
            minutes,
            iterations = self.iter,
            geodes = self.max_geodes_ever_seen,
            "searched blueprint"
        );
        self.max_geodes_ever_seen
    }
}

fn max_geodes(blueprint: &Blueprint, minutes: i64) -> i64 {
    Search::new(blueprint).max_geodes(minutes)
}

fn parse_scenario(s: &str) -> Result<Vec<Blueprint>> {
    let re = Regex::new(
        r"Blueprint (?P<id>[0-9]+): Each ore robot costs (?P<ore_ore>[0-9]+) ore. Each clay robot costs (?P<clay_ore>[0-9]+) ore. Each obsidian robot costs (?P<obs_ore>[0-9]+) ore and (?P<obs_clay>[0-9]+) clay. Each geode robot costs (?P<geo_ore>[0-9]+) ore and (?P<geo_obs>[0-9]+) obsidian.",
    )?;

    s.trim()
        .lines()
        .map(|line| {
            let captures = match re.captures(line.trim()) {
                Some(c) => c,
                None => anyhow::bail!("unrecognised blueprint: {:?}", line),
            };
            Ok(Blueprint {
                id: captures["id"].parse()?,
                costs: [
                    [captures["ore_ore"].parse()?, 0, 0, 0],
                    [captures["clay_ore"].parse()?, 0, 0, 0],
                    [
                        captures["obs_ore"].parse()?,
                        captures["obs_clay"].parse()?,
                        0,
                        0,
                    ],
                    [
                        captures["geo_ore"].parse()?,
                        0,
                        captures["geo_obs"].parse()?,
                        0,
                    ],
                ],
            })
        })
        .collect()
}

fn sum_of_qualities(blueprints: &[Blueprint]) -> i64 {
    blueprints
        .iter()
        .map(|b| b.id * max_geodes(b, QUALITY_MINUTES))
        .sum()
}

fn product_of_geodes(blueprints: &[Blueprint]) -> i64 {
    blueprints
        .iter()
        .take(LONG_BLUEPRINTS)
        .map(|b| max_geodes(b, LONG_MINUTES))
        .product()
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec19");

    let blueprints = parse_scenario(&input)?;
    tracing::debug!(blueprints = blueprints.len(), "parsed blueprints");

    println!("Answer part A: {}", sum_of_qualities(&blueprints));
    println!("Answer part B: {}", product_of_geodes(&blueprints));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.
Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.
";

    #[test]
    fn parses_costs() {
        let blueprints = parse_scenario(SAMPLE).unwrap();
        assert_eq!(blueprints.len(), 2);
        assert_eq!(blueprints[1].id, 2);
        assert_eq!(blueprints[0].costs[OBSIDIAN], [3, 14, 0, 0]);
        assert_eq!(blueprints[0].costs[GEODES], [2, 0, 7, 0]);
        assert_eq!(blueprints[0].max_useful_robots()[..3], [4, 14, 7]);
    }

    #[test]
    fn sample_qualities() {
        let blueprints = parse_scenario(SAMPLE).unwrap();
        assert_eq!(max_geodes(&blueprints[0], QUALITY_MINUTES), 9);
        assert_eq!(max_geodes(&blueprints[1], QUALITY_MINUTES), 12);
        assert_eq!(sum_of_qualities(&blueprints), 33);
    }

    #[test]
    fn sample_long_run() {
        let blueprints = parse_scenario(SAMPLE).unwrap();
        assert_eq!(product_of_geodes(&blueprints), 56 * 62);
    }

    #[test]
    fn build_waits_for_resources() {
        let blueprints = parse_scenario(SAMPLE).unwrap();
        let state = State::initial_state(24);

        // Two minutes collecting ore, one minute building.
        let next = state.build(CLAY, &blueprints[0]).unwrap();
        assert_eq!(next.minutes_left, 21);
        assert_eq!(next.robots, [1, 1, 0, 0]);
        assert_eq!(next.resources, [1, 0, 0, 0]);

        // No clay robots yet, so no obsidian.
        assert!(state.build(OBSIDIAN, &blueprints[0]).is_none());
    }

    #[test]
    fn bad_blueprint() {
        assert!(parse_scenario("Blueprint 1: nothing to see here").is_err());
    }
}
