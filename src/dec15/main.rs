use std::collections::HashSet;

use advent_2022::support::{self, Timing};
use advent_2022::Result;
use itertools::Itertools;
use regex::Regex;

const ROW_OF_INTEREST: i64 = 2_000_000;
const SEARCH_BOUND: i64 = 4_000_000;
const TUNING_MULTIPLIER: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sensor {
    pos: (i64, i64),
    beacon: (i64, i64),
}

fn manhattan(a: (i64, i64), b: (i64, i64)) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

impl Sensor {
    fn range(&self) -> i64 {
        manhattan(self.pos, self.beacon)
    }

    fn covers(&self, p: (i64, i64)) -> bool {
        manhattan(self.pos, p) <= self.range()
    }

    fn span_on_row(&self, y: i64) -> Option<(i64, i64)> {
        let reach = self.range() - (self.pos.1 - y).abs();
        if reach < 0 {
            return None;
        }
        Some((self.pos.0 - reach, self.pos.0 + reach))
    }

    /// Points at distance `range() + 1`, i.e. just outside the sensor's reach.
    fn perimeter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let r = self.range() + 1;
        let (x, y) = self.pos;
        (0..=r).flat_map(move |i| {
            let j = r - i;
            [(x + i, y + j), (x + i, y - j), (x - i, y + j), (x - i, y - j)]
        })
    }
}

fn parse_sensors(s: &str) -> Result<Vec<Sensor>> {
    let re = Regex::new(
        r"Sensor at x=(?P<sx>-?[0-9]+), y=(?P<sy>-?[0-9]+): closest beacon is at x=(?P<bx>-?[0-9]+), y=(?P<by>-?[0-9]+)",
    )?;

    s.trim()
        .lines()
        .map(|line| {
            let captures = match re.captures(line.trim()) {
                Some(c) => c,
                None => anyhow::bail!("unrecognised line: {:?}", line),
            };
            Ok(Sensor {
                pos: (captures["sx"].parse()?, captures["sy"].parse()?),
                beacon: (captures["bx"].parse()?, captures["by"].parse()?),
            })
        })
        .collect()
}

fn excluded_on_row(sensors: &[Sensor], y: i64) -> i64 {
    let mut covered = 0;
    let mut current: Option<(i64, i64)> = None;

    for (lo, hi) in sensors
        .iter()
        .filter_map(|s| s.span_on_row(y))
        .sorted()
    {
        current = match current {
            Some((clo, chi)) if lo <= chi + 1 => Some((clo, chi.max(hi))),
            Some((clo, chi)) => {
                covered += chi - clo + 1;
                Some((lo, hi))
            }
            None => Some((lo, hi)),
        };
    }
    if let Some((clo, chi)) = current {
        covered += chi - clo + 1;
    }

    let beacons_on_row: HashSet<(i64, i64)> = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|b| b.1 == y)
        .collect();

    covered - beacons_on_row.len() as i64
}

/// The single position in `[0, bound]²` that no sensor covers. It must sit
/// right outside the reach of some sensor.
fn find_distress_beacon(sensors: &[Sensor], bound: i64) -> Option<(i64, i64)> {
    sensors.iter().find_map(|sensor| {
        sensor.perimeter().find(|p| {
            (0..=bound).contains(&p.0)
                && (0..=bound).contains(&p.1)
                && !sensors.iter().any(|s| s.covers(*p))
        })
    })
}

fn tuning_frequency((x, y): (i64, i64)) -> i64 {
    x * TUNING_MULTIPLIER + y
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec15");

    let sensors = parse_sensors(&input)?;
    tracing::debug!(sensors = sensors.len(), "parsed sensors");

    println!(
        "Answer part A: {}",
        excluded_on_row(&sensors, ROW_OF_INTEREST)
    );

    let beacon = match find_distress_beacon(&sensors, SEARCH_BOUND) {
        Some(p) => p,
        None => anyhow::bail!("every position within bounds is covered"),
    };
    tracing::info!(?beacon, "found distress beacon");
    println!("Answer part B: {}", tuning_frequency(beacon));

    Ok(())
}
