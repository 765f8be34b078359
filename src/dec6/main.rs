use advent_2022::support::{self, Timing};
use advent_2022::Result;
use itertools::Itertools;

const PACKET_MARKER_LEN: usize = 4;
const MESSAGE_MARKER_LEN: usize = 14;

fn find_marker(s: &str, n: usize) -> Option<usize> {
    s.as_bytes()
        .windows(n)
        .position(|window| window.iter().all_unique())
        .map(|i| i + n)
}

fn main() -> Result<()> {
    let input = support::setup()?;
    let _timing = Timing::start("dec6");
    let stream = input.trim();

    for (part, n) in [("A", PACKET_MARKER_LEN), ("B", MESSAGE_MARKER_LEN)] {
        match find_marker(stream, n) {
            Some(pos) => println!("Answer part {}: {}", part, pos),
            None => anyhow::bail!("no marker of length {} in stream", n),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples() {
        let cases = [
            ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 7, 19),
            ("bvwbjplbgvbhsrlpgdmjqwftvncz", 5, 23),
            ("nppdvjthqldpwncqszvftbrmjlhg", 6, 23),
            ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 10, 29),
            ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 11, 26),
        ];
        for (stream, packet, message) in cases {
            assert_eq!(find_marker(stream, PACKET_MARKER_LEN), Some(packet));
            assert_eq!(find_marker(stream, MESSAGE_MARKER_LEN), Some(message));
        }
    }

    #[test]
    fn no_marker() {
        assert_eq!(find_marker("aaaaaaa", PACKET_MARKER_LEN), None);
        assert_eq!(find_marker("abc", PACKET_MARKER_LEN), None);
    }
}
