use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Policy governing how the winning segment is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    #[default]
    Random,
    Probability,
    InstantWinner,
}

impl SpinMode {
    /// Parses a configured mode name; unknown names fall back to
    /// `Random`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "probability" => SpinMode::Probability,
            "instant_winner" | "instantwinner" | "instant-winner" => SpinMode::InstantWinner,
            _ => SpinMode::Random,
        }
    }
}

/// Picks the index of the winning segment, or `None` for an empty list.
///
/// Priority order:
/// 1. the first segment with `probability == 100` wins unconditionally
///    (first in list order when several carry the override);
/// 2. `Probability`: one uniform draw against `win_probability` percent
///    decides the winning/losing bucket, then a uniform pick inside it
///    (falling back to the other bucket when empty);
/// 3. `InstantWinner`: uniform among non-losing segments, else among all;
/// 4. `Random`: uniform among all segments.
pub fn select_winning_index<R: Rng + ?Sized>(
    segments: &[Segment],
    mode: SpinMode,
    win_probability: f64,
    rng: &mut R,
) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }

    if let Some(index) = segments.iter().position(Segment::has_hard_override) {
        return Some(index);
    }

    let winners: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_losing())
        .map(|(i, _)| i)
        .collect();
    let losers: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_losing())
        .map(|(i, _)| i)
        .collect();

    match mode {
        SpinMode::Probability => {
            let threshold = (win_probability / 100.0).clamp(0.0, 1.0);
            let wants_winner = rng.gen::<f64>() < threshold;
            let bucket = if wants_winner {
                if winners.is_empty() { &losers } else { &winners }
            } else if losers.is_empty() {
                &winners
            } else {
                &losers
            };
            Some(bucket[rng.gen_range(0..bucket.len())])
        }
        SpinMode::InstantWinner => {
            if winners.is_empty() {
                Some(rng.gen_range(0..segments.len()))
            } else {
                Some(winners[rng.gen_range(0..winners.len())])
            }
        }
        SpinMode::Random => Some(rng.gen_range(0..segments.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn segment(id: &str, label: &str, probability: f64) -> Segment {
        let mut seg = Segment::new(id, label);
        seg.probability = probability;
        seg
    }

    #[test]
    fn empty_list_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_winning_index(&[], SpinMode::Random, 50.0, &mut rng), None);
    }

    #[test]
    fn hard_override_always_wins_in_every_mode() {
        let segments = vec![
            segment("a", "A", 10.0),
            segment("b", "B", 100.0),
            segment("c", "C", 10.0),
        ];
        let mut rng = StdRng::seed_from_u64(2);
        for mode in [SpinMode::Random, SpinMode::Probability, SpinMode::InstantWinner] {
            for _ in 0..100 {
                assert_eq!(select_winning_index(&segments, mode, 75.0, &mut rng), Some(1));
            }
        }
    }

    #[test]
    fn first_of_multiple_hard_overrides_wins() {
        let segments = vec![
            segment("a", "A", 100.0),
            segment("b", "B", 100.0),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(
                select_winning_index(&segments, SpinMode::InstantWinner, 0.0, &mut rng),
                Some(0)
            );
        }
    }

    #[test]
    fn probability_mode_converges_to_the_configured_rate() {
        let segments = vec![
            segment("win", "Grand Prize", 25.0),
            segment("lose", "Dommage", 25.0),
            segment("win2", "Petit Prix", 25.0),
            segment("lose2", "Perdu", 25.0),
        ];
        let mut rng = StdRng::seed_from_u64(4);
        let trials = 2000;
        let p = 30.0;
        let mut wins = 0;
        for _ in 0..trials {
            let index =
                select_winning_index(&segments, SpinMode::Probability, p, &mut rng).unwrap();
            if !segments[index].is_losing() {
                wins += 1;
            }
        }
        let rate = 100.0 * wins as f64 / trials as f64;
        assert!((rate - p).abs() < 5.0, "empirical win rate {rate}% too far from {p}%");
    }

    #[test]
    fn probability_mode_falls_back_when_a_bucket_is_empty() {
        let all_losing = vec![segment("a", "Dommage", 50.0), segment("b", "Perdu", 50.0)];
        let all_winning = vec![segment("a", "Prix", 50.0), segment("b", "Cadeau", 50.0)];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert!(select_winning_index(&all_losing, SpinMode::Probability, 100.0, &mut rng).is_some());
            assert!(select_winning_index(&all_winning, SpinMode::Probability, 0.0, &mut rng).is_some());
        }
    }

    #[test]
    fn instant_winner_prefers_non_losing_segments() {
        let segments = vec![
            segment("a", "Dommage", 25.0),
            segment("b", "Prize", 25.0),
            segment("c", "Perdu", 25.0),
        ];
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let index =
                select_winning_index(&segments, SpinMode::InstantWinner, 0.0, &mut rng).unwrap();
            assert_eq!(index, 1);
        }
    }

    #[test]
    fn random_mode_ignores_losing_labels() {
        // 4 equal segments, one labeled "Dommage": random mode must stay
        // uniform across all four.
        let segments = vec![
            segment("a", "A", 25.0),
            segment("b", "B", 25.0),
            segment("c", "Dommage", 25.0),
            segment("d", "D", 25.0),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 4000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let index = select_winning_index(&segments, SpinMode::Random, 50.0, &mut rng).unwrap();
            counts[index] += 1;
        }
        for count in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 0.25).abs() < 0.05, "share {share} biased away from 0.25");
        }
    }

    #[test]
    fn mode_names_parse_with_fallback() {
        assert_eq!(SpinMode::from_name("probability"), SpinMode::Probability);
        assert_eq!(SpinMode::from_name("instant_winner"), SpinMode::InstantWinner);
        assert_eq!(SpinMode::from_name("INSTANT-WINNER"), SpinMode::InstantWinner);
        assert_eq!(SpinMode::from_name("whatever"), SpinMode::Random);
    }
}
