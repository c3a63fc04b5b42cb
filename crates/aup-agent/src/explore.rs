use aup_core::{Action, DeterministicRng};

pub const DEFAULT_EPSILON: f64 = 0.25;

/// Behaviour-policy action around a known greedy action.
///
/// With probability `epsilon`, or when there is a single action, the draw is uniform over all
/// actions. Otherwise it is uniform over every action except `greedy`.
pub fn epsilon_greedy<R>(greedy: Action, num_actions: usize, epsilon: f64, rng: &mut R) -> Action
where
    R: DeterministicRng + ?Sized,
{
    if num_actions <= 1 {
        return 0;
    }
    if rng.next_f64_unit() < epsilon {
        return rng.next_below(num_actions);
    }

    let pick = rng.next_below(num_actions - 1);
    if pick >= greedy {
        pick + 1
    } else {
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aup_core::SplitMix64;

    #[test]
    fn never_repeats_greedy_without_random_branch() {
        let mut rng = SplitMix64::new(5);
        for greedy in 0..5 {
            for _ in 0..500 {
                let a = epsilon_greedy(greedy, 5, 0.0, &mut rng);
                assert_ne!(a, greedy);
                assert!(a < 5);
            }
        }
    }

    #[test]
    fn exploring_branch_reaches_every_other_action() {
        let mut rng = SplitMix64::new(9);
        let mut counts = [0usize; 4];
        for _ in 0..4_000 {
            counts[epsilon_greedy(2, 4, 0.0, &mut rng)] += 1;
        }
        assert_eq!(counts[2], 0);
        assert!(counts[0] > 1_000 && counts[1] > 1_000 && counts[3] > 1_000);
    }

    #[test]
    fn full_epsilon_can_return_greedy() {
        let mut rng = SplitMix64::new(1);
        let hits = (0..1_000)
            .filter(|_| epsilon_greedy(0, 3, 1.0, &mut rng) == 0)
            .count();
        assert!(hits > 200 && hits < 470);
    }

    #[test]
    fn single_action_is_always_selected() {
        let mut rng = SplitMix64::new(3);
        for eps in [0.0, 0.25, 1.0] {
            for _ in 0..100 {
                assert_eq!(epsilon_greedy(0, 1, eps, &mut rng), 0);
            }
        }
    }
}
