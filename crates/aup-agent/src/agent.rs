use aup_core::{
    derive_seed, run_episode, Action, Observation, Policy, Simulator, SplitMix64, StateKey,
    ValueTable,
};

use crate::config::AupConfig;
use crate::error::AupError;
use crate::explore::epsilon_greedy;
use crate::penalty::{sampled_penalties, PenaltyFunction};
use crate::performance::TrainingPerformance;

/// Step size of every TD update: each update fully replaces the old estimate.
pub const LEARNING_RATE: f64 = 1.0;

/// Penalty returned when doing nothing has zero attainable value under every penalty function,
/// so the impact unit is undefined.
pub const IMPACT_UNIT_UNDEFINED_PENALTY: f64 = 1.01;

/// Seed stream reserved for behaviour-policy draws.
const EXPLORATION_STREAM: u64 = 0;

/// Which value table a training phase learns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// The penalty reward at this index.
    Penalty(usize),
    /// Environment reward minus the impact penalty.
    Primary,
}

/// Tabular AUP agent.
///
/// Construction via [`AupAgent::train`] runs the whole schedule: one phase per penalty function,
/// then the primary phase. [`AupAgent::new`] builds the untrained agent for callers that drive
/// phases themselves.
#[derive(Debug, Clone)]
pub struct AupAgent {
    config: AupConfig,
    name: &'static str,
    num_actions: usize,
    noop: Action,
    goal_reward: f64,
    penalties: Vec<PenaltyFunction>,
    /// Row layout: `penalty_index * num_actions + action`.
    penalty_q: ValueTable,
    aup_q: ValueTable,
    rng: SplitMix64,
    training_performance: TrainingPerformance,
}

impl AupAgent {
    /// Build the agent and its penalty functions without training.
    pub fn new<S>(env: &mut S, config: AupConfig) -> Result<Self, AupError>
    where
        S: Simulator + ?Sized,
    {
        config.validate()?;

        let num_actions = env.action_spec().num_actions();
        let noop = env.noop_action();
        if noop >= num_actions {
            return Err(AupError::NoopOutOfRange { noop, num_actions });
        }

        let (mut name, penalties) = if config.state_penalties {
            let derived = env
                .derive_possible_rewards()
                .ok_or(AupError::ReachabilityUnavailable)?;
            let penalties: Vec<PenaltyFunction> =
                derived.into_iter().map(PenaltyFunction::Derived).collect();
            ("Relative Reachability", penalties)
        } else {
            (
                "Tabular AUP",
                sampled_penalties(config.num_rpenalties, config.seed),
            )
        };
        if penalties.is_empty() {
            name = "Vanilla";
        }

        let penalty_width = penalties.len() * num_actions;
        Ok(Self {
            name,
            num_actions,
            noop,
            goal_reward: env.goal_reward(),
            penalties,
            penalty_q: ValueTable::new(penalty_width),
            aup_q: ValueTable::new(num_actions),
            rng: SplitMix64::new(derive_seed(config.seed, EXPLORATION_STREAM, 0)),
            training_performance: TrainingPerformance::new(config.num_episodes),
            config,
        })
    }

    /// Build the agent and run the full training schedule against `env`.
    pub fn train<S>(env: &mut S, config: AupConfig) -> Result<Self, AupError>
    where
        S: Simulator + ?Sized,
    {
        let mut agent = Self::new(env, config)?;
        agent.fit(env);
        Ok(agent)
    }

    /// Train every penalty table, then the primary table on the penalized reward.
    pub fn fit<S>(&mut self, env: &mut S)
    where
        S: Simulator + ?Sized,
    {
        tracing::info!(
            agent = self.name,
            penalties = self.penalties.len(),
            episodes = self.config.penalty_episodes(),
            "Training penalty objectives"
        );
        for index in 0..self.penalties.len() {
            self.train_objective(env, Objective::Penalty(index));
        }

        self.training_performance = TrainingPerformance::new(self.config.num_episodes);
        tracing::info!(
            agent = self.name,
            episodes = self.config.num_episodes,
            impact_budget = self.config.impact_budget,
            "Training primary objective"
        );
        self.train_objective(env, Objective::Primary);

        tracing::info!(
            agent = self.name,
            states = self.aup_q.len(),
            final_performance = ?self.training_performance.final_performance(),
            "Training finished"
        );
    }

    /// Run one objective's episode budget.
    ///
    /// The primary phase starts from a fresh table and evaluates the greedy policy after every
    /// episode, recording the outcome at that episode's index.
    pub fn train_objective<S>(&mut self, env: &mut S, objective: Objective)
    where
        S: Simulator + ?Sized,
    {
        let episodes = match objective {
            Objective::Primary => {
                self.aup_q = ValueTable::new(self.num_actions);
                self.config.num_episodes
            }
            Objective::Penalty(_) => self.config.penalty_episodes(),
        };

        for episode in 0..episodes {
            let mut time_step = env.reset();
            let mut steps = 0usize;
            while !time_step.last() {
                let last = time_step.observation.board.key();
                let action = self.behavior_action(&last, objective);
                time_step = env.step(action);
                let next = time_step.observation.board.key();
                self.update(&last, action, &next, time_step.reward, objective);
                steps += 1;
            }

            if objective == Objective::Primary {
                let outcome = run_episode(&*self, env, self.config.evaluation_max_steps);
                self.training_performance
                    .record(episode, outcome.ret, outcome.performance);
                tracing::debug!(
                    episode,
                    steps,
                    ret = outcome.ret,
                    performance = outcome.performance,
                    "Primary episode"
                );
            } else {
                tracing::trace!(?objective, episode, steps, "Penalty episode");
            }
        }
        env.reset();
    }

    /// Greedy action under the primary table.
    pub fn act(&self, observation: &Observation) -> Action {
        self.greedy_action(&observation.board.key(), Objective::Primary)
    }

    pub fn greedy_action(&self, state: &StateKey, objective: Objective) -> Action {
        match objective {
            Objective::Primary => self.aup_q.argmax_in(state, 0..self.num_actions),
            Objective::Penalty(index) => {
                self.penalty_q.argmax_in(state, self.penalty_range(index))
            }
        }
    }

    /// Epsilon-greedy behaviour action over `objective`'s table.
    pub fn behavior_action(&mut self, state: &StateKey, objective: Objective) -> Action {
        let greedy = self.greedy_action(state, objective);
        epsilon_greedy(greedy, self.num_actions, self.config.epsilon, &mut self.rng)
    }

    /// Impact penalty of `action` in `state`.
    ///
    /// The L1 distance between the penalty Q-values of `action` and of the no-op, scaled by
    /// `N%` of the no-op's total attainable value.
    pub fn penalty(&self, state: &StateKey, action: Action) -> f64 {
        if self.penalties.is_empty() {
            return 0.0;
        }
        let Some(row) = self.penalty_q.get(state) else {
            return IMPACT_UNIT_UNDEFINED_PENALTY;
        };

        let n = self.num_actions;
        let mut shift = 0.0;
        let mut null_sum = 0.0;
        for i in 0..self.penalties.len() {
            let attainable = row[i * n + action];
            let null_attainable = row[i * n + self.noop];
            shift += (attainable - null_attainable).abs();
            null_sum += null_attainable.abs();
        }

        if null_sum == 0.0 {
            return IMPACT_UNIT_UNDEFINED_PENALTY;
        }
        shift / (self.config.impact_budget * 0.01 * null_sum)
    }

    /// One-step TD update of `objective`'s table for the transition `last --action--> next`.
    ///
    /// Penalty updates refresh every penalty index for `action`; in reachability mode the
    /// updated values are clipped into `[0, goal_reward]`.
    pub fn update(
        &mut self,
        last: &StateKey,
        action: Action,
        next: &StateKey,
        env_reward: Option<f64>,
        objective: Objective,
    ) {
        let discount = self.config.discount;
        match objective {
            Objective::Primary => {
                let reward = env_reward.unwrap_or(0.0) - self.penalty(last, action);
                let next_max = self.aup_q.max_in(next, 0..self.num_actions);
                let q = &mut self.aup_q.row_mut(last)[action];
                *q = td_step(*q, reward + discount * next_max);
            }
            Objective::Penalty(_) => {
                let n = self.num_actions;
                for i in 0..self.penalties.len() {
                    let reward = self.penalties[i].reward(next);
                    let next_max = self.penalty_q.max_in(next, self.penalty_range(i));
                    let q = &mut self.penalty_q.row_mut(last)[i * n + action];
                    *q = td_step(*q, reward + discount * next_max);
                }

                if self.config.state_penalties {
                    let goal = self.goal_reward;
                    let row = self.penalty_q.row_mut(last);
                    for i in 0..self.penalties.len() {
                        let q = &mut row[i * n + action];
                        *q = q.max(0.0).min(goal);
                    }
                }
            }
        }
    }

    fn penalty_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.num_actions;
        start..start + self.num_actions
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn config(&self) -> &AupConfig {
        &self.config
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn num_penalties(&self) -> usize {
        self.penalties.len()
    }

    pub fn is_vanilla(&self) -> bool {
        self.penalties.is_empty()
    }

    pub fn penalty_q(&self) -> &ValueTable {
        &self.penalty_q
    }

    pub fn primary_q(&self) -> &ValueTable {
        &self.aup_q
    }

    pub fn training_performance(&self) -> &TrainingPerformance {
        &self.training_performance
    }
}

/// Move `old` toward `target` by [`LEARNING_RATE`]; with a rate of one the result is `target`.
fn td_step(old: f64, target: f64) -> f64 {
    (1.0 - LEARNING_RATE) * old + LEARNING_RATE * target
}

impl Policy for AupAgent {
    fn act(&self, observation: &Observation) -> Action {
        AupAgent::act(self, observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aup_core::{ActionSpec, Board, DerivedReward, TimeStep};

    /// Static world: every action keeps the same board and pays nothing.
    struct Still {
        actions: usize,
        noop: Action,
        derivable: bool,
    }

    impl Still {
        fn new(actions: usize, noop: Action) -> Self {
            Self {
                actions,
                noop,
                derivable: false,
            }
        }
    }

    impl Simulator for Still {
        fn action_spec(&self) -> ActionSpec {
            ActionSpec {
                maximum: self.actions - 1,
            }
        }

        fn reset(&mut self) -> TimeStep {
            TimeStep::first(Board::from_rows(&["A"]))
        }

        fn step(&mut self, _action: Action) -> TimeStep {
            TimeStep::termination(Board::from_rows(&["A"]), 0.0)
        }

        fn goal_reward(&self) -> f64 {
            1.0
        }

        fn noop_action(&self) -> Action {
            self.noop
        }

        fn performance(&self) -> f64 {
            0.0
        }

        fn derive_possible_rewards(&mut self) -> Option<Vec<DerivedReward>> {
            self.derivable.then(|| {
                vec![
                    DerivedReward::indicator(StateKey::from("s"), 5.0),
                    DerivedReward::indicator(StateKey::from("t"), -5.0),
                ]
            })
        }
    }

    fn agent(actions: usize, num_rpenalties: usize) -> AupAgent {
        let config = AupConfig {
            num_rpenalties,
            num_episodes: 4,
            ..AupConfig::default()
        };
        AupAgent::new(&mut Still::new(actions, actions - 1), config).unwrap()
    }

    fn set_penalty_row(agent: &mut AupAgent, state: &StateKey, values: &[f64]) {
        agent.penalty_q.row_mut(state).copy_from_slice(values);
    }

    #[test]
    fn penalty_is_zero_without_penalty_functions() {
        let agent = agent(5, 0);
        let s = StateKey::from("s");
        for a in 0..5 {
            assert_eq!(agent.penalty(&s, a), 0.0);
        }
        assert_eq!(agent.name(), "Vanilla");
    }

    #[test]
    fn penalty_sentinel_when_noop_has_no_attainable_value() {
        let mut agent = agent(3, 2);
        let s = StateKey::from("s");
        assert_eq!(agent.penalty(&s, 0), IMPACT_UNIT_UNDEFINED_PENALTY);

        // Noop is action 2; its column is zero for both penalties.
        set_penalty_row(&mut agent, &s, &[4.0, -3.0, 0.0, 7.0, 1.0, 0.0]);
        assert_eq!(agent.penalty(&s, 0), 1.01);
        assert_eq!(agent.penalty(&s, 1), 1.01);
        assert_eq!(agent.penalty(&s, 2), 1.01);
    }

    #[test]
    fn penalty_scales_l1_shift_by_impact_unit() {
        let mut agent = agent(3, 2);
        let s = StateKey::from("s");
        // Penalty 0: [1, 3, 2]; penalty 1: [0, 5, -4]. Noop = 2.
        set_penalty_row(&mut agent, &s, &[1.0, 3.0, 2.0, 0.0, 5.0, -4.0]);

        // |1-2| + |0-(-4)| = 5; unit = 200 * 0.01 * (2 + 4) = 12
        assert!((agent.penalty(&s, 0) - 5.0 / 12.0).abs() < 1e-12);
        // |3-2| + |5-(-4)| = 10
        assert!((agent.penalty(&s, 1) - 10.0 / 12.0).abs() < 1e-12);
        assert_eq!(agent.penalty(&s, 2), 0.0);
    }

    #[test]
    fn primary_update_replaces_with_penalized_target() {
        let mut agent = agent(3, 1);
        let s = StateKey::from("s");
        let t = StateKey::from("t");
        set_penalty_row(&mut agent, &s, &[2.0, 0.0, 1.0]);
        agent.aup_q.row_mut(&t).copy_from_slice(&[0.5, 4.0, -1.0]);
        agent.aup_q.row_mut(&s)[0] = 100.0;

        agent.update(&s, 0, &t, Some(3.0), Objective::Primary);

        // penalty = |2-1| / (2 * 1) = 0.5
        let expected = 3.0 - 0.5 + 0.999 * 4.0;
        assert_eq!(agent.aup_q.value(&s, 0), expected);
    }

    #[test]
    fn primary_update_treats_missing_reward_as_zero() {
        let mut agent = agent(2, 0);
        let s = StateKey::from("s");
        let t = StateKey::from("t");

        agent.update(&s, 1, &t, None, Objective::Primary);
        assert_eq!(agent.aup_q.get(&s), Some(&[0.0, 0.0][..]));
    }

    #[test]
    fn self_loop_update_uses_pre_update_maximum() {
        let mut agent = agent(2, 0);
        let s = StateKey::from("s");
        agent.aup_q.row_mut(&s).copy_from_slice(&[1.0, 2.0]);

        agent.update(&s, 1, &s, Some(1.0), Objective::Primary);
        assert_eq!(agent.aup_q.value(&s, 1), 1.0 + 0.999 * 2.0);
    }

    #[test]
    fn penalty_update_refreshes_every_penalty_for_action() {
        let mut agent = agent(2, 3);
        let s = StateKey::from("s");
        let t = StateKey::from("t");
        agent
            .penalty_q
            .row_mut(&t)
            .copy_from_slice(&[1.0, 0.0, 0.0, 2.0, 3.0, 3.0]);

        agent.update(&s, 0, &t, Some(10.0), Objective::Penalty(1));

        let rewards: Vec<f64> = agent
            .penalties
            .iter_mut()
            .map(|p| p.reward(&t))
            .collect();
        let row = agent.penalty_q.get(&s).unwrap().to_vec();
        assert_eq!(row[0], rewards[0] + 0.999 * 1.0);
        assert_eq!(row[2], rewards[1] + 0.999 * 2.0);
        assert_eq!(row[4], rewards[2] + 0.999 * 3.0);
        assert_eq!([row[1], row[3], row[5]], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn reachability_updates_are_clipped_to_goal_reward() {
        let mut env = Still::new(2, 0);
        env.derivable = true;
        let config = AupConfig {
            state_penalties: true,
            num_episodes: 10,
            ..AupConfig::default()
        };
        let mut agent = AupAgent::new(&mut env, config).unwrap();
        assert_eq!(agent.name(), "Relative Reachability");
        assert_eq!(agent.num_penalties(), 2);

        let s = StateKey::from("s");
        let t = StateKey::from("t");
        for _ in 0..20 {
            agent.update(&s, 1, &s, None, Objective::Penalty(0));
            agent.update(&t, 0, &t, None, Objective::Penalty(1));
            agent.update(&s, 0, &t, None, Objective::Penalty(0));
        }

        for key in [&s, &t] {
            for v in agent.penalty_q.get(key).unwrap() {
                assert!((0.0..=1.0).contains(v), "{v} escaped [0, goal_reward]");
            }
        }
        assert_eq!(agent.penalty_q.value(&s, 1), 1.0);
    }

    #[test]
    fn reachability_requires_simulator_support() {
        let config = AupConfig {
            state_penalties: true,
            ..AupConfig::default()
        };
        let err = AupAgent::new(&mut Still::new(2, 0), config).unwrap_err();
        assert_eq!(err, AupError::ReachabilityUnavailable);
    }

    #[test]
    fn noop_outside_action_range_is_rejected() {
        let err = AupAgent::new(&mut Still::new(2, 4), AupConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AupError::NoopOutOfRange {
                noop: 4,
                num_actions: 2
            }
        );
    }
}
