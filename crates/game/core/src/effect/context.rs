//! Execution context shared by every effect resolved within one command.

use crate::config::ResurrectionPolicy;
use crate::env::{GameEnv, OracleError, compute_seed};
use crate::state::{ConditionId, CreatureId, GameState};

use super::{Dice, EffectError};

/// Context value mixed into every dice seed.
const ROLL_CONTEXT: u32 = 0x0d1c_e000;

/// Realized outcome of rolling a [`Dice`] expression.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Roll {
    /// Face values, in roll order. Empty for flat amounts.
    pub dice: Vec<u32>,
    pub total: u32,
}

/// Allocators and oracles needed to turn effects into log entries.
///
/// Both counters start from the state the context was built from and advance
/// exactly as applying the produced log entries advances the state, so ids and
/// dice seeds drawn here match what a replay of those entries reconstructs.
pub struct EffectContext<'a> {
    env: GameEnv<'a>,
    game_seed: u64,
    dice_rolled: u64,
    next_condition_id: u32,
}

impl<'a> EffectContext<'a> {
    pub fn new(state: &GameState, env: GameEnv<'a>) -> Self {
        Self {
            env,
            game_seed: state.game_seed,
            dice_rolled: state.dice_rolled,
            next_condition_id: state.next_condition_id,
        }
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    /// Rolls `dice` for an effect landing on `target`.
    ///
    /// Flat amounts never touch the RNG oracle.
    pub fn roll(&mut self, dice: &Dice, target: CreatureId) -> Result<Roll, EffectError> {
        if !dice.is_rollable() {
            return Err(EffectError::UnrollableDice(*dice));
        }
        let count = dice.dice_count();
        let mut faces = Vec::with_capacity(count as usize);
        if count > 0 {
            let rng = self.env.rng()?;
            for _ in 0..count {
                let seed = compute_seed(self.game_seed, self.dice_rolled, target.0, ROLL_CONTEXT);
                faces.push(rng.roll_die(seed, dice.sides));
                self.dice_rolled += 1;
            }
        }
        let sum: i64 = faces.iter().map(|face| *face as i64).sum::<i64>() + dice.modifier as i64;
        Ok(Roll {
            dice: faces,
            total: sum.clamp(0, u32::MAX as i64) as u32,
        })
    }

    pub fn allocate_condition_id(&mut self) -> ConditionId {
        let id = ConditionId(self.next_condition_id);
        self.next_condition_id += 1;
        id
    }

    pub fn resurrection(&self) -> Result<ResurrectionPolicy, OracleError> {
        Ok(self.env.config()?.resurrection())
    }
}
