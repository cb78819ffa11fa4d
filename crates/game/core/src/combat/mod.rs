//! Combat turn-order state machine.
//!
//! `GameState::combat` is `None` out of combat and `Some(Combat)` in combat.
//! The cursor always indexes a non-empty list while combat is active; the
//! methods here keep it pointing at the right logical creature as the list
//! changes. Dead participants keep their slot but are skipped when the turn
//! moves on.

use crate::state::{CreatureId, Distance, SceneId};

/// A creature entering combat with its initiative score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub creature: CreatureId,
    pub initiative: i32,
}

impl Combatant {
    pub fn new(creature: CreatureId, initiative: i32) -> Self {
        Self {
            creature,
            initiative,
        }
    }
}

/// Sorts combatants by descending initiative; ties keep their input order.
pub fn initiative_order(combatants: &[Combatant]) -> Vec<CreatureId> {
    let mut sorted = combatants.to_vec();
    sorted.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    sorted.into_iter().map(|combatant| combatant.creature).collect()
}

/// An active, turn-ordered encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combat {
    pub scene: SceneId,
    /// Participants in initiative order.
    pub creatures: Vec<CreatureId>,
    /// Index of the creature whose turn it is.
    pub cursor: usize,
    /// Movement the active creature has spent this turn.
    pub movement_used: Distance,
}

impl Combat {
    /// Starts combat on the first living creature in `creatures`.
    pub(crate) fn start(
        scene: SceneId,
        creatures: Vec<CreatureId>,
        is_dead: impl Fn(CreatureId) -> bool,
    ) -> Self {
        let mut combat = Self {
            scene,
            creatures,
            cursor: 0,
            movement_used: Distance::ZERO,
        };
        combat.cursor = combat.next_living(0, &is_dead).unwrap_or(0);
        combat
    }

    /// The creature whose turn it is.
    pub fn current(&self) -> CreatureId {
        self.creatures[self.cursor]
    }

    pub fn contains(&self, creature: CreatureId) -> bool {
        self.creatures.contains(&creature)
    }

    pub fn position_of(&self, creature: CreatureId) -> Option<usize> {
        self.creatures.iter().position(|id| *id == creature)
    }

    /// First living index at or after `from`, wrapping around once.
    fn next_living(&self, from: usize, is_dead: &impl Fn(CreatureId) -> bool) -> Option<usize> {
        let len = self.creatures.len();
        (0..len)
            .map(|step| (from + step) % len)
            .find(|index| !is_dead(self.creatures[*index]))
    }

    /// Hands the turn to the next living participant and resets movement.
    ///
    /// If nobody is alive the turn simply moves to the next slot.
    pub(crate) fn advance(&mut self, is_dead: impl Fn(CreatureId) -> bool) {
        let len = self.creatures.len();
        let next = (self.cursor + 1) % len;
        self.cursor = self.next_living(next, &is_dead).unwrap_or(next);
        self.movement_used = Distance::ZERO;
    }

    /// Appends a participant at the end of the order.
    pub(crate) fn add(&mut self, creature: CreatureId) {
        self.creatures.push(creature);
    }

    /// Removes a participant, keeping the cursor on the same logical creature.
    ///
    /// Removing the active creature gives the turn to the next living one with
    /// a fresh movement budget. Returns `false` once the list is empty and
    /// combat can no longer continue.
    pub(crate) fn remove(
        &mut self,
        creature: CreatureId,
        is_dead: impl Fn(CreatureId) -> bool,
    ) -> bool {
        let Some(index) = self.position_of(creature) else {
            return !self.creatures.is_empty();
        };
        self.creatures.remove(index);
        if self.creatures.is_empty() {
            self.cursor = 0;
            return false;
        }

        if index < self.cursor {
            self.cursor -= 1;
        } else if index == self.cursor {
            let from = self.cursor % self.creatures.len();
            self.cursor = self.next_living(from, &is_dead).unwrap_or(from);
            self.movement_used = Distance::ZERO;
        }
        true
    }

    /// Moves a participant to `new_index`; the active creature stays active.
    pub(crate) fn reposition(&mut self, creature: CreatureId, new_index: usize) {
        let active = self.current();
        if let Some(index) = self.position_of(creature) {
            self.creatures.remove(index);
            let new_index = new_index.min(self.creatures.len());
            self.creatures.insert(new_index, creature);
        }
        self.cursor = self.position_of(active).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CreatureId = CreatureId(1);
    const B: CreatureId = CreatureId(2);
    const C: CreatureId = CreatureId(3);
    const D: CreatureId = CreatureId(4);

    fn alive(_: CreatureId) -> bool {
        false
    }

    fn combat(creatures: &[CreatureId]) -> Combat {
        Combat::start(SceneId::from("arena"), creatures.to_vec(), alive)
    }

    #[test]
    fn initiative_sorts_descending_with_stable_ties() {
        let order = initiative_order(&[
            Combatant::new(A, 5),
            Combatant::new(B, 12),
            Combatant::new(C, 5),
            Combatant::new(D, 20),
        ]);
        assert_eq!(order, vec![D, B, A, C]);
    }

    #[test]
    fn four_advances_visit_a_b_c_a() {
        let mut combat = combat(&[A, B, C]);
        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(combat.current());
            combat.advance(alive);
        }
        assert_eq!(visited, vec![A, B, C, A]);
    }

    #[test]
    fn advance_skips_the_dead_and_resets_movement() {
        let mut combat = combat(&[A, B, C]);
        combat.movement_used = Distance(300);
        combat.advance(|id| id == B);
        assert_eq!(combat.current(), C);
        assert_eq!(combat.movement_used, Distance::ZERO);
    }

    #[test]
    fn start_skips_a_dead_leader() {
        let combat = Combat::start(SceneId::from("arena"), vec![A, B], |id| id == A);
        assert_eq!(combat.current(), B);
    }

    #[test]
    fn removing_before_the_cursor_keeps_the_active_creature() {
        let mut combat = combat(&[A, B, C]);
        combat.advance(alive);
        combat.advance(alive);
        assert_eq!(combat.current(), C);

        assert!(combat.remove(A, alive));
        assert_eq!(combat.current(), C);
        assert_eq!(combat.cursor, 1);
    }

    #[test]
    fn removing_the_active_creature_passes_the_turn() {
        let mut combat = combat(&[A, B, C]);
        combat.advance(alive);
        combat.movement_used = Distance(100);

        assert!(combat.remove(B, alive));
        assert_eq!(combat.current(), C);
        assert_eq!(combat.movement_used, Distance::ZERO);
    }

    #[test]
    fn removing_the_active_last_creature_wraps() {
        let mut combat = combat(&[A, B, C]);
        combat.advance(alive);
        combat.advance(alive);

        assert!(combat.remove(C, alive));
        assert_eq!(combat.current(), A);
    }

    #[test]
    fn removing_everyone_ends_combat() {
        let mut combat = combat(&[A]);
        assert!(!combat.remove(A, alive));
    }

    #[test]
    fn reposition_keeps_the_active_creature_and_budget() {
        let mut combat = combat(&[A, B, C]);
        combat.advance(alive);
        combat.movement_used = Distance(250);

        combat.reposition(C, 0);
        assert_eq!(combat.creatures, vec![C, A, B]);
        assert_eq!(combat.current(), B);
        assert_eq!(combat.movement_used, Distance(250));

        combat.reposition(B, 0);
        assert_eq!(combat.creatures, vec![B, C, A]);
        assert_eq!(combat.current(), B);
    }
}
