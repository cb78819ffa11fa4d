use crate::state::{CreatureId, CreatureLog, GameState, LogEntry, ReplayError};

/// Wraps mutable access to [`GameState`] so that every change is logged.
///
/// Commands never touch the state directly. Each change is expressed as a
/// [`LogEntry`], applied through [`GameState::apply_log`] and kept, so the
/// recorded entries replay to exactly the state the command produced.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
    logs: Vec<LogEntry>,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            logs: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Applies `entry` and appends it to the log.
    pub fn record(&mut self, entry: LogEntry) -> Result<(), ReplayError> {
        self.state.apply_log(&entry)?;
        self.logs.push(entry);
        Ok(())
    }

    /// Records a batch of entries about one creature, in order.
    pub fn record_creature(
        &mut self,
        id: CreatureId,
        logs: impl IntoIterator<Item = CreatureLog>,
    ) -> Result<(), ReplayError> {
        logs.into_iter()
            .try_for_each(|log| self.record(LogEntry::creature(id, log)))
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn into_logs(self) -> Vec<LogEntry> {
        self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Creature;

    #[test]
    fn recorded_entries_replay_to_the_reduced_state() {
        let before = GameState::with_seed(9);
        let mut after = before.clone();
        let mut reducer = StateReducer::new(&mut after);

        reducer
            .record(LogEntry::CreateCreature(Creature::new(CreatureId(0), "imp", 6, 2)))
            .unwrap();
        reducer
            .record_creature(
                CreatureId(0),
                [
                    CreatureLog::Damage {
                        amount: 2,
                        dice: vec![2],
                    },
                    CreatureLog::ReduceEnergy(1),
                ],
            )
            .unwrap();
        let logs = reducer.into_logs();

        let mut replayed = before;
        replayed.apply_logs(&logs).unwrap();
        assert_eq!(replayed, after);
        assert_eq!(logs.len(), 3);
    }

    #[test]
    fn a_rejected_entry_is_not_recorded() {
        let mut state = GameState::default();
        let mut reducer = StateReducer::new(&mut state);

        let result = reducer.record(LogEntry::RemoveCreature(CreatureId(3)));
        assert_eq!(result, Err(ReplayError::CreatureNotFound(CreatureId(3))));
        assert!(reducer.logs().is_empty());
    }
}
