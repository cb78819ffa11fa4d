//! Encounter scripts: RON lists of commands.

use std::path::Path;

use anyhow::{Context, Result};
use game_core::Command;

/// The encounter bundled with the binary.
pub const BUNDLED: &str = include_str!("../scripts/goblin_ambush.ron");

pub fn parse(content: &str) -> Result<Vec<Command>> {
    ron::from_str(content).context("Failed to parse encounter script")
}

pub fn load(path: &Path) -> Result<Vec<Command>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse(&content).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::CreatureId;

    #[test]
    fn bundled_script_parses() {
        let commands = parse(BUNDLED).unwrap();
        assert!(matches!(commands.first(), Some(Command::Passthrough(_))));
        assert!(matches!(commands.last(), Some(Command::StopCombat(_))));
        assert_eq!(
            commands.iter().filter(|c| c.name() == "create_creature").count(),
            4
        );
    }

    #[test]
    fn scripts_round_trip_through_ron() {
        let commands = vec![
            Command::act("strike", Some(CreatureId(2))),
            Command::end_turn(),
            Command::rollback(0, 3),
        ];
        let text = ron::to_string(&commands).unwrap();
        assert_eq!(parse(&text).unwrap(), commands);
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(parse("[Teleport(())]").is_err());
    }
}
