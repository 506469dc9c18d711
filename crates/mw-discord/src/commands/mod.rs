//! Slash commands for Discord bot (poise implementation)

mod treino;

use std::sync::Arc;

use mw_monitor::SessionCoordinator;

/// User data stored and accessible in all command invocations
pub struct Data {
    pub coordinator: Arc<SessionCoordinator>,
}

/// Error type for commands
pub type Error = crate::error::DiscordError;

/// Context type for commands
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Export commands for registration
pub use treino::{TrainingAction, start_reply, stop_reply, treino};

/// Get all commands for registration
pub fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![treino()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_commands() {
        let commands = get_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "treino");
        assert!(commands[0].slash_action.is_some());
        assert_eq!(commands[0].parameters.len(), 1);
        assert_eq!(commands[0].parameters[0].name, "acao");
    }
}
