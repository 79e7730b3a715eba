use serde::{Deserialize, Serialize};

/// Commands an external control surface may issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ControlCommand {
    Pause,
    Resume,
    /// Clear the arena and start a fresh game.
    Restart,
    /// Advance up to `count` ticks, stopping early on a winner.
    Step { count: u64 },
}
