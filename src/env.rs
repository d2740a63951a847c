use crate::catalog::Catalog;

/// Whether the loop still accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Mutable state shared by every command during one run.
///
/// The session contains:
/// - `catalog`: the movies added so far.
/// - `pretty`: render catalog output as indented JSON.
/// - `state`: set to [`LoopState::Stopped`] to end the loop.
#[derive(Debug, Clone)]
pub struct Session {
    pub catalog: Catalog,
    pub pretty: bool,
    pub state: LoopState,
}

impl Session {
    /// Empty catalog, compact rendering, running.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            pretty: false,
            state: LoopState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
