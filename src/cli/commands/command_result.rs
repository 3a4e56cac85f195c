use crate::core::builder::BuildSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Build,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running potgen commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
}

impl CommandResult {
    pub fn build(summary: BuildSummary) -> Self {
        Self {
            kind: CommandKind::Build,
            summary: CommandSummary::Build(summary),
            error_count: 0,
        }
    }

    pub fn init(summary: InitSummary) -> Self {
        let error_count = usize::from(summary.error.is_some());
        Self {
            kind: CommandKind::Init,
            summary: CommandSummary::Init(summary),
            error_count,
        }
    }
}
