/// Application lifecycle phase as reported by the host OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum AppPhase {
    Foreground,
    Inactive,
    Background,
}

impl AppPhase {
    /// Inactive and background are the same thing as far as presence goes.
    pub fn is_foreground(&self) -> bool {
        matches!(self, AppPhase::Foreground)
    }
}
