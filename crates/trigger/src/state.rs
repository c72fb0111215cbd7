#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl TriggerState {
    /// Only an idle trigger reacts; a disabled one swallows the activation.
    pub fn accepts_activation(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TriggerState;

    #[test]
    fn only_idle_accepts_activation() {
        assert!(TriggerState::Idle.accepts_activation());
        assert!(!TriggerState::Loading.accepts_activation());
        assert!(!TriggerState::Succeeded.accepts_activation());
        assert!(!TriggerState::Failed.accepts_activation());
    }
}
