#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationStage {
    BusyEntered,
    ResponseReceived,
    Rendered,
    ApplicationErrorSurfaced,
    TransportErrorSurfaced,
    IdleRestored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    pub activation: u64,
    pub stage: ActivationStage,
}

impl ActivationEvent {
    pub fn new(activation: u64, stage: ActivationStage) -> Self {
        Self { activation, stage }
    }
}
