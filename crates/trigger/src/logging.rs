use crate::events::ActivationEvent;

pub trait ActivationLogWriter {
    fn write(&mut self, event: ActivationEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryActivationLog {
    events: Vec<ActivationEvent>,
}

impl InMemoryActivationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ActivationEvent] {
        &self.events
    }
}

impl ActivationLogWriter for InMemoryActivationLog {
    fn write(&mut self, event: ActivationEvent) {
        self.events.push(event);
    }
}

/// Forwards stage transitions to the `tracing` subscriber at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActivationLog;

impl ActivationLogWriter for TracingActivationLog {
    fn write(&mut self, event: ActivationEvent) {
        tracing::debug!(
            activation = event.activation,
            stage = ?event.stage,
            "activation stage"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationLogWriter, InMemoryActivationLog};
    use crate::events::{ActivationEvent, ActivationStage};

    #[test]
    fn in_memory_log_keeps_write_order() {
        let mut log = InMemoryActivationLog::new();

        log.write(ActivationEvent::new(1, ActivationStage::BusyEntered));
        log.write(ActivationEvent::new(1, ActivationStage::IdleRestored));

        assert_eq!(log.events().len(), 2);
        assert_eq!(log.events()[0].stage, ActivationStage::BusyEntered);
        assert_eq!(log.events()[1].stage, ActivationStage::IdleRestored);
    }
}
