use crate::error::Error;

#[derive(Debug)]
pub enum ReadTransition {
    Marked,
    AlreadyRead,
    /// activity log entries have no read state
    NotApplicable,
    /// navigation still happened, only read state is affected
    Failed(Error),
}

#[derive(Debug)]
pub struct ActivationOutcome {
    pub read_transition: ReadTransition,
    pub navigated_to: Option<String>,
}
