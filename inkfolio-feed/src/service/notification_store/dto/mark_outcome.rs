#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    Marked,
    AlreadyRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkAllReadReport {
    /// notifications that were unread locally before the call
    pub marked: usize,
}
