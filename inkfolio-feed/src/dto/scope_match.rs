///
/// How a scoped feed treats notifications sent without `userType`
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMatch {
    /// only notifications tagged with the scope are shown
    #[default]
    Exact,
    /// untagged notifications are addressed to whoever fetched them
    IncludeUntagged,
}
