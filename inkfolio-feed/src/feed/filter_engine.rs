use crate::{
    dto::{output::FeedItem, NotificationKind},
    error::Error,
};
use serde::{Serialize, Serializer};
use std::{borrow::Cow, fmt, str::FromStr};

///
/// Active type filter of the feed.
///
/// The set of filters is closed: `all` plus every [NotificationKind].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Kind(NotificationKind),
}

impl FeedFilter {
    pub fn options() -> Vec<FeedFilter> {
        std::iter::once(FeedFilter::All)
            .chain(NotificationKind::ALL.into_iter().map(FeedFilter::Kind))
            .collect()
    }

    pub fn matches(&self, item: &FeedItem) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Kind(kind) => item.kind == Some(*kind),
        }
    }
}

impl FromStr for FeedFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(FeedFilter::All);
        }

        NotificationKind::from_str(&s.to_ascii_lowercase())
            .map(FeedFilter::Kind)
            .map_err(|_| Error::InvalidFilter(s.to_string()))
    }
}

impl fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFilter::All => f.write_str("all"),
            FeedFilter::Kind(kind) => f.write_str(kind.as_ref()),
        }
    }
}

impl Serialize for FeedFilter {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

///
/// Selects feed items matching the filter.
///
/// [FeedFilter::All] borrows the feed as it is,
/// other filters keep only items with exactly that type.
///
pub fn apply(feed: &[FeedItem], filter: FeedFilter) -> Cow<'_, [FeedItem]> {
    match filter {
        FeedFilter::All => Cow::Borrowed(feed),
        filter => Cow::Owned(
            feed.iter()
                .filter(|item| filter.matches(item))
                .cloned()
                .collect(),
        ),
    }
}
