//! Facet partitioning: where each column of the selector begins
//!
//! The selector walks the tag choices in (category, name) order. A partition
//! describes that walk as a list of segments, one per heading, each knowing
//! how many choices it covers and at which choice index it starts:
//!
//! ```text
//!  index:   0      1      2     3      4
//!  choice:  misc   todo | awl   saw  | wood
//!  segment: Uncategorized | Tools    | Materials
//!  start:   0             | 2        | 4
//! ```
//!
//! Tags without a category are gathered under a virtual "Uncategorized"
//! heading that always comes first and is never stored anywhere.

use super::FacetError;
use super::source::{CategoryCount, FacetSource};
use crate::db::{CategoryId, TagId};
use std::collections::HashSet;
use tracing::debug;

/// Heading of the virtual bucket for tags without a category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Group label shown next to the virtual bucket
pub const UNCATEGORIZED_GROUP_LABEL: &str = "Various";

/// What a segment is headed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentHeading {
    /// A stored category
    Category { id: CategoryId, name: String },
    /// The virtual bucket of tags without a category
    Uncategorized,
}

impl SegmentHeading {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Category { name, .. } => name,
            Self::Uncategorized => UNCATEGORIZED_LABEL,
        }
    }

    /// Id of the stored category, `None` for the virtual bucket
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        match self {
            Self::Category { id, .. } => Some(*id),
            Self::Uncategorized => None,
        }
    }
}

/// A contiguous run of choices sharing one heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub heading: SegmentHeading,
    pub group_label: String,
    /// Number of choices in the run
    pub count: usize,
    /// Index of the first choice in the run
    pub start: usize,
}

impl Segment {
    /// Column header text, e.g. `Tools (Shop)`
    #[must_use]
    pub fn header(&self) -> String {
        format!("{} ({})", self.heading.name(), self.group_label)
    }

    /// Index one past the last choice in the run
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }
}

/// Ordered segments plus the set of tags in the virtual bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetPartition {
    segments: Vec<Segment>,
    uncategorized: HashSet<TagId>,
}

impl FacetPartition {
    /// Query `source` and lay out the segments
    ///
    /// # Errors
    /// Returns `FacetError` if either query fails.
    pub fn build<S: FacetSource + ?Sized>(source: &S) -> Result<Self, FacetError> {
        let categories = source.populated_categories()?;
        let uncategorized = source.uncategorized_tags()?;
        let partition = Self::from_parts(uncategorized, categories);
        debug!(
            segments = partition.segments.len(),
            uncategorized = partition.uncategorized.len(),
            "built facet partition"
        );
        Ok(partition)
    }

    /// Lay out segments from already-fetched query results
    ///
    /// Categories keep the order they are given in; ones reporting zero
    /// tags are dropped.
    #[must_use]
    pub fn from_parts(uncategorized: Vec<TagId>, categories: Vec<CategoryCount>) -> Self {
        let mut segments = Vec::with_capacity(categories.len() + 1);

        if !uncategorized.is_empty() {
            segments.push(Segment {
                heading: SegmentHeading::Uncategorized,
                group_label: UNCATEGORIZED_GROUP_LABEL.to_string(),
                count: uncategorized.len(),
                start: 0,
            });
        }

        segments.extend(categories.into_iter().filter(|c| c.tag_count > 0).map(|c| Segment {
            heading: SegmentHeading::Category { id: c.id, name: c.name },
            group_label: c.group_label,
            count: c.tag_count,
            start: 0,
        }));

        let mut start = 0;
        for segment in &mut segments {
            segment.start = start;
            start += segment.count;
        }

        Self { segments, uncategorized: uncategorized.into_iter().collect() }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `tag` sits in the virtual bucket
    #[must_use]
    pub fn is_uncategorized(&self, tag: TagId) -> bool {
        self.uncategorized.contains(&tag)
    }

    /// Number of choices the partition expects
    #[must_use]
    pub fn total(&self) -> usize {
        self.segments.iter().map(|s| s.count).sum()
    }
}
