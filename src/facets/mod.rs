//! Faceted tag selector
//!
//! Renders the full tag universe as checkboxes grouped into columns, one per
//! populated category, with tags lacking a category collected under a leading
//! "Uncategorized (Various)" column.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   populated_categories()   ┌──────────────────┐
//! │  FacetSource         │ ─────────────────────────▶ │  FacetPartition  │
//! │  (DatabaseSource,    │   uncategorized_tags()     │  segments +      │
//! │   or any read port)  │                            │  offsets         │
//! └──────────────────────┘                            └──────────────────┘
//!            │ tag_group_label()                               │
//!            ▼                                                 ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  FacetedCheckboxSelect::render(attrs, selected, choices) -> HTML   │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selector is read-only: it issues a fixed number of queries per render
//! plus one group lookup per uncategorized choice, and returns a complete
//! markup string. Rendering the same data twice yields identical output.
//!
//! # Examples
//!
//! ```no_run
//! use ideaboard::db::Database;
//! use ideaboard::facets::{DatabaseSource, FacetScope, FacetedCheckboxSelect, FieldAttrs};
//!
//! let db = Database::open("my_board").unwrap();
//! let source = DatabaseSource::new(&db, FacetScope::All);
//! let choices = source.choices().unwrap();
//! let html = FacetedCheckboxSelect::new(&source)
//!     .render(FieldAttrs::new("tags").with_id_base("id_tags"), ["3", "5"], &choices)
//!     .unwrap();
//! println!("{html}");
//! ```

pub mod error;
pub mod html;
pub mod partition;
pub mod source;
pub mod widget;

pub use error::FacetError;
pub use partition::{FacetPartition, Segment, SegmentHeading, UNCATEGORIZED_GROUP_LABEL, UNCATEGORIZED_LABEL};
pub use source::{CategoryCount, DatabaseSource, FacetScope, FacetSource};
pub use widget::{Choice, FacetedCheckboxSelect, FieldAttrs};
