//! Biography normalizer.
//!
//! Career rows arrive in many shapes: dates as ISO strings, month names or
//! year ranges; details as strings, lists or nested objects; field names
//! in French or English. This crate turns them into
//! [`NormalizedCareerEntry`] values, groups them by section, and renders
//! period labels.
//!
//! ```
//! use cabinet_bio::{group_entries, normalize_entries};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"categorie": "Sénat", "titre": "Sénateur", "periode": "2011-2017"}),
//!     json!({"categorie": "Gouvernement", "titre": "Ministre", "date_debut": "2022-05-20"}),
//!     json!({"titre": "   "}),
//! ];
//! let groups = group_entries(normalize_entries(&rows));
//!
//! assert_eq!(groups[0].label, "Gouvernement");
//! assert_eq!(groups[0].entries[0].period_label(), "Depuis 2022");
//! assert_eq!(groups[1].label, "Sénat");
//! ```

pub mod dates;
pub mod details;
pub mod entry;
pub mod group;
pub mod period;
pub mod text;

pub use dates::resolve_date;
pub use details::normalize_details;
pub use entry::{normalize_entries, normalize_row, NormalizedCareerEntry};
pub use group::{group_entries, BiographyGroup, CATEGORY_ORDER, UNCATEGORIZED};
pub use period::period_label;
