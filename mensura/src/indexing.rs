//! Indexing guidance for the composite layout
//!
//! The three-column record puts everything the query layer needs into the
//! comparator column: predicates built by [`crate::query::build_predicate`]
//! compare only comparators, never magnitudes or unit strings. Index the
//! comparator column and leave the other two alone.
//!
//! # Single-field index
//!
//! A plain B-tree index on the comparator column serves every supported
//! lookup: equality and ordering comparisons become index seeks, `range`
//! becomes a bounded scan, and `isnull` uses the column's null entries
//! (all three columns are null together, so any one of them answers the
//! null check).
//!
//! # Composite index
//!
//! When quantity predicates are habitually combined with a selective
//! scalar column (a tenant id, a category), put the scalar column first
//! and the comparator second, so the ordered comparator run within each
//! scalar group supports range scans.
//!
//! # Partial index
//!
//! Sparse columns (mostly-null quantities) benefit from a partial index
//! with a `comparator IS NOT NULL` condition: `isnull=false` predicates
//! and all value comparisons only ever touch non-null rows.
//!
//! # Covering index
//!
//! Queries that filter on the quantity and also return it can cover from
//! an index on the comparator that includes magnitude and units as
//! non-key columns, skipping the heap fetch entirely.
//!
//! # What not to index
//!
//! The magnitude column orders by display value, which is meaningless
//! across units (2 kg would sort before 300 g). The units column is
//! low-cardinality text. Neither supports any query the engine issues.
