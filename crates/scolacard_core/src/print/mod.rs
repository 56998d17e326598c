//! Print sheet preparation.
//!
//! # Responsibility
//! - Describe the A4 card grid geometry.
//! - Partition the roster into fixed-capacity print pages.
//!
//! # Invariants
//! - Card order across pages equals roster order.
//! - Every page exposes exactly `capacity` slots; trailing slots of
//!   the last page are invisible placeholders.

pub mod layout;
