//! Crontab record parsing, folding, matching, and regeneration.
//!
//! A pure, synchronous transformation pipeline over crontab-style text:
//! classify lines against a declared schema, fold multi-line logical
//! groupings (naming comment + environment block + schedule line) into
//! single records, match desired-state specifications against them, and
//! regenerate the file deterministically while preserving unrecognized
//! content verbatim. The engine performs no I/O; reading, locking, and
//! atomic write-back belong to the caller.

pub mod error;
pub mod field;
pub mod generate;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod property;
pub mod record;
pub mod schema;

pub use error::{Error, Result};
pub use field::{Field, FieldValue};
pub use generate::{DEFAULT_HEADER, generate};
pub use matcher::{ResourceSpec, find_match, find_match_with};
pub use normalize::normalize;
pub use parser::parse;
pub use record::{CronRecord, CronTab, RawRecord};
pub use schema::{KindSpec, NAME_MARKER, RecordKind, Registry};
