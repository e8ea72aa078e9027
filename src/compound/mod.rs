//! Registry records describing simulated compounds.
//!
//! Loading and indexing the registry is left to the host; this module owns the
//! per-record contract: deserialization, the one-shot `check` pass, and
//! translation of the display name.

mod definition;
mod translation;

pub use definition::{CompoundDefinition, EPSILON};
pub use translation::{TranslationCatalog, TranslationSource};
