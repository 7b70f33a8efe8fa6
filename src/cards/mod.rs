//! Card and rarity definitions.

mod types;

pub use types::{Card, CardKind, CreatureVariant, Rarity};
