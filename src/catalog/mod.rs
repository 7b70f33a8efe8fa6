//! Read-only game data: sets, packs, draw rates, and catalog loading.

pub mod demo;
pub mod draw_table;
pub mod file;
pub mod pack;
pub mod set;

pub use demo::{demo_catalog, demo_rates};
pub use draw_table::{PackRates, SlotRates};
pub use file::{load_catalog, CatalogFile, UnlockRule};
pub use pack::{Pack, PackDraw, PackId, SetId};
pub use set::{CardSet, CardSetBuilder, Catalog, SpecialUnlock, UnlockPredicate};
