//! Ledgers for every set in a run's selection.

use super::ledger::{percent, SetLedger};
use crate::cards::Rarity;
use crate::catalog::{Catalog, PackDraw, SetId};
use crate::core::error::RunError;

/// One ledger per selected set, in selection order.
#[derive(Debug, Clone)]
pub struct Collection {
    ledgers: Vec<SetLedger>,
}

impl Collection {
    /// Rejects empty, duplicate, or unknown selections.
    pub fn new(catalog: &Catalog, selection: &[SetId]) -> Result<Self, RunError> {
        validate_selection(catalog, selection)?;
        let ledgers = selection
            .iter()
            .filter_map(|id| catalog.set(*id))
            .map(|set| SetLedger::new(set.clone()))
            .collect();
        Ok(Self { ledgers })
    }

    pub fn ledgers(&self) -> &[SetLedger] {
        &self.ledgers
    }

    pub fn ledgers_mut(&mut self) -> &mut [SetLedger] {
        &mut self.ledgers
    }

    pub fn ledger(&self, set: SetId) -> Option<&SetLedger> {
        self.ledgers.iter().find(|l| l.set().id() == set)
    }

    pub fn ledger_mut(&mut self, set: SetId) -> Option<&mut SetLedger> {
        self.ledgers.iter_mut().find(|l| l.set().id() == set)
    }

    pub fn set_ids(&self) -> impl Iterator<Item = SetId> + '_ {
        self.ledgers.iter().map(|l| l.set().id())
    }

    /// Routes a pack opening to its set's ledger. Draws from unselected sets
    /// are ignored and report zero new cards.
    pub fn add_draw(&mut self, draw: &PackDraw) -> usize {
        self.ledger_mut(draw.pack.set)
            .map_or(0, |ledger| ledger.add_draw(draw))
    }

    pub fn standard_obtained(&self) -> u32 {
        self.ledgers.iter().map(SetLedger::standard_obtained).sum()
    }

    pub fn standard_total(&self) -> u32 {
        self.ledgers.iter().map(SetLedger::standard_total).sum()
    }

    pub fn standard_percent(&self) -> f64 {
        percent(self.standard_obtained(), self.standard_total())
    }

    pub fn rarity_obtained(&self, rarity: Rarity) -> u32 {
        self.ledgers.iter().map(|l| l.rarity_obtained(rarity)).sum()
    }

    pub fn rarity_total(&self, rarity: Rarity) -> u32 {
        self.ledgers.iter().map(|l| l.rarity_total(rarity)).sum()
    }

    pub fn has_all_standard(&self) -> bool {
        self.ledgers.iter().all(SetLedger::has_all_standard)
    }

    pub fn has_all_rarity(&self, rarity: Rarity) -> bool {
        self.ledgers.iter().all(|l| l.has_all_rarity(rarity))
    }

    /// Lowest standard tier not yet fully owned across the selection.
    pub fn lowest_incomplete_standard(&self) -> Option<Rarity> {
        Rarity::STANDARD
            .into_iter()
            .find(|r| !self.has_all_rarity(*r))
    }
}

pub fn validate_selection(catalog: &Catalog, selection: &[SetId]) -> Result<(), RunError> {
    if selection.is_empty() {
        return Err(RunError::EmptySelection);
    }
    for (i, id) in selection.iter().enumerate() {
        if catalog.set(*id).is_none() {
            return Err(RunError::UnknownSet(*id));
        }
        if selection[..i].contains(id) {
            return Err(RunError::DuplicateSet(*id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{demo_catalog, PackId};

    #[test]
    fn test_selection_validation() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(
            Collection::new(&catalog, &[]).unwrap_err(),
            RunError::EmptySelection
        );
        assert_eq!(
            Collection::new(&catalog, &[0, 0]).unwrap_err(),
            RunError::DuplicateSet(0)
        );
        assert_eq!(
            Collection::new(&catalog, &[5]).unwrap_err(),
            RunError::UnknownSet(5)
        );
        let collection = Collection::new(&catalog, &[1, 0]).unwrap();
        assert_eq!(collection.set_ids().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_draws_route_to_their_set() {
        let catalog = demo_catalog().unwrap();
        let mut collection = Collection::new(&catalog, &[0, 1]).unwrap();
        let draw = PackDraw {
            pack: PackId { set: 1, index: 0 },
            cards: [0, 1, 2, 3, 4],
        };
        assert_eq!(collection.add_draw(&draw), 5);
        assert_eq!(collection.ledger(1).unwrap().obtained(), 5);
        assert_eq!(collection.ledger(0).unwrap().obtained(), 0);
        assert_eq!(collection.standard_obtained(), 5);
        assert_eq!(collection.standard_total(), 101 + 51);
        assert_eq!(
            collection.lowest_incomplete_standard(),
            Some(Rarity::OneDiamond)
        );
    }
}
