use crate::core::constants::RARITY_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tiers in canonical ascending order. The four diamond tiers are
/// "standard"; everything from one star upward is "rare".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "D")]
    OneDiamond = 0,
    #[serde(rename = "DD")]
    TwoDiamond = 1,
    #[serde(rename = "DDD")]
    ThreeDiamond = 2,
    #[serde(rename = "DDDD")]
    FourDiamond = 3,
    #[serde(rename = "S")]
    OneStar = 4,
    #[serde(rename = "SS")]
    TwoStar = 5,
    #[serde(rename = "SSS")]
    ThreeStar = 6,
    #[serde(rename = "R")]
    OneShiny = 7,
    #[serde(rename = "RR")]
    TwoShiny = 8,
    #[serde(rename = "C")]
    Crown = 9,
}

impl Rarity {
    /// All tiers in canonical order; draw-rate ladders are accumulated in
    /// this order.
    pub const ALL: [Rarity; RARITY_COUNT] = [
        Rarity::OneDiamond,
        Rarity::TwoDiamond,
        Rarity::ThreeDiamond,
        Rarity::FourDiamond,
        Rarity::OneStar,
        Rarity::TwoStar,
        Rarity::ThreeStar,
        Rarity::OneShiny,
        Rarity::TwoShiny,
        Rarity::Crown,
    ];

    /// Standard tiers, lowest first.
    pub const STANDARD: [Rarity; 4] = [
        Rarity::OneDiamond,
        Rarity::TwoDiamond,
        Rarity::ThreeDiamond,
        Rarity::FourDiamond,
    ];

    /// First tier that counts as rare.
    pub const RARE_CUT: Rarity = Rarity::OneStar;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_standard(self) -> bool {
        self < Self::RARE_CUT
    }

    pub fn is_rare(self) -> bool {
        self >= Self::RARE_CUT
    }

    /// Short symbol used in reports and catalog files.
    pub fn symbol(self) -> &'static str {
        match self {
            Rarity::OneDiamond => "D",
            Rarity::TwoDiamond => "DD",
            Rarity::ThreeDiamond => "DDD",
            Rarity::FourDiamond => "DDDD",
            Rarity::OneStar => "S",
            Rarity::TwoStar => "SS",
            Rarity::ThreeStar => "SSS",
            Rarity::OneShiny => "R",
            Rarity::TwoShiny => "RR",
            Rarity::Crown => "C",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Rarity> {
        Self::ALL.into_iter().find(|r| r.symbol() == symbol)
    }

    /// Currency needed to redeem one card of this tier.
    pub fn currency_cost(self) -> u32 {
        match self {
            Rarity::OneDiamond => 35,
            Rarity::TwoDiamond => 70,
            Rarity::ThreeDiamond => 150,
            Rarity::FourDiamond => 500,
            Rarity::OneStar => 400,
            Rarity::TwoStar => 1250,
            Rarity::ThreeStar => 1500,
            Rarity::OneShiny => 1000,
            Rarity::TwoShiny => 1350,
            Rarity::Crown => 2500,
        }
    }

    /// Stamina cost of a bonus-draw offer whose highest card has this tier.
    /// `None` means offers containing this tier are never generated.
    pub fn stamina_cost(self) -> Option<u32> {
        match self {
            Rarity::OneDiamond | Rarity::TwoDiamond => Some(1),
            Rarity::ThreeDiamond => Some(2),
            Rarity::FourDiamond | Rarity::OneStar => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureVariant {
    Standard,
    Ex,
}

/// What a card depicts. Only creatures carry extra data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Creature {
        species: String,
        variant: CreatureVariant,
    },
    Item,
    Supporter,
    Tool,
}

/// An immutable catalog card. `packs` holds indices into the owning set's
/// pack list; an empty list marks a special-unlock card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Position of the card inside its set.
    pub index: usize,
    pub number: u32,
    pub name: String,
    pub kind: CardKind,
    pub rarity: Rarity,
    pub packs: Vec<usize>,
}

impl Card {
    /// Display name; EX creatures get a suffix.
    pub fn display_name(&self) -> String {
        match &self.kind {
            CardKind::Creature {
                variant: CreatureVariant::Ex,
                ..
            } => format!("{} EX", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn is_in(&self, pack: usize) -> bool {
        self.packs.contains(&pack)
    }

    /// True when the card can only be pulled from this one pack.
    pub fn is_exclusive_to(&self, pack: usize) -> bool {
        self.packs.len() == 1 && self.packs[0] == pack
    }

    pub fn is_standard(&self) -> bool {
        self.rarity.is_standard()
    }

    pub fn is_rare(&self) -> bool {
        self.rarity.is_rare()
    }

    pub fn is_special_unlock(&self) -> bool {
        self.packs.is_empty()
    }

    /// Redemption price, or `None` for special-unlock cards.
    pub fn currency_cost(&self) -> Option<u32> {
        if self.is_special_unlock() {
            None
        } else {
            Some(self.rarity.currency_cost())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rarity: Rarity, packs: Vec<usize>) -> Card {
        Card {
            index: 0,
            number: 1,
            name: "Mossling".to_string(),
            kind: CardKind::Creature {
                species: "Mossling".to_string(),
                variant: CreatureVariant::Standard,
            },
            rarity,
            packs,
        }
    }

    #[test]
    fn test_rarity_order_and_cut() {
        assert!(Rarity::OneDiamond < Rarity::Crown);
        assert!(Rarity::FourDiamond.is_standard());
        assert!(Rarity::OneStar.is_rare());
        assert_eq!(Rarity::ALL.iter().filter(|r| r.is_standard()).count(), 4);
        for (i, r) in Rarity::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn test_stamina_costs_only_on_five_lowest_tiers() {
        let with_cost: Vec<Rarity> = Rarity::ALL
            .into_iter()
            .filter(|r| r.stamina_cost().is_some())
            .collect();
        assert_eq!(with_cost, Rarity::ALL[..5].to_vec());
    }

    #[test]
    fn test_symbol_round_trip() {
        for r in Rarity::ALL {
            assert_eq!(Rarity::from_symbol(r.symbol()), Some(r));
        }
        assert_eq!(Rarity::from_symbol("X"), None);
        assert_eq!(serde_json::to_string(&Rarity::FourDiamond).unwrap(), "\"DDDD\"");
        let parsed: Rarity = serde_json::from_str("\"RR\"").unwrap();
        assert_eq!(parsed, Rarity::TwoShiny);
    }

    #[test]
    fn test_special_unlock_has_no_price() {
        let special = card(Rarity::TwoDiamond, vec![]);
        assert!(special.is_special_unlock());
        assert_eq!(special.currency_cost(), None);

        let normal = card(Rarity::TwoDiamond, vec![0, 1]);
        assert_eq!(normal.currency_cost(), Some(70));
        assert!(normal.is_in(1));
        assert!(!normal.is_exclusive_to(1));
        assert!(card(Rarity::OneStar, vec![1]).is_exclusive_to(1));
    }

    #[test]
    fn test_ex_display_name() {
        let mut c = card(Rarity::FourDiamond, vec![0]);
        assert_eq!(c.display_name(), "Mossling");
        c.kind = CardKind::Creature {
            species: "Mossling".to_string(),
            variant: CreatureVariant::Ex,
        };
        assert_eq!(c.display_name(), "Mossling EX");
    }
}
