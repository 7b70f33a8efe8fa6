//! Built-in synthetic catalog used when no catalog file is supplied.

use super::draw_table::PackRates;
use super::set::{CardSetBuilder, Catalog};
use crate::cards::{CardKind, CreatureVariant, Rarity};
use crate::core::constants::RARITY_COUNT;
use crate::core::error::CatalogError;
use crate::core::Fraction;

const SPECIES: [&str; 24] = [
    "Mossling", "Cindertail", "Brookfin", "Pebblepup", "Thistlebat", "Glowmoth",
    "Rustclaw", "Dewdrake", "Ashhopper", "Quillhog", "Marshmaw", "Sunbeetle",
    "Frostkit", "Vineviper", "Emberwisp", "Tidemite", "Stonebeak", "Galewing",
    "Loamlurker", "Sparkmouse", "Reefray", "Duskowl", "Burrowbun", "Coralisk",
];

const ITEMS: [&str; 4] = ["Trail Ration", "Potion", "Lucky Charm", "Field Map"];
const SUPPORTERS: [&str; 3] = ["Ranger Ilse", "Professor Oduya", "Keeper Bram"];
const TOOLS: [&str; 2] = ["Sturdy Satchel", "Climbing Hook"];

const THORNBACK: &[&str] = &["Thornback"];
const GLIMMERWING: &[&str] = &["Glimmerwing"];
const BOTH: &[&str] = &["Thornback", "Glimmerwing"];
const UNDERTOW: &[&str] = &["Undertow"];

fn row(weights: &[(Rarity, i64, i64)]) -> Result<[Fraction; RARITY_COUNT], CatalogError> {
    let mut row = [Fraction::ZERO; RARITY_COUNT];
    for (rarity, num, den) in weights {
        row[rarity.index()] = Fraction::new(*num, *den)?;
    }
    Ok(row)
}

/// Three guaranteed one-diamond slots, a fourth slot weighted towards two
/// diamonds, and a fifth slot carrying every rare tier.
pub fn demo_rates() -> Result<PackRates, CatalogError> {
    use Rarity::*;
    let common = row(&[(OneDiamond, 1, 1)])?;
    let fourth = row(&[
        (TwoDiamond, 9, 10),
        (ThreeDiamond, 1, 20),
        (FourDiamond, 1, 50),
        (OneStar, 1, 50),
        (TwoStar, 1, 200),
        (ThreeStar, 1, 400),
        (Crown, 1, 400),
    ])?;
    let fifth = row(&[
        (TwoDiamond, 3, 5),
        (ThreeDiamond, 1, 5),
        (FourDiamond, 1, 10),
        (OneStar, 1, 20),
        (TwoStar, 1, 50),
        (ThreeStar, 1, 100),
        (OneShiny, 1, 100),
        (TwoShiny, 1, 200),
        (Crown, 1, 200),
    ])?;
    PackRates::from_rows([common, common, common, fourth, fifth])
}

fn kind_for(rarity: Rarity, i: usize) -> (String, CardKind) {
    if rarity.is_standard() && i % 9 == 8 {
        let k = i / 9;
        return match k % 3 {
            0 => (ITEMS[k % ITEMS.len()].to_string(), CardKind::Item),
            1 => (SUPPORTERS[k % SUPPORTERS.len()].to_string(), CardKind::Supporter),
            _ => (TOOLS[k % TOOLS.len()].to_string(), CardKind::Tool),
        };
    }
    let species = SPECIES[(i * 7 + rarity.index()) % SPECIES.len()].to_string();
    let variant = if matches!(rarity, Rarity::FourDiamond | Rarity::TwoStar) {
        CreatureVariant::Ex
    } else {
        CreatureVariant::Standard
    };
    (
        species.clone(),
        CardKind::Creature { species, variant },
    )
}

/// Adds `counts[r]` cards of each rarity, numbering from `first`. `packs_for`
/// picks the pack list from the card's position within its rarity.
fn add_cards(
    mut builder: CardSetBuilder,
    first: u32,
    counts: [usize; RARITY_COUNT],
    packs_for: impl Fn(usize) -> &'static [&'static str],
) -> (CardSetBuilder, u32) {
    let mut number = first;
    for rarity in Rarity::ALL {
        for i in 0..counts[rarity.index()] {
            let (name, kind) = kind_for(rarity, i);
            builder = builder.card(number, name, kind, rarity, packs_for(i));
            number += 1;
        }
    }
    (builder, number)
}

fn verdant_origins(rates: &PackRates) -> CardSetBuilder {
    let builder = CardSetBuilder::new("Verdant Origins")
        .default_rates(rates.clone())
        .pack("Thornback")
        .pack("Glimmerwing");
    let (builder, next) = add_cards(
        builder,
        1,
        [40, 30, 20, 10, 12, 6, 3, 2, 2, 2],
        |i| match i % 3 {
            0 => THORNBACK,
            1 => GLIMMERWING,
            _ => BOTH,
        },
    );
    builder
        .card(
            next,
            "Old Amber",
            CardKind::Item,
            Rarity::OneDiamond,
            &[],
        )
        .special_unlock(next, |ledger| {
            ledger.rarity_obtained(Rarity::OneDiamond) >= 20
        })
}

fn tidal_echoes(rates: &PackRates) -> CardSetBuilder {
    let builder = CardSetBuilder::new("Tidal Echoes")
        .default_rates(rates.clone())
        .pack("Undertow");
    let (builder, next) = add_cards(
        builder,
        1,
        [20, 15, 10, 5, 6, 3, 1, 1, 1, 1],
        |_| UNDERTOW,
    );
    builder
        .card(
            next,
            "Sunken Compass",
            CardKind::Tool,
            Rarity::TwoDiamond,
            &[],
        )
        .special_unlock(next, |ledger| ledger.rarity_obtained(Rarity::OneStar) >= 3)
}

/// Two-set synthetic catalog: "Verdant Origins" (two packs with shared and
/// exclusive cards) and "Tidal Echoes" (one pack).
pub fn demo_catalog() -> Result<Catalog, CatalogError> {
    let rates = demo_rates()?;
    Catalog::from_builders([verdant_origins(&rates), tidal_echoes(&rates)])
}
