//! Optional player heuristics run between pack openings.

pub mod bonus_draw;
pub mod redemption;

pub use bonus_draw::{
    generate_offers, run_bonus_draw, score_offer, select_offer, BonusOffer, OfferScore,
    ScoredOffer,
};
pub use redemption::{redeem, run_redemption, Redemption};
