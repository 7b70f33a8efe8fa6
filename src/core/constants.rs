// Pack layout
pub const PACK_SIZE: usize = 5;
pub const RARITY_COUNT: usize = 10;

// Free pack charges
pub const FREE_PACK_CAP: u32 = 2;
pub const FREE_PACK_INTERVAL_HOURS: i64 = 12;

// Premium pack charges (only regenerate while the pass is active)
pub const PREMIUM_PACK_CAP: u32 = 2;
pub const PREMIUM_PACK_INTERVAL_HOURS: i64 = 24;
pub const PREMIUM_PASS_MONTHS: u32 = 1;

// Bonus-draw stamina
pub const STAMINA_CAP: u32 = 5;
pub const STAMINA_INTERVAL_HOURS: i64 = 12;

// Currency (pack points), tracked per set
pub const CURRENCY_CAP: u32 = 2500;
pub const CURRENCY_PER_PACK: u32 = 5;

// Bonus-draw selection
pub const BONUS_OFFER_BATCH: usize = 12;
pub const BONUS_CARD_WEIGHT: f64 = 0.20;
pub const BONUS_SCORE_DIVISOR: f64 = 5.0;

// Monte Carlo driver
pub const TIME_JUMP_HOURS: i64 = 12;
pub const DEFAULT_MAX_PACKS_PER_TRIAL: u32 = 100_000;
pub const PERCENTILE_RANKS: [u32; 3] = [5, 50, 95];
