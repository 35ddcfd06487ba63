//! Built-in profiles: zodiac breaths with wish boxes, and the starlight pouch
//! with its four-step upgrade ladder.

use super::types::{GachaConfig, GachaProfile};
use crate::bundles::{BundleBook, BundleRecipe};
use crate::core::constants::{
    MAX_SIMULATION_COUNT, STARLIGHT_DRAW_PRICE, STARLIGHT_FRAGMENTS_PER_CRYSTAL,
    ZODIAC_DRAW_PRICE,
};
use crate::tables::{CascadeChain, CascadeStage, ProbabilityTable};

pub const ZODIAC_PROFILE: &str = "zodiac";
pub const STARLIGHT_PROFILE: &str = "starlight";

pub const SMALL_BOX: &str = "Small Fortune Box";
pub const MEDIUM_BOX: &str = "Medium Fortune Box";
pub const GREAT_BOX: &str = "Great Fortune Box";
pub const TRANSCENDENT_BOX: &str = "Transcendent Box";

pub const EXQUISITE_STARLIGHT: &str = "Exquisite Starlight";
pub const STARLIGHT_ORE: &str = "Starlight Ore";
pub const STARLIGHT_GEM: &str = "Starlight Gem";
pub const BRILLIANT_STARLIGHT: &str = "Brilliant Starlight";

/// Zodiac breath rates, rarest first.
pub const ZODIAC_RATES: [(&str, f64); 12] = [
    ("Horse", 0.15),
    ("Goat", 0.20),
    ("Monkey", 0.25),
    ("Rooster", 0.80),
    ("Dog", 0.90),
    ("Pig", 1.00),
    ("Rat", 2.50),
    ("Ox", 3.00),
    ("Tiger", 3.50),
    ("Rabbit", 29.20),
    ("Dragon", 29.25),
    ("Snake", 29.25),
];

const STARLIGHT_POUCH_RATES: [(&str, f64); 18] = [
    ("Soul Elda Fragment Voucher (10)", 8.00),
    ("Soul Elda", 6.00),
    ("Eternal Rebirth Flame", 14.40),
    ("Black Rebirth Flame", 13.70),
    ("Special Additional Potential Scroll", 7.80),
    ("Legendary Potential Scroll 50%", 0.85),
    ("Legendary Potential Scroll 100%", 0.55),
    ("14-Star Enhancement", 15.00),
    ("15-Star Enhancement", 10.00),
    ("16-Star Enhancement", 7.00),
    ("17-Star Enhancement", 3.40),
    ("18-Star Enhancement", 1.50),
    ("19-Star Enhancement", 0.60),
    ("20-Star Enhancement", 0.40),
    ("Breakthrough 100% (21 Star)", 0.45),
    ("Breakthrough 100% (22 Star)", 0.20),
    ("Bonus Star 30% (23 Star)", 0.15),
    (EXQUISITE_STARLIGHT, 10.00),
];

const STARLIGHT_CRYSTAL_RATES: [(&str, f64); 6] = [
    ("18-Star Enhancement", 18.00),
    ("19-Star Enhancement", 12.00),
    ("20-Star Enhancement", 6.00),
    ("Breakthrough 30% (23 Star)", 10.00),
    ("Breakthrough 50% (23 Star)", 4.00),
    (STARLIGHT_ORE, 50.00),
];

const STARLIGHT_ORE_RATES: [(&str, f64); 9] = [
    ("19-Star Enhancement", 10.00),
    ("20-Star Enhancement", 8.00),
    ("21-Star Enhancement", 2.00),
    ("Breakthrough 30% (23 Star)", 8.00),
    ("Breakthrough 50% (23 Star)", 6.00),
    ("Breakthrough 100% (23 Star)", 5.00),
    ("Breakthrough 30% (24 Star)", 7.00),
    ("Breakthrough 50% (24 Star)", 4.00),
    (STARLIGHT_GEM, 50.00),
];

const STARLIGHT_GEM_RATES: [(&str, f64); 8] = [
    ("Breakthrough 50% (23 Star)", 20.00),
    ("Breakthrough 100% (23 Star)", 15.00),
    ("Breakthrough 30% (24 Star)", 8.00),
    ("Breakthrough 50% (24 Star)", 4.00),
    ("Breakthrough 100% (24 Star)", 2.00),
    ("Breakthrough 30% (25 Star)", 0.70),
    ("Breakthrough 50% (25 Star)", 0.30),
    (BRILLIANT_STARLIGHT, 50.00),
];

const BRILLIANT_STARLIGHT_RATES: [(&str, f64); 8] = [
    ("Breakthrough 30% (24 Star)", 29.00),
    ("Breakthrough 50% (24 Star)", 19.00),
    ("Breakthrough 100% (24 Star)", 14.00),
    ("Breakthrough 30% (25 Star)", 20.00),
    ("Breakthrough 50% (25 Star)", 9.00),
    ("Breakthrough 100% (25 Star)", 4.00),
    ("Breakthrough 30% (26 Star)", 3.00),
    ("Breakthrough 50% (26 Star)", 2.00),
];

/// Filler drops that are never worth anything.
pub const ZERO_VALUE_ITEMS: [&str; 5] = [
    "Soul Elda Fragment Voucher (10)",
    "Soul Elda",
    "Eternal Rebirth Flame",
    "Black Rebirth Flame",
    "Special Additional Potential Scroll",
];

fn table(rates: &[(&str, f64)]) -> ProbabilityTable {
    ProbabilityTable::from_pairs(rates).expect("built-in table is valid")
}

fn stage(name: &str, rates: &[(&str, f64)], continue_item: &str) -> CascadeStage {
    CascadeStage::new(name, table(rates), continue_item).expect("built-in stage is valid")
}

/// Wish boxes, highest value first.
pub fn zodiac_bundles() -> BundleBook {
    let small = ["Rabbit", "Dragon", "Snake"];
    let medium = [&small[..], &["Tiger", "Ox", "Rat"]].concat();
    let great = [&medium[..], &["Pig", "Dog", "Rooster"]].concat();
    let transcendent = [&great[..], &["Monkey", "Goat", "Horse"]].concat();

    let recipes = vec![
        BundleRecipe::new(SMALL_BOX, &small),
        BundleRecipe::new(MEDIUM_BOX, &medium),
        BundleRecipe::new(GREAT_BOX, &great),
        BundleRecipe::new(TRANSCENDENT_BOX, &transcendent),
    ];
    BundleBook {
        recipes,
        priority: vec![
            TRANSCENDENT_BOX.to_string(),
            GREAT_BOX.to_string(),
            MEDIUM_BOX.to_string(),
            SMALL_BOX.to_string(),
        ],
    }
}

pub fn zodiac_profile() -> GachaProfile {
    GachaProfile {
        name: ZODIAC_PROFILE.to_string(),
        draw_price: ZODIAC_DRAW_PRICE,
        chain: CascadeChain::single("Zodiac Breath", table(&ZODIAC_RATES)),
        bundles: zodiac_bundles(),
    }
}

/// The four upgrade tiers entered with one Starlight Crystal each.
pub fn starlight_ladder() -> CascadeChain {
    CascadeChain::new(vec![
        stage("Starlight Crystal", &STARLIGHT_CRYSTAL_RATES, STARLIGHT_ORE),
        stage("Starlight Ore", &STARLIGHT_ORE_RATES, STARLIGHT_GEM),
        stage("Starlight Gem", &STARLIGHT_GEM_RATES, BRILLIANT_STARLIGHT),
        CascadeStage::terminal("Brilliant Starlight", table(&BRILLIANT_STARLIGHT_RATES)),
    ])
    .expect("built-in ladder is valid")
}

/// Pouch followed by the ladder; four Exquisite Starlight make one Crystal.
pub fn starlight_chain() -> CascadeChain {
    let pouch = stage("Starlight Pouch", &STARLIGHT_POUCH_RATES, EXQUISITE_STARLIGHT)
        .with_units_per_draw(STARLIGHT_FRAGMENTS_PER_CRYSTAL)
        .expect("built-in pouch is valid");

    let mut stages = vec![pouch];
    stages.extend(starlight_ladder().stages().iter().cloned());
    CascadeChain::new(stages).expect("built-in starlight chain is valid")
}

pub fn starlight_profile() -> GachaProfile {
    GachaProfile {
        name: STARLIGHT_PROFILE.to_string(),
        draw_price: STARLIGHT_DRAW_PRICE,
        chain: starlight_chain(),
        bundles: BundleBook::default(),
    }
}

impl GachaConfig {
    pub fn builtin() -> Self {
        Self {
            max_simulation_count: MAX_SIMULATION_COUNT,
            profiles: vec![zodiac_profile(), starlight_profile()],
        }
    }
}
