// Draw prices (points per draw)
pub const ZODIAC_DRAW_PRICE: f64 = 27.0;
pub const STARLIGHT_DRAW_PRICE: f64 = 45.0;

// Purchase methods
pub const CARD_READER_BONUS: f64 = 1.05;

// Probability tables
pub const PERCENT: f64 = 100.0;
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// Cascades
pub const DEFAULT_UNITS_PER_DRAW: f64 = 1.0;
pub const STARLIGHT_FRAGMENTS_PER_CRYSTAL: f64 = 4.0;

// Simulation limits
pub const DEFAULT_SIMULATION_COUNT: u64 = 1000;
pub const MAX_SIMULATION_COUNT: u64 = 100_000;

// Config discovery
pub const CONFIG_DIR_NAME: &str = ".lootbox";
pub const CONFIG_FILE_NAME: &str = "config.json";

// Web API
pub const DEFAULT_WEB_PORT: u16 = 5278;
