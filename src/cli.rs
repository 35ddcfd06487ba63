//! Command-line argument parsing.

use crate::config::ZODIAC_PROFILE;
use crate::core::constants::{DEFAULT_SIMULATION_COUNT, DEFAULT_WEB_PORT};
use crate::error::{LootError, Result};
use crate::purchase::PurchaseMethod;
use crate::value::ItemValues;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct CalculateArgs {
    pub profile: String,
    pub investment: f64,
    pub method: PurchaseMethod,
    pub discount: f64,
    pub values: ItemValues,
    pub expand: bool,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    pub profile: String,
    pub count: u64,
    pub seed: Option<u64>,
    pub start_tier: usize,
    pub first_tier_only: bool,
    pub json: bool,
    pub save_json: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calculate(CalculateArgs),
    Simulate(SimulateArgs),
    Profiles,
    Serve(u16),
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| LootError::invalid(format!("{flag} needs a value")))
}

fn parse_num<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| LootError::invalid(format!("{flag}: '{raw}' is not a valid number")))
}

/// `NAME=VALUE`, splitting on the last '=' so names may contain one.
fn parse_value_pair(raw: &str) -> Result<(String, f64)> {
    let (name, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| LootError::invalid(format!("--value expects NAME=VALUE, got '{raw}'")))?;
    Ok((name.to_string(), parse_num(value, "--value")?))
}

/// Parse `args` (program name first).
pub fn parse_args(args: &[String]) -> Result<Cli> {
    let mut config_path = None;
    let mut rest = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => config_path = Some(PathBuf::from(value_of(args, &mut i, "--config")?)),
            other => rest.push(other.to_string()),
        }
        i += 1;
    }

    let command = match rest.first().map(|s| s.as_str()) {
        None | Some("-h") | Some("--help") | Some("help") => Command::Help,
        Some("-V") | Some("--version") => Command::Version,
        Some("profiles") => Command::Profiles,
        Some("calculate") => Command::Calculate(parse_calculate(&rest)?),
        Some("simulate") => Command::Simulate(parse_simulate(&rest)?),
        Some(serve) if serve == "--serve" || serve.starts_with("--serve=") => {
            let port = match serve.strip_prefix("--serve=") {
                Some(p) => parse_num(p, "--serve")?,
                None => DEFAULT_WEB_PORT,
            };
            Command::Serve(port)
        }
        Some(other) => {
            return Err(LootError::invalid(format!(
                "unknown command '{other}', run 'lootbox --help' for usage"
            )))
        }
    };

    Ok(Cli {
        config_path,
        command,
    })
}

fn parse_calculate(args: &[String]) -> Result<CalculateArgs> {
    let mut parsed = CalculateArgs {
        profile: ZODIAC_PROFILE.to_string(),
        investment: 0.0,
        method: PurchaseMethod::Original,
        discount: 0.0,
        values: ItemValues::new(),
        expand: true,
        json: false,
    };
    let mut saw_investment = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--profile" => parsed.profile = value_of(args, &mut i, "--profile")?.to_string(),
            "-i" | "--investment" => {
                parsed.investment = parse_num(value_of(args, &mut i, "--investment")?, "--investment")?;
                saw_investment = true;
            }
            "-m" | "--method" => parsed.method = value_of(args, &mut i, "--method")?.parse()?,
            "-d" | "--discount" => {
                parsed.discount = parse_num(value_of(args, &mut i, "--discount")?, "--discount")?
            }
            "--value" => {
                let (name, value) = parse_value_pair(value_of(args, &mut i, "--value")?)?;
                parsed.values.insert(name, value);
            }
            "--first-tier" => parsed.expand = false,
            "--json" => parsed.json = true,
            other => return Err(LootError::invalid(format!("unknown calculate option '{other}'"))),
        }
        i += 1;
    }

    if !saw_investment {
        return Err(LootError::invalid("calculate needs --investment"));
    }
    Ok(parsed)
}

fn parse_simulate(args: &[String]) -> Result<SimulateArgs> {
    let mut parsed = SimulateArgs {
        profile: ZODIAC_PROFILE.to_string(),
        count: DEFAULT_SIMULATION_COUNT,
        seed: None,
        start_tier: 0,
        first_tier_only: false,
        json: false,
        save_json: false,
        verbose: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--profile" => parsed.profile = value_of(args, &mut i, "--profile")?.to_string(),
            "-n" | "--count" => parsed.count = parse_num(value_of(args, &mut i, "--count")?, "--count")?,
            "-s" | "--seed" => {
                parsed.seed = Some(parse_num(value_of(args, &mut i, "--seed")?, "--seed")?)
            }
            "--start-tier" => {
                parsed.start_tier = parse_num(value_of(args, &mut i, "--start-tier")?, "--start-tier")?
            }
            "--ladder" => parsed.start_tier = 1,
            "--first-tier" => parsed.first_tier_only = true,
            "--json" => parsed.json = true,
            "--save" => parsed.save_json = true,
            "-v" | "--verbose" => parsed.verbose = true,
            other => return Err(LootError::invalid(format!("unknown simulate option '{other}'"))),
        }
        i += 1;
    }

    Ok(parsed)
}

pub fn help_text() -> String {
    [
        "lootbox - loot box expected value calculator & simulator",
        "",
        "USAGE:",
        "    lootbox [--config <PATH>] <COMMAND> [OPTIONS]",
        "",
        "COMMANDS:",
        "    calculate           Expected drops, bundles, value and ROI",
        "    simulate            Sample draws through the cascade",
        "    profiles            List known profiles",
        "    --serve[=PORT]      Serve the JSON API over WebSocket (web feature)",
        "    --version           Show version information",
        "    --help              Show this help",
        "",
        "CALCULATE OPTIONS:",
        "    -p, --profile <P>   Profile name (default: zodiac)",
        "    -i, --investment <X> Money invested (required)",
        "    -m, --method <M>    card | cardreader | original | gift (default: original)",
        "    -d, --discount <D>  Discount factor for card/gift, e.g. 0.9",
        "    --value <NAME=V>    Unit value of an item or bundle (repeatable)",
        "    --first-tier        Do not expand the cascade past the first table",
        "    --json              Print JSON instead of text",
        "",
        "SIMULATE OPTIONS:",
        "    -p, --profile <P>   Profile name (default: zodiac)",
        "    -n, --count <N>     First-tier draws (default: 1000)",
        "    -s, --seed <S>      Random seed for reproducibility",
        "    --ladder            Start one stage in (starlight: from crystals)",
        "    --start-tier <T>    Start T stages in",
        "    --first-tier        Simulate only the first table",
        "    --json              Print JSON instead of text",
        "    --save              Save a JSON report file",
        "    -v, --verbose       Log every tier",
        "",
        "EXAMPLES:",
        "    lootbox calculate -i 1000 -m card -d 0.9 --value \"Small Fortune Box\"=120",
        "    lootbox simulate -p starlight -n 1000 --ladder --seed 42",
    ]
    .join("\n")
}
