use lootbox::build_info;
use lootbox::calculator::{compute_expectation, ExpectationRequest};
use lootbox::cli::{help_text, parse_args, CalculateArgs, Command, SimulateArgs};
use lootbox::config::GachaConfig;
use lootbox::error::Result;
use lootbox::simulator::{run_simulation, SimConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lootbox=info".parse().expect("valid env filter")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        eprintln!("Run 'lootbox --help' for usage.");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let cli = parse_args(args)?;

    match cli.command {
        Command::Help => {
            println!("{}", help_text());
            return Ok(());
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        _ => {}
    }

    let config = match &cli.config_path {
        Some(path) => GachaConfig::load(path)?,
        None => GachaConfig::load_or_builtin(),
    };

    match cli.command {
        Command::Calculate(calc) => calculate(&config, calc),
        Command::Simulate(sim) => simulate(&config, sim),
        Command::Profiles => {
            for profile in &config.profiles {
                println!(
                    "{:<12} {:>6} points/draw  {}",
                    profile.name,
                    profile.draw_price,
                    profile
                        .chain
                        .stages()
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join(" -> ")
                );
            }
            Ok(())
        }
        Command::Serve(port) => serve(config, port),
        Command::Help | Command::Version => Ok(()),
    }
}

fn calculate(config: &GachaConfig, args: CalculateArgs) -> Result<()> {
    let profile = config.profile(&args.profile)?;
    let mut request =
        ExpectationRequest::new(args.investment, args.method, args.discount).with_values(args.values);
    if !args.expand {
        request = request.first_tier_only();
    }

    let report = compute_expectation(profile, &request)?;
    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text(&request.item_values));
    }
    Ok(())
}

fn simulate(config: &GachaConfig, args: SimulateArgs) -> Result<()> {
    let profile = config.profile(&args.profile)?;
    let sim = SimConfig {
        count: args.count,
        seed: args.seed,
        max_count: config.max_simulation_count,
        start_tier: args.start_tier,
        first_tier_only: args.first_tier_only,
        verbosity: if args.verbose { 2 } else { 1 },
    };

    if !args.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              LOOTBOX CASCADE SIMULATOR                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Profile:        {}", profile.name);
        println!("  Draws:          {}", sim.count);
        if sim.start_tier > 0 {
            println!("  Start tier:     {}", sim.start_tier);
        }
        if sim.first_tier_only {
            println!("  First tier only");
        }
        if let Some(seed) = sim.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let report = run_simulation(&profile.chain, &sim)?;

    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }

    if args.save_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())?;
        eprintln!("JSON report saved to: {}", filename);
    }
    Ok(())
}

#[cfg(feature = "web")]
fn serve(config: GachaConfig, port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(lootbox::web::start_web_server(
        port,
        std::sync::Arc::new(config),
    ))?;
    Ok(())
}

#[cfg(not(feature = "web"))]
fn serve(_config: GachaConfig, _port: u16) -> Result<()> {
    Err(lootbox::LootError::config(
        "this build has no web server, rebuild with --features web",
    ))
}
