mod render;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use bhpt_core::{ModeIndex, ModelKind, SurrogateRequest, format_modes, generate_surrogate};
use bhpt_store::{DatasetCache, DatasetProvider, resolve_data_dir};
use clap::{Args, Parser, Subcommand};
use regex::Regex;

#[derive(Parser)]
#[command(name = "bhpt", about = "Calibrated ppBHPT gravitational-wave surrogates")]
struct Cli {
    /// Dataset directory (default: $BHPT_DATA_DIR or ~/.bhpt-surrogate)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the modes a model provides
    Modes {
        #[arg(long)]
        model: ModelKind,
    },

    /// Download a dataset if missing and verify its checksum
    Fetch {
        #[arg(long)]
        model: ModelKind,
    },

    /// Verify the checksum of a local dataset
    Verify {
        #[arg(long)]
        model: ModelKind,
    },

    /// Evaluate a surrogate waveform
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    model: ModelKind,

    /// Mass ratio m1/m2
    #[arg(long)]
    q: f64,

    /// Aligned spin of the primary
    #[arg(long, allow_negative_numbers = true)]
    spin1: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    spin2: Option<f64>,

    /// Eccentricity
    #[arg(long)]
    ecc: Option<f64>,

    /// Mean anomaly
    #[arg(long, allow_negative_numbers = true)]
    ano: Option<f64>,

    /// Modes to evaluate, e.g. "(2,2),(3,3)" (default: all)
    #[arg(long)]
    modes: Option<String>,

    /// Total mass in solar masses
    #[arg(long)]
    total_mass: Option<f64>,

    /// Luminosity distance in Mpc
    #[arg(long)]
    distance: Option<f64>,

    /// Orbital phase (rad)
    #[arg(long, allow_negative_numbers = true)]
    orb_phase: Option<f64>,

    /// Inclination (rad)
    #[arg(long, allow_negative_numbers = true)]
    inclination: Option<f64>,

    /// Skip the m < 0 modes
    #[arg(long)]
    no_neg_modes: bool,

    /// Sum projected modes into one strain series
    #[arg(long)]
    sum_modes: bool,

    /// Highest l the caller expects to be NR calibrated
    #[arg(long)]
    max_l: Option<u32>,

    /// Skip NR calibration (0PA only)
    #[arg(long)]
    uncalibrated: bool,

    /// Mass unit of uncalibrated output: M or m1
    #[arg(long, default_value = "M")]
    mass_scale: String,

    /// Write the waveform as JSON instead of printing a summary
    #[arg(long)]
    output: Option<PathBuf>,
}

static MODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(\d+)\s*,\s*(-?\d+)\s*\)").expect("mode pattern is a valid regex")
});

/// Parse `"(2,2), (3,3)"` into mode indices.
fn parse_modes(text: &str) -> Result<Vec<ModeIndex>> {
    let mut modes = Vec::new();
    for caps in MODE_PATTERN.captures_iter(text) {
        let l = caps[1].parse().with_context(|| format!("invalid l in '{}'", &caps[0]))?;
        let m = caps[2].parse().with_context(|| format!("invalid m in '{}'", &caps[0]))?;
        modes.push(ModeIndex::new(l, m));
    }
    let leftover = MODE_PATTERN.replace_all(text, "");
    if modes.is_empty() || leftover.chars().any(|c| c != ',' && !c.is_whitespace()) {
        bail!("invalid mode list '{text}': expected e.g. \"(2,2),(3,3)\"");
    }
    Ok(modes)
}

fn open_provider(cli: &Cli) -> Result<DatasetProvider> {
    let data_dir = resolve_data_dir(cli.data_dir.clone());
    DatasetProvider::open(data_dir).context("failed to open dataset directory")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Modes { model } => cmd_modes(*model),
        Commands::Fetch { model } => cmd_fetch(&cli, *model),
        Commands::Verify { model } => cmd_verify(&cli, *model),
        Commands::Generate(args) => cmd_generate(&cli, args),
    }
}

fn cmd_modes(model: ModelKind) -> Result<()> {
    println!("model:    {model}");
    println!("inputs:   {}", model.inputs().join(", "));
    println!("max_l:    {}", model.default_max_l());
    println!("modes:    {}", format_modes(model.available_modes()));
    Ok(())
}

fn cmd_fetch(cli: &Cli, model: ModelKind) -> Result<()> {
    let provider = open_provider(cli)?;
    provider
        .fetch(model)
        .with_context(|| format!("failed to fetch {model} dataset"))?;
    let path = provider
        .verify(model)
        .with_context(|| format!("failed to verify {model} dataset"))?;
    println!("verified {}", path.display());
    Ok(())
}

fn cmd_verify(cli: &Cli, model: ModelKind) -> Result<()> {
    let provider = open_provider(cli)?;
    let path = provider
        .verify(model)
        .with_context(|| format!("failed to verify {model} dataset"))?;
    println!("{}: ok", path.display());
    Ok(())
}

fn build_request(args: &GenerateArgs) -> Result<SurrogateRequest> {
    let mut request = SurrogateRequest::new(args.q);
    request.spin1 = args.spin1;
    request.spin2 = args.spin2;
    request.eccentricity = args.ecc;
    request.mean_anomaly = args.ano;
    if let Some(text) = &args.modes {
        request.modes = Some(parse_modes(text)?);
    }
    request.extrinsics.total_mass = args.total_mass;
    request.extrinsics.distance_mpc = args.distance;
    request.extrinsics.orbital_phase = args.orb_phase;
    request.extrinsics.inclination = args.inclination;
    request.include_negative_modes = !args.no_neg_modes;
    request.sum_modes = args.sum_modes;
    request.max_l = args.max_l;
    request.calibrated = !args.uncalibrated;
    request.mass_scale = args.mass_scale.clone();
    Ok(request)
}

fn cmd_generate(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let request = build_request(args)?;
    let cache = DatasetCache::new(open_provider(cli)?);
    let dataset = cache
        .get(args.model)
        .with_context(|| format!("failed to load {} dataset", args.model))?;

    let output = generate_surrogate(&dataset, &request)
        .with_context(|| format!("{} evaluation failed", args.model))?;
    for advisory in &output.advisories {
        tracing::warn!("{advisory}");
    }

    match &args.output {
        Some(path) => write_output(path, args.model, &output),
        None => {
            print!("{}", render::summary(args.model, &output));
            Ok(())
        }
    }
}

fn write_output(path: &Path, model: ModelKind, output: &bhpt_core::SurrogateOutput) -> Result<()> {
    let json = serde_json::to_string(&render::document(model, output))
        .context("failed to serialize waveform")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
