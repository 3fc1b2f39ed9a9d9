use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use legend_harmonizer::chart::{LegendDisplayPolicy, build_chart_config_titled};
use legend_harmonizer::config::{HarmonizerConfig, load_config};
use legend_harmonizer::presentation::LegendPlacement;
use legend_harmonizer::viz::{self, RenderOptions, util::format_value};
use legend_harmonizer::{GroupingMode, ModeSelector, Record, dataset, storage};

#[derive(Parser, Debug)]
#[command(
    name = "harmonizer",
    version,
    about = "Group chart legend entries by variable, version, or both, and render the chart"
)]
struct Cli {
    /// Config file (TOML). Defaults to <config dir>/legend-harmonizer/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dataset to use instead of the built-in sample (.csv or .json).
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the legend items for a grouping mode.
    Legend(LegendArgs),
    /// Print the declarative chart config as JSON.
    Config(ConfigArgs),
    /// Render the chart with a legend to SVG or PNG.
    Render(RenderArgs),
    /// Write the dataset to a file (format from --format or extension).
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Variable,
    Version,
    VariableVersion,
}

impl From<ModeArg> for GroupingMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Variable => GroupingMode::ByVariable,
            ModeArg::Version => GroupingMode::ByVersion,
            ModeArg::VariableVersion => GroupingMode::ByVariableAndVersion,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlacementArg {
    Panel,
    Overlay,
    Native,
}

impl From<PlacementArg> for LegendPlacement {
    fn from(p: PlacementArg) -> Self {
        match p {
            PlacementArg::Panel => LegendPlacement::Panel,
            PlacementArg::Overlay => LegendPlacement::Overlay,
            PlacementArg::Native => LegendPlacement::Native,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    NativeUngrouped,
    NativeGrouped,
    Disabled,
}

impl PolicyArg {
    fn with_mode(self, mode: GroupingMode) -> LegendDisplayPolicy {
        match self {
            PolicyArg::NativeUngrouped => LegendDisplayPolicy::NativeUngrouped,
            PolicyArg::NativeGrouped => LegendDisplayPolicy::NativeGrouped(mode),
            PolicyArg::Disabled => LegendDisplayPolicy::Disabled,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum LegendFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum DataFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct LegendArgs {
    /// Grouping mode (default from config).
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    /// Output format: text or json.
    #[arg(long, value_enum, default_value_t = LegendFormat::Text)]
    format: LegendFormat,
    /// Also write the items as JSON to this file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    /// Native legend policy (default from config).
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Write the JSON to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output image (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long, value_enum)]
    placement: Option<PlacementArg>,
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(short, long)]
    out: PathBuf,
    /// csv or json; inferred from --out extension when omitted.
    #[arg(long, value_enum)]
    format: Option<DataFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("failed to load config")?;
    let records = load_dataset(cli.data.as_deref())?;
    match cli.cmd {
        Command::Legend(args) => cmd_legend(args, &config, records),
        Command::Config(args) => cmd_config(args, &config, records),
        Command::Render(args) => cmd_render(args, &config, records),
        Command::Export(args) => cmd_export(args, &records),
    }
}

fn load_dataset(path: Option<&Path>) -> Result<Vec<Record>> {
    match path {
        Some(p) => storage::load_records(p)
            .with_context(|| format!("failed to load dataset {}", p.display())),
        None => Ok(dataset::sample_records()),
    }
}

fn cmd_legend(args: LegendArgs, config: &HarmonizerConfig, records: Vec<Record>) -> Result<()> {
    let mode = args.mode.map(GroupingMode::from).unwrap_or(config.default_mode);
    let mut selector = ModeSelector::new(records, mode, config.policy);
    let items = selector.legend_items().to_vec();
    if let Some(path) = &args.out {
        storage::save_legend_json(&items, path)?;
        eprintln!("Wrote {} legend items to {}", items.len(), path.display());
    }
    match args.format {
        LegendFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        LegendFormat::Text => {
            println!("Legend mode: {}", mode.title().to_uppercase());
            for item in &items {
                let swatches: Vec<String> = item.colors.iter().map(|c| c.to_hex()).collect();
                let badge = if item.is_composite() {
                    format!("  [{}]", item.colors.len())
                } else {
                    String::new()
                };
                let total: f64 = item
                    .members
                    .iter()
                    .filter_map(|id| selector.records().get(id.index()))
                    .map(|r| r.value)
                    .sum();
                println!(
                    "{}  {}{}  total={}",
                    swatches.join(" "),
                    item.label,
                    badge,
                    format_value(total, &config.locale)
                );
            }
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, config: &HarmonizerConfig, records: Vec<Record>) -> Result<()> {
    let mode = args.mode.map(GroupingMode::from).unwrap_or(config.default_mode);
    let policy = args
        .policy
        .map(|p| p.with_mode(mode))
        .unwrap_or(config.policy.with_mode(mode));
    let chart = build_chart_config_titled(&records, policy, &config.title);
    match args.out {
        Some(path) => {
            storage::save_chart_config_json(&chart, &path)?;
            eprintln!("Wrote chart config to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&chart)?),
    }
    Ok(())
}

fn cmd_render(args: RenderArgs, config: &HarmonizerConfig, records: Vec<Record>) -> Result<()> {
    let mode = args.mode.map(GroupingMode::from).unwrap_or(config.default_mode);
    let placement = args
        .placement
        .map(LegendPlacement::from)
        .unwrap_or(config.placement);
    let policy = match args.policy {
        Some(p) => p.with_mode(mode),
        // The native placement needs the chart's own legend switched on.
        None if placement == LegendPlacement::Native
            && config.policy == LegendDisplayPolicy::Disabled =>
        {
            LegendDisplayPolicy::NativeGrouped(mode)
        }
        None => config.policy,
    };
    let title = args.title.unwrap_or_else(|| config.title.clone());

    let mut selector = ModeSelector::new(records, mode, policy).with_title(title);
    let options = RenderOptions {
        width: args.width.unwrap_or(config.width),
        height: args.height.unwrap_or(config.height),
        locale: args.locale.unwrap_or_else(|| config.locale.clone()),
        placement,
        mode,
    };
    let chart = selector.chart_config().clone();
    viz::plot_chart(&chart, selector.records(), &options, &args.out)?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs, records: &[Record]) -> Result<()> {
    let fmt = match args.format {
        Some(DataFormat::Csv) => "csv".to_string(),
        Some(DataFormat::Json) => "json".to_string(),
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase(),
    };
    match fmt.as_str() {
        "csv" => storage::save_csv(records, &args.out)?,
        "json" => storage::save_json(records, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} records to {}", records.len(), args.out.display());
    Ok(())
}
