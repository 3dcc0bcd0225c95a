//! Command-line demo for hueforge.
//!
//! Generates one palette and prints it as truecolor swatches.

use std::path::PathBuf;
use std::process::ExitCode;

use log::LevelFilter;

use hueforge::adjust::ColorblindAdjuster;
use hueforge::analyze::detect_harmony;
use hueforge::categorize::{Categorizer, CategorizerProfile, HueMode, KeywordTable};
use hueforge::color::Color;
use hueforge::contrast::readable_text_color;
use hueforge::generator::{GenerationRequest, GenerationType, PaletteGenerator, RandomColors};
use hueforge::logging::PaletteLogger;
use hueforge::simulate::{ALL_DEFICIENCIES, simulate};

const HELP_TEXT: &str = "\
hueforge-demo: generate a color palette

USAGE:
    hueforge-demo [OPTIONS]

OPTIONS:
    --type <kind>          analogous|triadic|complementary|tints|shades|scale (default: analogous)
    --count <n>            number of colors, at most 24 (default: 5)
    --lock <color>         lock a color (#rrggbb, rgb(), hsl() or a name); repeatable
    --safe                 adjust lightness for colorblind safety
    --seed <n>             seed the random color source
    --simulate             also print protan, deutan and tritan renditions
    --categorize <name>    categorize the palette under this name
    --extended             use the extended categorizer profile
    --circular-hues        use circular hue statistics when categorizing
    --keywords <path>      keyword INI file for the categorizer
    --no-color             print hex values without swatches
    --log-level <level>    off|error|warn|info|debug|trace (default: warn)
    -v, --verbose          same as --log-level debug; with the `tracing` feature
                           this also times palette generation and adjustment
    -h, --help             print this help
";

/// Largest palette the demo will generate.
const MAX_COUNT: usize = 24;

#[derive(Debug, Clone, PartialEq)]
struct Config {
    help: bool,
    kind: GenerationType,
    count: usize,
    locked: Vec<String>,
    safe: bool,
    seed: Option<u64>,
    simulate: bool,
    categorize: Option<String>,
    extended: bool,
    circular_hues: bool,
    keywords: Option<PathBuf>,
    color: bool,
    log_level: LevelFilter,
}

impl Config {
    fn with_defaults() -> Self {
        Self {
            help: false,
            kind: GenerationType::Analogous,
            count: 5,
            locked: Vec::new(),
            safe: false,
            seed: None,
            simulate: false,
            categorize: None,
            extended: false,
            circular_hues: false,
            keywords: None,
            color: true,
            log_level: LevelFilter::Warn,
        }
    }
}

fn next_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next()
        .ok_or_else(|| format!("Missing value for `{flag}`."))
}

fn parse_log_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse::<LevelFilter>().map_err(|_| {
        format!("Invalid --log-level value `{raw}` (expected: off|error|warn|info|debug|trace).")
    })
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Config, String> {
    let mut iter = args.into_iter();
    // Drop binary name if present.
    let _ = iter.next();

    let mut cfg = Config::with_defaults();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cfg.help = true,
            "--type" => {
                // Unknown names parse as a plain scale.
                let Ok(kind) = next_value(&mut iter, "--type")?.parse::<GenerationType>();
                cfg.kind = kind;
            }
            "--count" => {
                let raw = next_value(&mut iter, "--count")?;
                cfg.count = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|&count| count <= MAX_COUNT)
                    .ok_or_else(|| {
                        format!("Invalid --count value `{raw}` (expected an integer from 0 to {MAX_COUNT}).")
                    })?;
            }
            "--lock" => cfg.locked.push(next_value(&mut iter, "--lock")?),
            "--safe" => cfg.safe = true,
            "--seed" => {
                let raw = next_value(&mut iter, "--seed")?;
                cfg.seed = Some(raw.parse::<u64>().map_err(|_| {
                    format!("Invalid --seed value `{raw}` (expected a non-negative integer).")
                })?);
            }
            "--simulate" => cfg.simulate = true,
            "--categorize" => cfg.categorize = Some(next_value(&mut iter, "--categorize")?),
            "--extended" => cfg.extended = true,
            "--circular-hues" => cfg.circular_hues = true,
            "--keywords" => cfg.keywords = Some(PathBuf::from(next_value(&mut iter, "--keywords")?)),
            "--no-color" => cfg.color = false,
            "--log-level" => {
                let raw = next_value(&mut iter, "--log-level")?;
                cfg.log_level = parse_log_level(&raw)?;
            }
            "-v" | "--verbose" => cfg.log_level = LevelFilter::Debug,
            other => {
                return Err(format!("Unknown argument `{other}`.\n\n{HELP_TEXT}"));
            }
        }
    }

    Ok(cfg)
}

fn swatch(color: Color, use_color: bool) -> String {
    if !use_color {
        return color.hex();
    }
    let text = readable_text_color(color);
    format!(
        "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m {} \x1b[0m",
        color.red, color.green, color.blue, text.red, text.green, text.blue, color
    )
}

fn print_row(label: &str, colors: &[Color], use_color: bool) {
    let cells: Vec<String> = colors.iter().map(|&c| swatch(c, use_color)).collect();
    println!("{label:<8} {}", cells.join(" "));
}

fn run(cfg: &Config) -> Result<(), String> {
    let source = match cfg.seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::from_os(),
    };
    let mut generator = PaletteGenerator::with_source(source);

    let mut request = GenerationRequest::new(cfg.count, cfg.kind).colorblind_safe(cfg.safe);
    request.locked_colors.clone_from(&cfg.locked);
    let colors = generator.generate(&request).map_err(|err| err.to_string())?;

    print_row(cfg.kind.name(), &colors, cfg.color);
    if cfg.simulate {
        for kind in ALL_DEFICIENCIES {
            let simulated: Vec<Color> = colors.iter().map(|&c| simulate(c, kind)).collect();
            print_row(kind.name(), &simulated, cfg.color);
        }
    }

    let report = ColorblindAdjuster::new().adjust_with_report(&colors);
    for pair in report.pairs.iter().filter(|p| !p.is_safe()) {
        println!(
            "note: colors {} and {} are hard to tell apart ({:?})",
            pair.index + 1,
            pair.index + 2,
            pair.unresolved
        );
    }
    println!("harmony: {}", detect_harmony(&colors));

    if let Some(name) = &cfg.categorize {
        let keywords = match &cfg.keywords {
            Some(path) => KeywordTable::read(path, true).map_err(|err| err.to_string())?,
            None => KeywordTable::default(),
        };
        let profile = if cfg.extended {
            CategorizerProfile::extended()
        } else {
            CategorizerProfile::standard()
        };
        let profile = if cfg.circular_hues {
            profile.hue_mode(HueMode::Circular)
        } else {
            profile
        };
        let hex: Vec<String> = colors.iter().map(Color::hex).collect();
        let category = Categorizer::new(profile, keywords).categorize(&hex, name);
        println!("category: {category}");
    }

    Ok(())
}

#[cfg(feature = "tracing")]
fn install_tracing(cfg: &Config) {
    use hueforge::logging::PaletteTracingLayer;

    let logger = PaletteLogger::new()
        .level(cfg.log_level)
        .show_target(true)
        .color(cfg.color);
    if let Err(err) = PaletteTracingLayer::with_logger(logger).init() {
        eprintln!("failed to install tracing layer: {err}");
    }
}

#[cfg(not(feature = "tracing"))]
fn install_tracing(_: &Config) {}

fn main() -> ExitCode {
    let cfg = match parse_args(std::env::args()) {
        Ok(cfg) => cfg,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    if cfg.help {
        print!("{HELP_TEXT}");
        return ExitCode::SUCCESS;
    }

    if cfg.log_level != LevelFilter::Off {
        let logger = PaletteLogger::new()
            .level(cfg.log_level)
            .show_target(true)
            .color(cfg.color);
        if let Err(err) = logger.init() {
            eprintln!("failed to install logger: {err}");
        }
        install_tracing(&cfg);
    }

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
