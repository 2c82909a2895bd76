use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fuzzy_enhance::assets::AssetLoader;
use fuzzy_enhance::imaging::{decode_png_limited, encode_png, histogram};
use fuzzy_enhance::models::AppConfig;
use fuzzy_enhance::server;
use fuzzy_enhance::services::EnhancementPipeline;
use fuzzy_infer::{
    interpret, recommended_actions, rule_activations, ImageMetrics, InferenceResult,
    KnowledgeBase, KnowledgeBaseDefinition, Rule,
};

#[derive(Parser)]
#[command(name = "fuzzy-enhance")]
#[command(about = "Fuzzy-logic image enhancement: analyze a picture, infer corrections, apply them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Infer enhancement parameters from image metrics
    Infer {
        /// Mean luma, 0 to 255
        #[arg(short, long)]
        brightness: f64,

        /// Contrast, 0 to 100
        #[arg(short, long)]
        contrast: f64,

        /// Sharpness, 0 to 100
        #[arg(short, long)]
        sharpness: f64,

        /// Noise, 0 to 100
        #[arg(short, long)]
        noise: f64,

        /// Print the full inference trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Measure the quality metrics of a PNG file
    Analyze {
        /// Input PNG file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze, infer and enhance a PNG file
    Enhance {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the rules of the active knowledge base
    Rules {
        /// Write the knowledge base as YAML instead of listing it
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Infer {
            brightness,
            contrast,
            sharpness,
            noise,
            json,
        }) => run_infer_command(ImageMetrics::new(brightness, contrast, sharpness, noise), json),
        Some(Commands::Analyze { input, json }) => run_analyze_command(&input, json),
        Some(Commands::Enhance {
            input,
            output,
            json,
        }) => run_enhance_command(&input, &output, json),
        Some(Commands::Rules { export }) => run_rules_command(export.as_deref()),
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuzzy_enhance=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Config and knowledge base as selected by `CONFIG_FILE`
fn load_cli_config() -> anyhow::Result<(AppConfig, KnowledgeBase)> {
    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let knowledge_base = config.load_knowledge_base()?;
    Ok((config, knowledge_base))
}

fn read_png(path: &Path, config: &AppConfig) -> anyhow::Result<fuzzy_enhance::imaging::RgbaImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let image = decode_png_limited(&bytes, config.limits.max_pixels)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    Ok(image)
}

/// Infer parameters for metrics given on the command line
fn run_infer_command(metrics: ImageMetrics, json: bool) -> anyhow::Result<()> {
    init_cli_logging();

    for (name, value) in [
        ("brightness", metrics.brightness),
        ("contrast", metrics.contrast),
        ("sharpness", metrics.sharpness),
        ("noise", metrics.noise),
    ] {
        if !value.is_finite() {
            anyhow::bail!("{name} must be a finite number, got {value}");
        }
    }

    let (_, knowledge_base) = load_cli_config()?;
    let result = knowledge_base.infer(&metrics);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "result": result,
                "interpretation": interpret(&metrics),
                "recommendedActions": recommended_actions(&result.parameters),
                "activations": rule_activations(&result),
            }))?
        );
        return Ok(());
    }

    println!("{}\n", interpret(&metrics));
    print_fired_rules(&result);
    print_parameters(&result);
    Ok(())
}

/// Print the metrics of a PNG file
fn run_analyze_command(input: &Path, json: bool) -> anyhow::Result<()> {
    init_cli_logging();

    let (config, _) = load_cli_config()?;
    let image = read_png(input, &config)?;
    let metrics = fuzzy_enhance::imaging::analyze(&image);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "width": image.width(),
                "height": image.height(),
                "metrics": metrics,
                "interpretation": interpret(&metrics),
                "histogram": histogram(&image),
            }))?
        );
        return Ok(());
    }

    println!("{} ({}x{})", input.display(), image.width(), image.height());
    print_metrics(&metrics);
    println!("\n{}", interpret(&metrics));
    Ok(())
}

/// Enhance a PNG file (no server needed)
fn run_enhance_command(input: &Path, output: &Path, json: bool) -> anyhow::Result<()> {
    init_cli_logging();

    let (config, knowledge_base) = load_cli_config()?;
    let image = read_png(input, &config)?;
    let pipeline = EnhancementPipeline::new(Arc::new(knowledge_base), None);

    let report = pipeline.enhance(&image);
    let png = encode_png(&report.image)?;
    std::fs::write(output, &png)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "output": output.display().to_string(),
                "originalMetrics": report.original_metrics,
                "parameters": report.parameters(),
                "enhancedMetrics": report.enhanced_metrics,
                "firedRules": report.result.fired_rule_ids(),
            }))?
        );
        return Ok(());
    }

    println!("Original:");
    print_metrics(&report.original_metrics);
    println!();
    print_fired_rules(&report.result);
    print_parameters(&report.result);
    println!("\nEnhanced:");
    print_metrics(&report.enhanced_metrics);
    println!("\nWrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}

/// List or export the active knowledge base
fn run_rules_command(export: Option<&Path>) -> anyhow::Result<()> {
    init_cli_logging();

    let (_, knowledge_base) = load_cli_config()?;

    if let Some(path) = export {
        let definition = KnowledgeBaseDefinition::from(knowledge_base);
        std::fs::write(path, serde_yaml::to_string(&definition)?)?;
        println!(
            "Exported {} rules to {}",
            definition.rules.len(),
            path.display()
        );
        return Ok(());
    }

    for rule in knowledge_base.rules() {
        println!("{}", describe_rule(rule));
    }
    println!("\n{} rules", knowledge_base.rules().len());
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = AssetLoader::from_env().init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }
    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("fuzzy-enhance v{VERSION}");
    println!("Fuzzy-logic image enhancement\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:         {config_source}");

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    match (&config.knowledge_base, config.load_knowledge_base()) {
        (None, Ok(kb)) => println!("  Knowledge base: built-in ({} rules)", kb.rules().len()),
        (Some(path), Ok(kb)) => println!(
            "  Knowledge base: {} ({} rules)",
            path.display(),
            kb.rules().len()
        ),
        (_, Err(e)) => println!("  Knowledge base: ERROR {e}"),
    }
    if config.cache.enabled {
        println!("  Cache:          {} entries", config.cache.capacity);
    } else {
        println!("  Cache:          disabled");
    }

    println!("\nCommands:");
    println!("  fuzzy-enhance serve     Start the HTTP server");
    println!("  fuzzy-enhance infer     Infer parameters from metrics");
    println!("  fuzzy-enhance analyze   Measure a PNG file");
    println!("  fuzzy-enhance enhance   Enhance a PNG file");
    println!("  fuzzy-enhance rules     List or export the knowledge base");
    println!("  fuzzy-enhance init      Extract the embedded config");
    println!("\nRun 'fuzzy-enhance --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuzzy_enhance=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = AssetLoader::from_env();

    tracing::info!(
        config = %asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    let config = AppConfig::load_from_assets(&asset_loader);
    let state = server::create_app_state(config)?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "fuzzy-enhance server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn print_metrics(metrics: &ImageMetrics) {
    println!("  brightness  {:>7.2}", metrics.brightness);
    println!("  contrast    {:>7.2}", metrics.contrast);
    println!("  sharpness   {:>7.2}", metrics.sharpness);
    println!("  noise       {:>7.2}", metrics.noise);
}

fn print_fired_rules(result: &InferenceResult) {
    if result.fired_rules.is_empty() {
        println!("No rules fired.");
        return;
    }
    println!("Fired rules:");
    for fired in &result.fired_rules {
        println!(
            "  {:>3}  {:.3}  {}",
            fired.rule.id,
            fired.firing_strength,
            fired.rule.label()
        );
    }
}

fn print_parameters(result: &InferenceResult) {
    let p = &result.parameters;
    println!("\nParameters:");
    println!("  brightnessAdj {:>8.3}", p.brightness_adj);
    println!("  contrastAdj   {:>8.3}", p.contrast_adj);
    println!("  sharpen       {:>8.3}", p.sharpen);
    println!("  denoise       {:>8.3}", p.denoise);

    let actions = recommended_actions(p);
    if !actions.is_empty() {
        println!("\nActions:");
        for action in actions {
            println!("  - {action}");
        }
    }
}

fn describe_rule(rule: &Rule) -> String {
    let conditions = rule
        .antecedents
        .iter()
        .map(|c| format!("{} is {}", c.variable, c.term))
        .collect::<Vec<_>>()
        .join(" AND ");
    let consequents = rule
        .consequents
        .iter()
        .map(|a| format!("{} is {}", a.variable, a.term))
        .collect::<Vec<_>>()
        .join(", ");

    match &rule.description {
        Some(description) => format!(
            "{:>3}: IF {conditions} THEN {consequents}  ({description})",
            rule.id
        ),
        None => format!("{:>3}: IF {conditions} THEN {consequents}", rule.id),
    }
}
