mod cli;

use cardprep::config::{self, Config, RemovalBackend};
use cardprep::pipeline::{convert, BatchReport, CardOptions, CardPipeline, HeicConverter, Resizer};

use anyhow::{Context, Result};
use cardprep_imaging::{BackgroundRemover, ColorKeyRemover, MagickDecoder, RembgCommand, Template};
use clap::Parser;
use cli::{Cli, Commands, RemovalArgs};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cardprep=debug,cardprep_imaging=debug,cardprep_common=debug".to_string()
        } else {
            "cardprep=info,cardprep_imaging=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::ConvertHeic {
            input,
            output,
            crop,
            removal,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            convert_heic(&config, &input, output.as_deref(), crop, &removal, json)
        }
        Commands::RemoveBg {
            input,
            crop,
            template,
            no_composite,
            removal,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let template = if no_composite {
                None
            } else {
                Some(template.unwrap_or_else(|| config.template.path.clone()))
            };
            remove_bg(&config, &input, crop, template.as_deref(), &removal, json)
        }
        Commands::Resize {
            source,
            set,
            width,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let width = width.unwrap_or(config.resize.width);
            resize(&source, &set, width, json)
        }
        Commands::CheckTools => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            check_tools(&config)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

fn convert_heic(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    crop: bool,
    removal: &RemovalArgs,
    json: bool,
) -> Result<()> {
    let input = absolute(input)?;
    let output = match output {
        Some(dir) => absolute(dir)?,
        None => convert::default_output_dir(&input),
    };

    let decoder = MagickDecoder::new(config.heic.program.clone());
    let converted = HeicConverter::new(&decoder).run(&input, &output)?;
    converted.log_summary();

    let remover = build_remover(config, removal.backend);
    let options = card_options(config, crop, removal);
    let cards = CardPipeline::new(remover.as_ref(), options).run(&input)?;
    cards.log_summary();

    print_reports(&[converted, cards], json)
}

fn remove_bg(
    config: &Config,
    input: &Path,
    crop: bool,
    template_path: Option<&Path>,
    removal: &RemovalArgs,
    json: bool,
) -> Result<()> {
    let input = absolute(input)?;

    // Load the template before touching any card.
    let template = match template_path {
        Some(path) => {
            tracing::info!("Using template {:?}", path);
            let template = Template::open(path, config.template.slot())
                .with_context(|| format!("Failed to load template {:?}", path))?;
            Some(template)
        }
        None => None,
    };

    let remover = build_remover(config, removal.backend);
    let options = card_options(config, crop, removal);
    let mut pipeline = CardPipeline::new(remover.as_ref(), options);
    if let Some(ref template) = template {
        pipeline = pipeline.with_template(template);
    }

    let report = pipeline.run(&input)?;
    report.log_summary();

    print_reports(&[report], json)
}

fn resize(source: &Path, set: &str, width: u32, json: bool) -> Result<()> {
    if width == 0 {
        anyhow::bail!("Resize width cannot be 0");
    }

    let work_dir = std::env::current_dir().context("Failed to read working directory")?;
    let report = Resizer::new(width).run(source, set, &work_dir)?;
    report.log_summary();

    print_reports(&[report], json)
}

fn build_remover(config: &Config, backend: Option<RemovalBackend>) -> Box<dyn BackgroundRemover> {
    match backend.unwrap_or(config.removal.backend) {
        RemovalBackend::Rembg => Box::new(
            RembgCommand::new(config.removal.program.clone())
                .with_args(config.removal.args.clone()),
        ),
        RemovalBackend::ColorKey => Box::new(ColorKeyRemover::new(config.removal.tolerance)),
    }
}

fn card_options(config: &Config, crop: bool, removal: &RemovalArgs) -> CardOptions {
    let mut options = CardOptions::from_config(&config.cards, crop);
    options.edge_hint |= removal.edge_hint;
    if let Some(policy) = removal.empty_crop {
        options.empty_crop = policy;
    }
    options
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    Ok(cwd.join(path))
}

fn print_reports(reports: &[BatchReport], json: bool) -> Result<()> {
    if json {
        let json_str = if let [report] = reports {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string_pretty(reports)?
        };
        println!("{}", json_str);
        return Ok(());
    }

    for report in reports {
        println!(
            "{}: {} found, {} processed, {} failed",
            report.pipeline,
            report.found,
            report.processed,
            report.failed.len()
        );
        for failure in &report.failed {
            println!("  ✗ {}: {}", failure.file, failure.error);
        }
    }

    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let tools = cardprep_imaging::check_tools(&config.heic.program, &config.removal.program);
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {} ({})", status, tool.name, tool.purpose);

        if let Some(ref version) = tool.version {
            print!(" {}", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All external tools are available!");
    } else {
        println!("Some tools are missing. `--backend color-key` needs no external tool.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("✓ Configuration is valid");
    println!("  Template: {}", config.template.path.display());
    println!(
        "  Card slot: {}x{} (radius {})",
        config.template.card_width, config.template.card_height, config.template.card_radius
    );
    println!("  Removal backend: {:?}", config.removal.backend);
    println!("  Removal program: {}", config.removal.program);
    println!("  HEIC program: {}", config.heic.program);
    println!("  Card output folder: {}", config.cards.output_dir);
    println!("  Empty crop policy: {:?}", config.cards.empty_crop);
    println!("  Resize width: {}", config.resize.width);

    Ok(())
}
