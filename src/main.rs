use catalog_codegen::codegen::GenerationOptions;
use catalog_codegen::discovery::{resolve_package_name, ProjectLayout, VariantSpec};
use catalog_codegen::pipeline::{emit, Pipeline};
use catalog_codegen::report::{ReportFormat, Reporter, RunReport};
use catalog_codegen::sink::{DirectorySink, MemorySink};
use catalog_codegen::{CatalogError, Config, QualifiedSourceSet, SourceSetQualifier};
use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// catalog-codegen - Type-safe Kotlin accessors for Android resources
#[derive(Parser, Debug)]
#[command(name = "catalog-codegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Android module directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build variant name (derived from flavors and build type if omitted)
    #[arg(long)]
    variant: Option<String>,

    /// Build type of the variant (e.g. debug)
    #[arg(long)]
    build_type: Option<String>,

    /// Product flavor of the variant, in dimension order (can be specified multiple times)
    #[arg(long = "flavor", value_name = "NAME")]
    flavors: Vec<String>,

    /// Explicit resource directory, replacing the src/<name>/res convention
    /// (can be specified multiple times)
    #[arg(long = "res", value_name = "QUALIFIER:NAME=DIR", value_parser = parse_source_set)]
    source_sets: Vec<QualifiedSourceSet>,

    /// Package of the generated code (skips manifest lookup)
    #[arg(short, long)]
    package: Option<String>,

    /// Generate Context accessors
    #[arg(long, overrides_with = "no_resources")]
    resources: bool,

    /// Do not generate Context accessors
    #[arg(long, overrides_with = "resources")]
    no_resources: bool,

    /// Generate Compose accessors
    #[arg(long, overrides_with = "no_compose")]
    compose: bool,

    /// Do not generate Compose accessors
    #[arg(long, overrides_with = "compose")]
    no_compose: bool,

    /// Resource files to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Report file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Parse source sets in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output the report
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// `flavor:free=app/src/free/res`
fn parse_source_set(value: &str) -> std::result::Result<QualifiedSourceSet, String> {
    let (qualifier, rest) = value
        .split_once(':')
        .ok_or_else(|| format!("expected QUALIFIER:NAME=DIR, got '{}'", value))?;
    let (name, dir) = rest
        .split_once('=')
        .ok_or_else(|| format!("expected QUALIFIER:NAME=DIR, got '{}'", value))?;
    if name.is_empty() || dir.is_empty() {
        return Err(format!("source set name and directory must not be empty in '{}'", value));
    }
    let qualifier: SourceSetQualifier = qualifier.parse()?;
    Ok(QualifiedSourceSet::new(name, qualifier, dir))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("catalog-codegen v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    run(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if cli.resources {
        config.generate_resources_extensions = true;
    }
    if cli.no_resources {
        config.generate_resources_extensions = false;
    }
    if cli.compose {
        config.generate_compose_extensions = true;
    }
    if cli.no_compose {
        config.generate_compose_extensions = false;
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    debug!("Configuration: {:?}", config);
    Ok(config)
}

fn run(config: &Config, cli: &Cli) -> Result<()> {
    let variant = VariantSpec::new(cli.variant.clone(), cli.build_type.clone(), cli.flavors.clone());
    let layout = ProjectLayout::new(&cli.path, variant).with_source_sets(cli.source_sets.clone());

    let package_name = match &cli.package {
        Some(package) => package.clone(),
        None => resolve_package_name(config.namespace.as_deref(), &layout)?,
    };

    let options = GenerationOptions {
        package_name,
        variant_name: layout.variant.name.clone(),
        generate_resources_extensions: config.generate_resources_extensions,
        generate_compose_extensions: config.generate_compose_extensions,
        skip_types: config.skipped_types()?,
    };

    info!(
        "Generating variant '{}' into package {}",
        options.variant_name, options.package_name
    );

    let pipeline = Pipeline::new(config.clone()).with_parallel(cli.parallel);
    let output = pipeline.run(&layout.source_sets(), &options)?;

    let output_dir = layout.output_dir(&config.output_dir);
    let sink_summary = if cli.dry_run {
        emit(&output.generation, &mut MemorySink::new())?
    } else {
        emit(&output.generation, &mut DirectorySink::new(&output_dir))?
    };

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&RunReport {
        variant: &options.variant_name,
        package_name: &options.package_name,
        output_dir: &output_dir,
        dry_run: cli.dry_run,
        output: &output,
        sink: &sink_summary,
    })?;

    if !output.generation.errors.is_empty() {
        return Err(CatalogError::GenerationFailed {
            errors: output.generation.errors.clone(),
        }
        .into());
    }

    Ok(())
}
