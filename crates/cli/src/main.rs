mod echo;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use postcraft_core::{
    ConfigLoader, Conversion, Converter, Document, JsonConfig, PostcraftError, convert_to_json, is_document_host,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to write to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Post,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: post, text, json", s)),
        }
    }
}

/// Turn a saved document page into a decorated social post
#[derive(Parser, Debug)]
#[command(name = "postcraft")]
#[command(author = "Postcraft Contributors")]
#[command(version)]
#[command(about = "Turn a saved document page into a decorated social post", long_about = None)]
struct Args {
    /// HTML snapshot of the page, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (post, text, json)
    #[arg(short, long, default_value = "post", value_name = "FORMAT")]
    format: OutputFormat,

    /// Configuration file (default: <config dir>/postcraft/config.json if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for decoration choices, for reproducible output
    #[arg(long, value_name = "NUM")]
    seed: Option<u64>,

    /// Minimum text length for a selector match to be accepted
    #[arg(long, value_name = "NUM")]
    min_element_length: Option<usize>,

    /// Minimum extracted text length worth converting
    #[arg(long, value_name = "NUM")]
    min_length: Option<usize>,

    /// URL the snapshot was taken from; rejected unless it is a known document host
    #[arg(long, value_name = "URL")]
    source_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "warn,postcraft=debug,postcraft_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn build_converter(args: &Args, config: &postcraft_core::PostcraftConfig) -> Converter {
    let mut builder = Converter::builder()
        .extract_config(config.extract.clone())
        .decorations(config.decorations.clone())
        .min_usable_length(args.min_length.unwrap_or(config.min_usable_length));

    if let Some(min_element_length) = args.min_element_length {
        builder = builder.min_element_length(min_element_length);
    }

    builder.build()
}

fn render(conversion: &Conversion, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Post => conversion.post.clone(),
        OutputFormat::Text => conversion.extraction.text.clone(),
        OutputFormat::Json => {
            convert_to_json(conversion, &JsonConfig::default()).context("Failed to serialize conversion")?
        }
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
    }

    let started = Instant::now();
    let mut timings = Vec::new();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;

    if let Some(url) = &args.source_url {
        if !is_document_host(url, &config.document_hosts)? {
            echo::print_error("This page is not a supported document page");
            bail!("{} is not served by a known document host", url);
        }
        debug!(%url, "source host accepted");
    }

    if args.verbose {
        let source = if args.input == "-" { "stdin".to_string() } else { args.input.clone() };
        echo::print_step(1, 4, &format!("Reading page snapshot from {}", source.bright_white()));
    }
    let step = Instant::now();
    let html = read_input(&args.input)?;
    timings.push(("Read", step.elapsed()));
    info!(bytes = html.len(), "page snapshot loaded");

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 4, "Parsing HTML document");
    }
    let step = Instant::now();
    let doc = Document::parse(&html).context("Failed to parse HTML")?;
    timings.push(("Parse", step.elapsed()));

    if args.verbose {
        if let Some(title) = doc.title() {
            eprintln!("  {} {}\n", "Title:".dimmed(), title.trim().bright_white());
        }
        echo::print_step(3, 4, "Extracting and formatting content");
    }

    let converter = build_converter(&args, &config);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let step = Instant::now();
    let conversion = match converter.convert_with_rng(&doc, &mut rng) {
        Ok(conversion) => conversion,
        Err(err @ (PostcraftError::NoContent | PostcraftError::InsufficientContent { .. })) => {
            echo::print_error("Nothing to convert: make sure the page finished loading before saving it");
            return Err(err.into());
        }
        Err(err) => return Err(err).context("Failed to convert page"),
    };
    timings.push(("Convert", step.elapsed()));
    info!(source = %conversion.extraction.source_label, length = conversion.post.chars().count(), "conversion finished");

    if args.verbose {
        echo::print_extraction_details(&conversion.extraction);
    }
    if conversion.extraction.source_label == config.extract.fallback_label {
        echo::print_warning("No content selector matched; used the whole page body");
    }

    let output = render(&conversion, args.format)?;

    if args.verbose {
        echo::print_step(4, 4, "Writing output");
        eprintln!("  {} {}\n", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("post".parse::<OutputFormat>().unwrap(), OutputFormat::Post);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from(["postcraft", "page.html", "--min-length", "3", "--min-element-length", "7"]);
        let converter = build_converter(&args, &postcraft_core::PostcraftConfig::default());

        assert_eq!(converter.min_usable_length(), 3);
        assert!(converter.extract_config().selectors.iter().all(|rule| rule.min_length == 7));
    }
}
