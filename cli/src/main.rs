//! plot2csv CLI - chart image and chart text to CSV

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use plot2csv::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use plot2csv::detect::file_to_data_url;
use plot2csv::parser::{DEFAULT_NEWLINE_MARKER, DEFAULT_TITLE_MARKER};
use plot2csv::{
    ChartParser, ClientOptions, Extraction, ImageSource, JsonFormat, OcrClient, ParseOptions,
};

/// File name the extracted table is saved under by default.
const DEFAULT_OUTPUT_FILE: &str = "chart_data.csv";

#[derive(Parser)]
#[command(name = "plot2csv")]
#[command(version)]
#[command(about = "Turn chart images and chart OCR text into CSV", long_about = None)]
struct Cli {
    /// Raw chart text file (same as `plot2csv parse FILE`)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert raw chart text to CSV
    Parse {
        /// Raw text files (stdin if none)
        #[arg(value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Output file, or output directory when several inputs are given
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the tagged extraction result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        markers: MarkerArgs,
    },

    /// Send a chart image to the OCR service and save the table as CSV
    Extract {
        /// Local image file, image URL, data URL, or service-side `images/` path
        #[arg(value_name = "IMAGE")]
        image: String,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Print the CSV instead of writing a file
        #[arg(long)]
        stdout: bool,

        #[command(flatten)]
        service: ServiceArgs,

        #[command(flatten)]
        markers: MarkerArgs,
    },

    /// Check that the OCR service is up
    Health {
        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct ServiceArgs {
    /// OCR service base URL
    #[arg(long, env = "PLOT2CSV_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

impl ServiceArgs {
    fn client_options(&self) -> ClientOptions {
        ClientOptions::new()
            .with_endpoint(&self.endpoint)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(clap::Args)]
struct MarkerArgs {
    /// Token the model uses for line breaks
    #[arg(long, default_value = DEFAULT_NEWLINE_MARKER)]
    newline_marker: String,

    /// Prefix of chart title lines
    #[arg(long, default_value = DEFAULT_TITLE_MARKER)]
    title_marker: String,

    /// Apply NFKC normalization before parsing
    #[arg(long)]
    normalize: bool,
}

impl MarkerArgs {
    fn parser(&self) -> plot2csv::Result<ChartParser> {
        let options = ParseOptions::new()
            .with_newline_marker(&self.newline_marker)
            .with_title_marker(&self.title_marker)
            .with_unicode_normalization(self.normalize);
        ChartParser::new(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            inputs,
            output,
            json,
            markers,
        }) => cmd_parse(&inputs, output.as_deref(), json, &markers),
        Some(Commands::Extract {
            image,
            output,
            stdout,
            service,
            markers,
        }) => cmd_extract(&image, &output, stdout, &service, &markers),
        Some(Commands::Health { service }) => cmd_health(&service),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: parse if input is provided
            if let Some(input) = cli.input {
                cmd_parse(&[input], None, false, &MarkerArgs::default())
            } else {
                println!("{}", "Usage: plot2csv <FILE>".yellow());
                println!("       plot2csv --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

impl Default for MarkerArgs {
    fn default() -> Self {
        Self {
            newline_marker: DEFAULT_NEWLINE_MARKER.to_string(),
            title_marker: DEFAULT_TITLE_MARKER.to_string(),
            normalize: false,
        }
    }
}

fn cmd_parse(
    inputs: &[PathBuf],
    output: Option<&Path>,
    json: bool,
    markers: &MarkerArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = markers.parser()?;

    match inputs {
        [] => {
            let raw = io::read_to_string(io::stdin())?;
            let result = parser.extract(&raw);
            emit(&result, output, json)
        }
        [input] => {
            let raw = read_raw_text(input)?;
            let result = parser.extract(&raw);
            emit(&result, output, json)
        }
        _ => {
            let texts = inputs
                .iter()
                .map(|p| read_raw_text(p))
                .collect::<Result<Vec<_>, _>>()?;
            let results = parser.extract_batch(&texts);

            if json {
                let json = json_array(&results)?;
                return write_or_print(&json, output);
            }

            if let Some(dir) = output {
                fs::create_dir_all(dir)?;
            }
            for (input, result) in inputs.iter().zip(&results) {
                let path = batch_output_path(input, output);
                fs::write(&path, &result.content)?;
                println!(
                    "{} {} ({}, {} rows)",
                    "Saved".green(),
                    path.display(),
                    result.tier,
                    result.row_count()
                );
            }
            Ok(())
        }
    }
}

fn cmd_extract(
    image: &str,
    output: &Path,
    stdout: bool,
    service: &ServiceArgs,
    markers: &MarkerArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let image_url = resolve_image_url(image)?;
    let client = OcrClient::with_parser(service.client_options(), markers.parser()?)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Processing image...");

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(client.extract_csv(&image_url));
    pb.finish_and_clear();
    let result = result?;

    if !result.is_tabular() {
        eprintln!(
            "{}",
            "No table structure recognised; saving cleaned model output".yellow()
        );
    }

    if stdout {
        print!("{}", result.content);
    } else {
        fs::write(output, &result.content)?;
        println!(
            "{} {} ({}, {} rows)",
            "Data extracted successfully!".green(),
            output.display(),
            result.tier,
            result.row_count()
        );
    }

    Ok(())
}

fn cmd_health(service: &ServiceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = OcrClient::new(service.client_options())?;
    let rt = tokio::runtime::Runtime::new()?;
    let status = rt.block_on(client.health())?;

    if status.is_healthy() {
        println!("{} {}", "Healthy".green().bold(), status.message.dimmed());
    } else {
        println!("{} {}", status.status.yellow().bold(), status.message);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "plot2csv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chart image and chart text to CSV");
    println!();
    println!("License: MIT");
}

/// Pass service-resolvable references through; read anything else as a local image.
fn resolve_image_url(image: &str) -> plot2csv::Result<String> {
    if ImageSource::classify(image).is_resolvable() {
        Ok(image.to_string())
    } else {
        file_to_data_url(image)
    }
}

fn read_raw_text(path: &Path) -> io::Result<String> {
    let data = fs::read(path)?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// `<dir>/<stem>.csv`, or the input with a `.csv` extension when no dir is given.
fn batch_output_path(input: &Path, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => {
            let stem = input.file_stem().unwrap_or_default();
            dir.join(stem).with_extension("csv")
        }
        None => input.with_extension("csv"),
    }
}

fn emit(
    result: &Extraction,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let json = plot2csv::to_json(result, JsonFormat::Pretty)?;
        write_or_print(&json, output)
    } else {
        write_or_print(&result.content, output)
    }
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
        if !content.is_empty() && !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn json_array(results: &[Extraction]) -> plot2csv::Result<String> {
    let items = results
        .iter()
        .map(|r| plot2csv::to_json(r, JsonFormat::Compact))
        .collect::<plot2csv::Result<Vec<_>>>()?;
    Ok(format!("[{}]\n", items.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_passthrough() {
        assert_eq!(
            resolve_image_url("https://example.com/chart.png").unwrap(),
            "https://example.com/chart.png"
        );
        assert_eq!(
            resolve_image_url("images/chart.png").unwrap(),
            "images/chart.png"
        );
    }

    #[test]
    fn test_resolve_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let url = resolve_image_url(path.to_str().unwrap()).unwrap();
        assert_eq!(url, "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn test_resolve_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "X | 5").unwrap();

        assert!(resolve_image_url(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_batch_output_path() {
        assert_eq!(
            batch_output_path(Path::new("runs/a.txt"), None),
            PathBuf::from("runs/a.csv")
        );
        assert_eq!(
            batch_output_path(Path::new("runs/a.txt"), Some(Path::new("out"))),
            PathBuf::from("out/a.csv")
        );
    }

    #[test]
    fn test_json_array() {
        let results = vec![plot2csv::extract("X | 5"), plot2csv::extract("")];
        let json = json_array(&results).unwrap();
        assert!(json.starts_with("[{"));
        assert!(json.contains("\"generic_delimiter\""));
        assert!(json.contains("\"empty\""));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
