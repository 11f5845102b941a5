use std::{fs, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use frame_sampler::{
    DEFAULT_INTERVAL_SECONDS, DEFAULT_JPEG_QUALITY, FfmpegLogLevel, FrameOutcome, FrameSampler,
    ProgressCallback, ProgressInfo, SamplePlan, SamplerOptions, VideoFile, VideoProperties,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};

const CLI_AFTER_HELP: &str = "Examples:\n  frame-sampler extract lecture.mp4 --out frames\n  frame-sampler extract lecture.mp4 --out frames --interval 5 --quality 90 --progress\n  frame-sampler plan lecture.mp4 --json\n  frame-sampler probe lecture.mp4\n  frame-sampler completions zsh > _frame-sampler";

#[derive(Debug, Parser)]
#[command(
    name = "frame-sampler",
    version,
    about = "Sample one frame every few seconds from a video and save them as JPEG images",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar instead of one line per frame.
    #[arg(long, global = true)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true, value_parser = parse_ffmpeg_log_level)]
    ffmpeg_log_level: Option<FfmpegLogLevel>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sample frames and write them as JPEG files.
    #[command(
        about = "Extract sampled frames",
        after_help = "Examples:\n  frame-sampler extract input.mp4 --out frames\n  frame-sampler extract input.mp4 --out frames --interval 10"
    )]
    Extract {
        /// Input video path.
        input: PathBuf,
        /// Output directory; created if missing.
        #[arg(long)]
        out: PathBuf,
        /// Seconds between samples.
        #[arg(long, default_value_t = DEFAULT_INTERVAL_SECONDS, value_parser = parse_interval)]
        interval: u64,
        /// JPEG quality (1-100).
        #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = parse_quality)]
        quality: u8,
    },

    /// Print the sample plan without decoding or writing anything.
    #[command(about = "Show which frames would be sampled")]
    Plan {
        /// Input video path.
        input: PathBuf,
        /// Seconds between samples.
        #[arg(long, default_value_t = DEFAULT_INTERVAL_SECONDS, value_parser = parse_interval)]
        interval: u64,
        /// Output the plan as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print video properties.
    #[command(about = "Print video properties", visible_alias = "info")]
    Probe {
        /// Input video path.
        input: PathBuf,
        /// Output properties as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_interval(value: &str) -> Result<u64, String> {
    let seconds: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("not a whole number of seconds: {value}"))?;
    if seconds == 0 {
        return Err("interval must be at least 1 second".to_string());
    }
    Ok(seconds)
}

fn parse_quality(value: &str) -> Result<u8, String> {
    match value.trim().parse::<u8>() {
        Ok(quality) if (1..=100).contains(&quality) => Ok(quality),
        _ => Err(format!("quality must be between 1 and 100, got {value}")),
    }
}

fn parse_ffmpeg_log_level(value: &str) -> Result<FfmpegLogLevel, String> {
    value.parse()
}

/// Skipped frames are already reported on the console, so library warnings
/// stay hidden unless `--verbose` or `RUST_LOG` asks for them.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

fn init_logging(global: &GlobalOptions) {
    let default_filter = default_log_filter(global.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    frame_sampler::set_ffmpeg_log_level(global.ffmpeg_log_level.unwrap_or_default());
}

fn properties_json(properties: &VideoProperties) -> Value {
    json!({
        "fps": properties.frames_per_second,
        "frame_count": properties.frame_count,
        "duration_seconds": properties.duration_seconds(),
        "width": properties.width,
        "height": properties.height,
        "codec": properties.codec,
    })
}

fn plan_json(plan: &SamplePlan) -> Value {
    json!({
        "interval_seconds": plan.interval_seconds(),
        "samples": plan
            .iter()
            .map(|point| json!({
                "sequence": point.sequence,
                "elapsed_seconds": point.elapsed_seconds,
                "frame_number": point.frame_number,
                "file_name": point.file_name(),
            }))
            .collect::<Vec<_>>(),
    })
}

fn print_properties(properties: &VideoProperties) {
    println!("{}", "Video Properties:".bold());
    println!("  FPS: {}", properties.frames_per_second);
    println!("  Total Frames: {}", properties.frame_count);
    println!(
        "  Duration: {:.2} seconds ({:.2} minutes)",
        properties.duration_seconds(),
        properties.duration_minutes(),
    );
    println!("  Width: {}", properties.width);
    println!("  Height: {}", properties.height);
    println!("  Codec: {}", properties.codec);
}

/// Prints one line per sample.
struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match &info.outcome {
            FrameOutcome::Written(path) => println!(
                "  Frame {}/{}: {}s -> {}",
                info.current,
                info.total,
                info.point.elapsed_seconds,
                path.display(),
            ),
            FrameOutcome::Skipped(reason) => eprintln!(
                "  {} {}",
                "warning:".yellow().bold(),
                format!(
                    "could not read frame at {}s ({reason})",
                    info.point.elapsed_seconds
                )
                .yellow()
            ),
        }
    }
}

/// Drives an `indicatif` bar; skipped frames are printed above it.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let FrameOutcome::Skipped(reason) = &info.outcome {
            self.bar.println(format!(
                "{} could not read frame at {}s ({reason})",
                "warning:".yellow().bold(),
                info.point.elapsed_seconds,
            ));
        }
        self.bar.set_message(format!("{}s", info.point.elapsed_seconds));
        self.bar.inc(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Extract {
            input,
            out,
            interval,
            quality,
        } => {
            if out.exists() {
                log::debug!("Writing into existing directory {}", out.display());
            }
            fs::create_dir_all(&out)?;

            let mut video = VideoFile::open(&input)?;
            let properties = video.properties().clone();
            print_properties(&properties);
            println!();

            let mut options = SamplerOptions::new()
                .with_interval(interval)
                .with_jpeg_quality(quality);
            let plan = FrameSampler::new(options.clone()).plan(&properties)?;
            println!(
                "Extracting {} frames (1 every {} seconds)...",
                plan.len(),
                plan.interval_seconds()
            );

            let progress_bar = if cli.global.progress {
                let bar = ProgressBar::new(plan.len() as u64);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?;
                bar.set_style(style.progress_chars("##-"));
                options = options.with_progress(Arc::new(BarProgress { bar: bar.clone() }));
                Some(bar)
            } else {
                options = options.with_progress(Arc::new(ConsoleProgress));
                None
            };

            let report = FrameSampler::new(options).sample_plan(&mut video, plan, &out)?;
            drop(video);

            if let Some(bar) = progress_bar {
                bar.finish_with_message("done");
            }

            println!();
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Extracted {} of {} frame(s) to {}",
                    report.extracted_count(),
                    report.plan.len(),
                    out.display()
                )
                .green()
            );
            if report.skipped_count() > 0 {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("{} frame(s) could not be read", report.skipped_count()).yellow()
                );
            }
        }
        Commands::Plan {
            input,
            interval,
            json,
        } => {
            let video = VideoFile::open(&input)?;
            let plan = SamplePlan::new(video.properties(), interval)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
            } else {
                println!(
                    "{} sample(s), 1 every {} seconds:",
                    plan.len(),
                    plan.interval_seconds()
                );
                for point in &plan {
                    println!(
                        "  {:>4}s  frame {:>7}  {}",
                        point.elapsed_seconds,
                        point.frame_number,
                        point.file_name()
                    );
                }
            }
        }
        Commands::Probe { input, json } => {
            let video = VideoFile::open(&input)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&properties_json(video.properties()))?
                );
            } else {
                print_properties(video.properties());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "frame-sampler", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
