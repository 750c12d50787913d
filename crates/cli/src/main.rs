#![deny(unsafe_code)]
//! CLI binary for the pattern-studio engine.
//!
//! Subcommands:
//! - `list`: print patterns and the config schema
//! - `frame`: generate one frame and print its elements as JSON
//! - `render`: generate one frame and write a PNG snapshot
//! - `profile`: time consecutive frames and report cache statistics

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use pattern_studio_core::{
    FrameConfig, FrameGenerator, FrameRequest, MathKernel, PatternKind, PointerState, ViewTilt,
};
use pattern_studio_engines::RasterOptions;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pattern-studio", about = "Generative pattern engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Inputs shared by every frame-producing subcommand.
#[derive(Args)]
struct FrameArgs {
    /// Frame index (time is frame * animation_speed).
    #[arg(short, long, default_value_t = 0)]
    frame: u64,

    /// Pattern name or selector index (equilibrium, resonance, metamorphosis, synthesis).
    #[arg(short, long, default_value = "equilibrium")]
    pattern: String,

    /// Intensity multiplier; defaults to the config's default_intensity.
    #[arg(short, long)]
    intensity: Option<f64>,

    /// Pointer x, normalized to [0, 1].
    #[arg(long, default_value_t = 0.5)]
    pointer_x: f64,

    /// Pointer y, normalized to [0, 1].
    #[arg(long, default_value_t = 0.5)]
    pointer_y: f64,

    /// Treat the pointer as hovering over the visualization.
    #[arg(long)]
    hover: bool,

    /// Frame config overrides as a JSON string.
    #[arg(long, default_value = "{}")]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// List patterns and configuration keys.
    List,
    /// Generate one frame and print its elements as JSON.
    Frame {
        #[command(flatten)]
        args: FrameArgs,
    },
    /// Generate one frame and write a PNG snapshot.
    Render {
        #[command(flatten)]
        args: FrameArgs,

        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: usize,

        /// Pixels per display unit.
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Generate consecutive frames and report timing and cache statistics.
    Profile {
        #[command(flatten)]
        args: FrameArgs,

        /// Number of frames to generate.
        #[arg(short = 'n', long, default_value_t = 600)]
        frames: u64,

        /// Evaluate math directly instead of through the cache.
        #[arg(long)]
        uncached: bool,
    },
}

/// A validated frame request plus the config it runs under.
#[derive(Debug)]
struct Prepared {
    config: FrameConfig,
    request: FrameRequest,
}

fn prepare(args: &FrameArgs) -> Result<Prepared, CliError> {
    let overrides: serde_json::Value = serde_json::from_str(&args.config)
        .map_err(|e| CliError::Input(format!("--config is not valid JSON: {e}")))?;
    let config = FrameConfig::from_json(&overrides);
    config.validate()?;

    let pattern = PatternKind::from_name(&args.pattern)?;
    let intensity = args.intensity.unwrap_or(config.default_intensity);
    if !intensity.is_finite() {
        return Err(CliError::Input(format!("intensity must be finite, got {intensity}")));
    }
    if !args.pointer_x.is_finite() || !args.pointer_y.is_finite() {
        return Err(CliError::Input("pointer coordinates must be finite".into()));
    }

    Ok(Prepared {
        config,
        request: FrameRequest {
            frame: args.frame,
            pattern,
            intensity,
            pointer: PointerState::new(args.pointer_x, args.pointer_y, args.hover),
        },
    })
}

fn time_frames<M: MathKernel>(generator: &mut FrameGenerator<M>, request: &FrameRequest, frames: u64) -> Duration {
    let start = Instant::now();
    for offset in 0..frames {
        let frame = request.frame + offset;
        generator.generate_frame(frame, request.pattern, request.intensity, request.pointer);
    }
    start.elapsed()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let patterns: Vec<_> = PatternKind::ALL.iter().map(|k| k.info()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "patterns": patterns,
                    "config": FrameConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Patterns:");
                for p in &patterns {
                    println!("  {} {:<14} {:<24} {}", p.index, p.name, p.subtitle, p.color.to_hex());
                }
                println!("Config keys:");
                if let Some(schema) = FrameConfig::param_schema().as_object() {
                    for (key, spec) in schema {
                        println!("  {key} (default {})", spec["default"]);
                    }
                }
            }
        }
        Command::Frame { args } => {
            let Prepared { config, request } = prepare(&args)?;
            let mut generator = FrameGenerator::new(config)?;
            let elements = generator.generate(&request);
            let out = serde_json::json!({
                "request": request,
                "tilt": ViewTilt::compute(request.frame, &request.pointer),
                "elements": elements,
            });
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", serde_json::to_string(&out)?);
            }
        }
        Command::Render {
            args,
            width,
            height,
            zoom,
            output,
        } => {
            let Prepared { config, request } = prepare(&args)?;
            if !zoom.is_finite() || zoom <= 0.0 {
                return Err(CliError::Input(format!("zoom must be positive, got {zoom}")));
            }
            let options = RasterOptions {
                width,
                height,
                zoom,
                ..RasterOptions::default()
            };
            let mut generator = FrameGenerator::new(config)?;
            pattern_studio_engines::write_request_png(&mut generator, &request, &options, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "pattern": request.pattern,
                    "frame": request.frame,
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} (frame {}, {width}x{height}) -> {}",
                    request.pattern,
                    request.frame,
                    output.display()
                );
            }
        }
        Command::Profile {
            args,
            frames,
            uncached,
        } => {
            let Prepared { config, request } = prepare(&args)?;
            let (elapsed, stats) = if uncached {
                let mut generator = FrameGenerator::uncached(config)?;
                (time_frames(&mut generator, &request, frames), None)
            } else {
                let mut generator = FrameGenerator::new(config)?;
                let elapsed = time_frames(&mut generator, &request, frames);
                (elapsed, Some(generator.kernel().stats()))
            };
            let mean_us = if frames == 0 {
                0.0
            } else {
                elapsed.as_secs_f64() * 1e6 / frames as f64
            };
            tracing::info!(frames, mean_us, uncached, "profile finished");

            if cli.json {
                let info = serde_json::json!({
                    "pattern": request.pattern,
                    "frames": frames,
                    "elements_per_frame": config.grid_size * config.grid_size,
                    "elapsed_ms": elapsed.as_secs_f64() * 1e3,
                    "mean_frame_us": mean_us,
                    "cache": stats,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} frames of {} in {:.2} ms ({mean_us:.1} us/frame)",
                    frames,
                    request.pattern,
                    elapsed.as_secs_f64() * 1e3
                );
                match stats {
                    Some(s) => println!(
                        "cache: {} hits, {} misses ({:.1}% hit), {} evictions, {} entries",
                        s.hits,
                        s.misses,
                        s.hit_ratio() * 100.0,
                        s.evictions,
                        s.entries
                    ),
                    None => println!("cache: disabled"),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pattern_studio=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
