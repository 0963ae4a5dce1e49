//! Range Slider CLI: drive the slider core headlessly.
//!
//! Commands:
//! - `run`: build a slider from a TOML config, replay a JSON interaction
//!   script against it and print every render and callback
//! - `scale`: print the scale ticks for a numeric domain

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rangeslider_core::config::{HeadlessSlider, Script, SliderConfig, Step};
use rangeslider_core::domain::{ModelOptions, SliderState};
use rangeslider_core::grid::{Grid, ScaleOptions, MAX_SCALE_TICKS};
use rangeslider_core::presenter::{AllData, Callbacks};
use rangeslider_core::view::RenderData;
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

use crate::logging::{init_logging, LogConfig};

#[derive(Parser)]
#[command(
    name = "rangeslider",
    about = "Range slider core, headless: replay configs and scripts"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored log output.
    #[arg(long, default_value_t = false, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a slider from a config and replay an interaction script.
    Run {
        /// Path to a TOML slider config.
        #[arg(long)]
        config: PathBuf,

        /// Path to a JSON interaction script. Without it only the initial
        /// render is printed.
        #[arg(long)]
        script: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print scale ticks for a numeric domain.
    Scale {
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Interior tick count (capped at 10).
        #[arg(long, default_value_t = MAX_SCALE_TICKS)]
        ticks: usize,

        /// Leave out the minimum.
        #[arg(long, default_value_t = false)]
        no_min: bool,

        /// Leave out the maximum.
        #[arg(long, default_value_t = false)]
        no_max: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(!cli.no_color));

    match cli.command {
        Commands::Run {
            config,
            script,
            format,
        } => run_script(&config, script.as_deref(), format),
        Commands::Scale {
            min,
            max,
            step,
            ticks,
            no_min,
            no_max,
            format,
        } => run_scale(
            min,
            max,
            step,
            ScaleOptions {
                num_of_scale_val: ticks,
                display_min: !no_min,
                display_max: !no_max,
            },
            format,
        ),
    }
}

// ── run ──────────────────────────────────────────────────────────────

type Events = Rc<RefCell<Vec<String>>>;

/// What one script step produced.
#[derive(Debug, Serialize)]
struct StepReport {
    step: usize,
    action: &'static str,
    events: Vec<String>,
    frames: Vec<RenderData>,
    state: SliderState,
}

#[derive(Serialize)]
struct RunOutput {
    steps: Vec<StepReport>,
    #[serde(rename = "final")]
    final_data: AllData,
}

fn recording_callbacks(events: &Events) -> Callbacks {
    let (start, change, finish, update) = (
        events.clone(),
        events.clone(),
        events.clone(),
        events.clone(),
    );
    Callbacks::new()
        .on_start(move |s| start.borrow_mut().push(format!("start {}", s.handles())))
        .on_change(move |s| change.borrow_mut().push(format!("change {}", s.handles())))
        .on_finish(move |s| finish.borrow_mut().push(format!("finish {}", s.handles())))
        .on_update(move || update.borrow_mut().push("update".to_string()))
}

fn action_name(step: &Step) -> &'static str {
    match step {
        Step::Update { .. } => "update",
        Step::SetUserData { .. } => "setUserData",
        Step::Drag { .. } => "drag",
        Step::Click { .. } => "click",
    }
}

fn collect(step: usize, action: &'static str, slider: &HeadlessSlider, events: &Events) -> StepReport {
    StepReport {
        step,
        action,
        events: std::mem::take(&mut *events.borrow_mut()),
        frames: slider.view.take_frames(),
        state: slider.presenter.get_model_data(),
    }
}

fn run_script(config_path: &Path, script_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = SliderConfig::from_file(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let script = match script_path {
        Some(path) => Script::from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::default(),
    };

    let events: Events = Rc::default();
    let slider = config.build_headless(recording_callbacks(&events));
    info!(steps = script.steps.len(), "replaying script");

    let mut reports = Vec::with_capacity(script.steps.len() + 1);
    reports.push(collect(0, "init", &slider, &events));
    for (i, step) in script.steps.iter().enumerate() {
        slider.apply(step);
        reports.push(collect(i + 1, action_name(step), &slider, &events));
    }

    match format {
        OutputFormat::Json => {
            let output = RunOutput {
                steps: reports,
                final_data: slider.presenter.get_all_data(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_reports(&reports),
    }

    Ok(())
}

fn print_reports(reports: &[StepReport]) {
    for report in reports {
        println!("[{}] {}", report.step, report.action);
        if !report.events.is_empty() {
            println!("  events: {}", report.events.join(", "));
        }
        for frame in &report.frames {
            println!("  render: {}", format_frame(frame));
        }
        println!("  state:  {}", format_state(&report.state));
    }
}

fn format_frame(frame: &RenderData) -> String {
    let percent = frame.percentage.map(|p| format!("{p}%"));
    let scale: Vec<String> = frame.data.iter().map(ToString::to_string).collect();
    format!("{} at {} | scale: {}", frame.value, percent, scale.join(" "))
}

fn format_state(state: &SliderState) -> String {
    let mut line = format!(
        "[{}, {}] step {} value {}",
        state.min_value,
        state.max_value,
        state.step,
        state.handles()
    );
    if !state.locked_values.is_empty() {
        let locked: Vec<&str> = state.locked_values.iter().map(|f| f.name()).collect();
        line.push_str(&format!(" locked {}", locked.join(",")));
    }
    line
}

// ── scale ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ScaleTick {
    value: f64,
    percent: f64,
}

fn run_scale(min: f64, max: f64, step: f64, scale: ScaleOptions, format: OutputFormat) -> Result<()> {
    ModelOptions::new()
        .with_bounds(min, max)
        .with_step(step)
        .validate()
        .context("invalid scale domain")?;

    let grid = Grid::new(min, max, step);
    let ticks: Vec<ScaleTick> = grid
        .ticks(&scale)
        .into_iter()
        .map(|value| ScaleTick {
            value,
            percent: grid.value_to_percent(value),
        })
        .collect();
    info!(count = ticks.len(), "scale computed");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ticks)?),
        OutputFormat::Text => {
            println!("{:>12} {:>10}", "Value", "Percent");
            println!("{}", "-".repeat(23));
            for tick in &ticks {
                println!("{:>12} {:>9}%", tick.value, tick.percent);
            }
        }
    }

    Ok(())
}
