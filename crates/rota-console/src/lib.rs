//! Colored console output for rotation solving.
//!
//! Provides a `tracing` layer that renders the structured events emitted by
//! `rota-solver` (each carries an `event` field) as one colored line apiece.
//!
//! ## Log Levels
//!
//! - **INFO**: Hunt, attempt and solve lifecycle, randomized runs
//! - **DEBUG**: Raw solver returns
//! - **WARN**: Solver time limits

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static HUNT_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "rota_solver=info,rota=info";

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. Prints the
/// banner and installs the layer unless another subscriber already is.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RotaConsoleLayer)
            .try_init();
    });
}

// Marks the start of a hunt for elapsed time tracking.
fn mark_hunt_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    HUNT_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let epoch = EPOCH.get_or_init(Instant::now);
    let start_nanos = HUNT_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _ __ ___ | |_ __ _
| '__/ _ \| __/ _` |
| | | (_) | || (_| |
|_|  \___/ \__\__,_|
"#;

    let version_line = format!("  v{} - fair pair rotations\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats rota events with colors.
pub struct RotaConsoleLayer;

impl<S: Subscriber> Layer<S> for RotaConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("rota_solver") && !target.starts_with("rota::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    mode: Option<String>,
    variant: Option<String>,
    status: Option<String>,
    candidates: Option<String>,
    horizon: Option<u64>,
    min: Option<u64>,
    max: Option<u64>,
    attempt: Option<u64>,
    total: Option<u64>,
    attempts: Option<u64>,
    spread: Option<u64>,
    variables: Option<u64>,
    rows: Option<u64>,
    run: Option<u64>,
    iterations: Option<u64>,
    seed: Option<u64>,
    duration_ms: Option<u64>,
    found: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "mode" => self.mode = Some(s),
            "variant" => self.variant = Some(s),
            "status" => self.status = Some(s),
            "candidates" => self.candidates = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "horizon" => self.horizon = Some(value),
            "min" => self.min = Some(value),
            "max" => self.max = Some(value),
            "attempt" => self.attempt = Some(value),
            "total" => self.total = Some(value),
            "attempts" => self.attempts = Some(value),
            "spread" => self.spread = Some(value),
            "variables" => self.variables = Some(value),
            "rows" => self.rows = Some(value),
            "run" => self.run = Some(value),
            "iterations" => self.iterations = Some(value),
            "seed" => self.seed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        // Counts are never negative.
        if let Ok(value) = u64::try_from(value) {
            self.record_u64(field, value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "found" {
            self.found = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "mode" => self.mode = Some(value.to_string()),
            "variant" => self.variant = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "hunt_start" => format_hunt_start(v),
        "attempt_start" => format_attempt_start(v),
        "attempt_end" => format_attempt_end(v),
        "hunt_end" => format_hunt_end(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "randomized_run" => format_randomized_run(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_hunt_start(v: &EventVisitor) -> String {
    mark_hunt_start();
    let mode = v.mode.as_deref().unwrap_or("stride");
    let mut output = format!(
        "{} {} Hunting ({}) │ horizons {}..{}",
        format_elapsed(),
        "▶".bright_green().bold(),
        mode.white().bold(),
        v.min.unwrap_or(0).bright_yellow(),
        v.max.unwrap_or(0).bright_yellow(),
    );
    if let Some(ref candidates) = v.candidates {
        output.push_str(&format!(" │ candidates {}", candidates.bright_magenta()));
    }
    output
}

fn format_attempt_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Attempt {}/{} │ horizon {} │ {}",
        format_elapsed(),
        "▶".bright_blue(),
        v.attempt.unwrap_or(0),
        v.total.unwrap_or(0),
        v.horizon.unwrap_or(0).bright_yellow(),
        v.variant.as_deref().unwrap_or("?").white().bold(),
    )
}

fn format_attempt_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Attempt {}/{} │ horizon {} │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        v.attempt.unwrap_or(0),
        v.total.unwrap_or(0),
        v.horizon.unwrap_or(0).bright_yellow(),
        format_status(v.status.as_deref().unwrap_or("?")),
    )
}

fn format_hunt_end(v: &EventVisitor) -> String {
    let attempts = v.attempts.unwrap_or(0);
    if v.found.unwrap_or(false) {
        format!(
            "{} {} Schedule found │ horizon {} │ {} │ spread {} │ {} attempts",
            format_elapsed(),
            "■".bright_cyan().bold(),
            v.horizon.unwrap_or(0).bright_yellow(),
            v.variant.as_deref().unwrap_or("?").white().bold(),
            v.spread.unwrap_or(0).bright_magenta(),
            attempts,
        )
    } else {
        format!(
            "{} {} {} │ {} attempts",
            format_elapsed(),
            "■".bright_red().bold(),
            "NO FAIR SCHEDULE".bright_red().bold(),
            attempts,
        )
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{}   Solving {} │ horizon {} │ {} indicators │ {} rows",
        format_elapsed(),
        v.variant.as_deref().unwrap_or("?").white(),
        v.horizon.unwrap_or(0),
        format_count(v.variables.unwrap_or(0)).bright_yellow(),
        format_count(v.rows.unwrap_or(0)).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{}   Solved {} │ {} │ {}",
        format_elapsed(),
        v.variant.as_deref().unwrap_or("?").white(),
        format_status(v.status.as_deref().unwrap_or("?")),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );
    if let Some(spread) = v.spread {
        output.push_str(&format!(" │ spread {}", spread.bright_magenta()));
    }
    output
}

fn format_randomized_run(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Run {}/{} │ seed {} │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        v.run.unwrap_or(0),
        v.iterations.unwrap_or(0),
        v.seed.unwrap_or(0).bright_black(),
        format_status(v.status.as_deref().unwrap_or("?")),
    );
    if let Some(spread) = v.spread {
        output.push_str(&format!(" │ spread {}", spread.bright_magenta()));
    }
    output
}

fn format_status(status: &str) -> String {
    if status == "accepted" {
        status.bright_green().bold().to_string()
    } else if status.starts_with("unfair") {
        status.yellow().to_string()
    } else {
        status.bright_red().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
