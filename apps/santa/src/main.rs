//! `santa` — solve, validate, compare, and generate sleigh delivery problems.
//!
//! ```text
//! santa solve problem.txt -o out.txt --policy mission --trajectory ./traj
//! santa validate problem.txt out.txt --base 0,0
//! santa compare problem.txt
//! santa generate problem.txt --seed 7 --gifts 200
//! ```
//!
//! Set `RUST_LOG=debug` to see every applied command.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use sleigh_core::{Coordinate, SimRng, Tick};
use sleigh_output::{CsvTrajectoryWriter, TrajectoryObserver, read_command_log_file, write_command_log_file};
use sleigh_physics::{Simulator, SimulatorBuilder};
use sleigh_policy::{FloatPolicy, GreedyPolicy, MissionPolicy, Policy};
use sleigh_problem::{GeneratorConfig, generate_problem, load_problem, write_problem};
use sleigh_run::{EpisodeBuilder, EpisodeSummary, NoopObserver, evaluate_batch, replay};


// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyKind {
    /// Deliver what is in range, otherwise fly at the first loaded gift
    Greedy,
    /// Plan a batch at the base, deliver it, and return
    Mission,
    /// Never act; drift until the time limit
    Float,
}

impl PolicyKind {
    const ALL: [PolicyKind; 3] = [PolicyKind::Greedy, PolicyKind::Mission, PolicyKind::Float];

    fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Greedy => Box::new(GreedyPolicy::new()),
            PolicyKind::Mission => Box::new(MissionPolicy::new()),
            PolicyKind::Float => Box::new(FloatPolicy),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "santa", version)]
#[command(about = "Plan and check Santa's sleigh deliveries")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Run a policy on a problem and write its command log
    Solve {
        /// Problem file
        input: PathBuf,

        /// Where to write the command log
        #[arg(short, long, default_value = "out.txt")]
        output: PathBuf,

        /// Base position as "c,r"
        #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
        base: Coordinate,

        /// Decision rule driving the sleigh
        #[arg(long, value_enum, default_value_t = PolicyKind::Mission)]
        policy: PolicyKind,

        /// Carrots loaded at the base before the first decision
        #[arg(long, default_value_t = 0)]
        initial_fuel: u64,

        /// Stop after this many decisions
        #[arg(long)]
        max_steps: Option<u64>,

        /// Directory for trajectory.csv and episode_summary.csv
        #[arg(long)]
        trajectory: Option<PathBuf>,

        /// Also write the episode summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Replay a command log against a problem and print its score
    Validate {
        /// Problem file
        input: PathBuf,

        /// Command log to check
        log: PathBuf,

        /// Base position as "c,r"
        #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
        base: Coordinate,
    },

    /// Run every built-in policy on a problem and compare scores
    Compare {
        /// Problem file
        input: PathBuf,

        /// Base position as "c,r"
        #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
        base: Coordinate,
    },

    /// Write a random problem file
    Generate {
        /// Where to write the problem
        out: PathBuf,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of gifts
        #[arg(long, default_value_t = 100)]
        gifts: usize,

        /// Time limit T
        #[arg(long, default_value_t = 2_000)]
        time_limit: u64,

        /// Delivery and loading range D
        #[arg(long, default_value_t = 10)]
        range: u64,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        CliCommand::Solve {
            input,
            output,
            base,
            policy,
            initial_fuel,
            max_steps,
            trajectory,
            summary_json,
        } => {
            let options = SolveOptions {
                policy,
                initial_fuel,
                max_steps,
                trajectory,
                summary_json,
            };
            solve(&input, base, &output, &options)
        }
        CliCommand::Validate { input, log, base } => validate(&input, base, &log),
        CliCommand::Compare { input, base } => compare(&input, base),
        CliCommand::Generate {
            out,
            seed,
            gifts,
            time_limit,
            range,
        } => generate(&out, seed, gifts, time_limit, range),
    }
}

fn load_simulator(input: &Path, base: Coordinate) -> Result<Simulator> {
    let problem = load_problem(input).with_context(|| format!("loading problem {}", input.display()))?;
    info!(
        "loaded {}: T={} D={} {} gifts, base {base}",
        input.display(),
        problem.time_limit.0,
        problem.range,
        problem.catalog.len()
    );
    SimulatorBuilder::from_problem(problem)
        .base(base)
        .build()
        .with_context(|| format!("building simulator for {}", input.display()))
}

// ── solve ─────────────────────────────────────────────────────────────────────

struct SolveOptions {
    policy:       PolicyKind,
    initial_fuel: u64,
    max_steps:    Option<u64>,
    trajectory:   Option<PathBuf>,
    summary_json: Option<PathBuf>,
}

fn solve(input: &Path, base: Coordinate, output: &Path, options: &SolveOptions) -> Result<()> {
    let sim = load_simulator(input, base)?;

    println!("=== santa solve ===");
    println!("  problem    : {}", input.display());
    println!("  policy     : {:?}", options.policy);
    println!("  gifts      : {}", sim.catalog().len());
    println!("  time limit : {}", sim.time_limit().0);
    println!();

    let mut builder = EpisodeBuilder::new(&sim, options.policy.build()).initial_fuel(options.initial_fuel);
    if let Some(cap) = options.max_steps {
        builder = builder.max_steps(cap);
    }
    let mut episode = builder.build().context("configuring episode")?;

    let t0 = Instant::now();
    let summary = match &options.trajectory {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            let writer = CsvTrajectoryWriter::new(dir).context("opening trajectory files")?;
            let mut observer = TrajectoryObserver::new(writer);
            let summary = episode.run(&mut observer).context("running episode")?;
            if let Some(e) = observer.take_error() {
                bail!("writing trajectory to {}: {e}", dir.display());
            }
            summary
        }
        None => episode.run(&mut NoopObserver).context("running episode")?,
    };
    let elapsed = t0.elapsed();

    write_command_log_file(output, episode.log())
        .with_context(|| format!("writing command log {}", output.display()))?;

    if let Some(path) = &options.summary_json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    print_summary(&summary);
    println!("  commands   : {} -> {}", episode.log().len(), output.display());
    println!("  wall time  : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn print_summary(summary: &EpisodeSummary) {
    print!("{}", summary_report(summary));
}

fn summary_report(summary: &EpisodeSummary) -> String {
    format!(
        "  stopped    : {:?} at t={}\n  score      : {}\n  delivered  : {}/{}\n  steps      : {} ({} rejected)\n  carrots    : {} left\n",
        summary.termination,
        summary.final_time.0,
        summary.score,
        summary.delivered,
        summary.total_gifts,
        summary.steps,
        summary.rejected,
        summary.carrots_left,
    )
}

// ── validate ──────────────────────────────────────────────────────────────────

fn validate(input: &Path, base: Coordinate, log_path: &Path) -> Result<()> {
    let sim = load_simulator(input, base)?;
    let log = read_command_log_file(log_path).with_context(|| format!("reading {}", log_path.display()))?;
    let outcome = replay(&sim, &log).with_context(|| format!("replaying {}", log_path.display()))?;

    let Tick(end) = outcome.state.current_time;
    println!("valid: {} commands, t={end}", outcome.applied);
    println!(
        "score: {} ({}/{} gifts delivered)",
        outcome.score,
        outcome.state.delivered_gifts.len(),
        sim.catalog().len()
    );
    Ok(())
}

// ── compare ───────────────────────────────────────────────────────────────────

fn compare(input: &Path, base: Coordinate) -> Result<()> {
    let sim = load_simulator(input, base)?;
    let policies: Vec<Box<dyn Policy>> = PolicyKind::ALL.iter().map(|kind| kind.build()).collect();

    println!("{:<10} {:>8} {:>10} {:>8} {:>14}", "policy", "score", "delivered", "time", "termination");
    for (kind, result) in PolicyKind::ALL.iter().zip(evaluate_batch(&sim, policies)) {
        let summary = result.with_context(|| format!("running {kind:?}"))?;
        println!(
            "{:<10} {:>8} {:>10} {:>8} {:>14}",
            summary.policy,
            summary.score,
            format!("{}/{}", summary.delivered, summary.total_gifts),
            summary.final_time.0,
            format!("{:?}", summary.termination),
        );
    }
    Ok(())
}

// ── generate ──────────────────────────────────────────────────────────────────

fn generate(out: &Path, seed: u64, gifts: usize, time_limit: u64, range: u64) -> Result<()> {
    let config = GeneratorConfig {
        time_limit,
        range,
        gift_count: gifts,
        ..GeneratorConfig::default()
    };
    let mut rng = SimRng::new(seed);
    let problem = generate_problem(&config, &mut rng).context("generating problem")?;

    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    write_problem(&problem, BufWriter::new(file)).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "wrote {} gifts, {} bands, T={} D={} (seed {seed}) to {}",
        problem.catalog.len(),
        problem.ranges.len(),
        problem.time_limit.0,
        problem.range,
        out.display()
    );
    Ok(())
}
