use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use u_cpusim::models::{Discipline, Ticks, Timeline};
use u_cpusim::scheduler::{SimulationReport, SimulationRequest, StepOutcome};
use u_cpusim::workload::WorkloadGenerator;

#[derive(Debug, clap::Parser)]
#[command(
    name = "u-cpusim",
    version,
    about = "Simulate CPU scheduling disciplines and report timeline metrics."
)]
struct Opts {
    /// JSON workload file with `discipline`, optional `quantum`, and `processes`.
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// Scheduling discipline, overriding the workload file.
    ///
    /// One of FCFS, SJF, SRTF, PRIORITY_NP, PRIORITY_P, RR.
    #[clap(short = 'a', long)]
    algorithm: Option<Discipline>,

    /// Round Robin time quantum, overriding the workload file.
    #[clap(short = 'q', long)]
    quantum: Option<Ticks>,

    /// Generate N random processes instead of reading a workload file.
    #[clap(long, conflicts_with = "input")]
    random: Option<usize>,

    /// Seed for --random.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// Drive the simulation one decision at a time, logging every step.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    step: bool,

    /// Print the report as JSON.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,

    /// Enable verbose output. Repeat for per-tick tracing.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_request(opts: &Opts) -> Result<SimulationRequest> {
    let mut request = match (&opts.input, opts.random) {
        (Some(path), _) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read workload {}", path.display()))?;
            SimulationRequest::from_json(&json)
                .with_context(|| format!("Failed to parse workload {}", path.display()))?
        }
        (None, Some(count)) => SimulationRequest::new(Discipline::Fcfs)
            .with_processes(WorkloadGenerator::new(count, opts.seed).generate()),
        (None, None) => bail!("Either --input or --random is required"),
    };

    if let Some(discipline) = opts.algorithm {
        request.discipline = discipline;
    }
    if let Some(quantum) = opts.quantum {
        request.quantum = Some(quantum);
    }
    Ok(request)
}

fn print_report(report: &SimulationReport, timeline: &Timeline) {
    println!(
        "{:<8} {:>7} {:>6} {:>5} {:>6} {:>6} {:>6} {:>6}",
        "PID", "Arrival", "Burst", "Prio", "CT", "TAT", "WT", "RT"
    );
    for m in &report.processes {
        println!(
            "{:<8} {:>7} {:>6} {:>5} {:>6} {:>6} {:>6} {:>6}",
            m.id,
            m.arrival_time,
            m.burst_time,
            m.priority,
            m.completion_time,
            m.turnaround_time,
            m.waiting_time,
            m.response_time
        );
    }

    println!();
    let mut bar = String::new();
    let mut ticks = String::new();
    let mut cursor = 0;
    for s in timeline {
        if s.start > cursor {
            bar.push_str("| idle ");
            ticks.push_str(&format!("{:<7}", cursor));
        }
        let cell = format!("| {} ", s.process_id);
        ticks.push_str(&format!("{:<width$}", s.start, width = cell.len()));
        bar.push_str(&cell);
        cursor = s.end;
    }
    bar.push('|');
    ticks.push_str(&cursor.to_string());
    println!("{bar}");
    println!("{ticks}");

    println!();
    println!("Average Waiting Time:    {:.2}", report.average_waiting_time);
    println!("Average Turnaround Time: {:.2}", report.average_turnaround_time);
    println!("Average Response Time:   {:.2}", report.average_response_time);
    println!("CPU Utilization:         {:.2}%", report.cpu_utilization * 100.0);
    println!(
        "Throughput:              {:.2} processes/unit time",
        report.throughput
    );
    println!("Context Switches:        {}", report.context_switches);
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let loglevel = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Off)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        loglevel,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let request = load_request(&opts)?;
    info!(
        "{} ({}) on {} process(es)",
        request.discipline,
        request.discipline.description(),
        request.processes.len()
    );

    let mut sim = request.simulation().context("Invalid workload")?;
    if opts.step {
        loop {
            match sim.step().context("Simulation failed")? {
                StepOutcome::Dispatched(s) => {
                    info!("t={:>4}..{:<4} {}", s.start, s.end, s.process_id)
                }
                StepOutcome::Idle { from, to } => info!("t={from:>4}..{to:<4} idle"),
                StepOutcome::Finished => break,
            }
        }
    } else {
        sim.run_to_completion().context("Simulation failed")?;
    }

    let report = sim.report().context("Failed to compute metrics")?;
    debug!("{} segment(s), makespan {}", sim.timeline().len(), report.makespan);

    if opts.json {
        let doc = serde_json::json!({
            "discipline": sim.discipline(),
            "quantum": sim.quantum(),
            "timeline": sim.timeline(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_report(&report, sim.timeline());
    }

    Ok(())
}
