use u_cpusim::models::{
    records_from_specs, Discipline, ProcessRecord, ProcessStatus, TimelineSegment,
};
use u_cpusim::scheduler::{simulate, Simulation, StepOutcome};
use u_cpusim::workload::WorkloadGenerator;
use u_cpusim::SimError;

const QUANTUM: i64 = 3;

fn workloads() -> Vec<Vec<ProcessRecord>> {
    (0..12)
        .map(|seed| {
            let specs = WorkloadGenerator::new(8, seed)
                .with_arrival_window(20)
                .with_burst_range(1, 7)
                .with_priority_range(0, 3)
                .generate();
            records_from_specs(&specs)
        })
        .collect()
}

#[test]
fn every_process_receives_exactly_its_burst() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let out = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            for p in &out.processes {
                assert_eq!(out.timeline.busy_time_for(&p.id), p.burst_time, "{d} {}", p.id);
                assert_eq!(p.remaining(), 0);
                assert_eq!(p.status(), ProcessStatus::Completed);
                assert_eq!(out.timeline.completion_time_for(&p.id), p.completion_time());
            }
        }
    }
}

#[test]
fn segments_are_sorted_and_disjoint() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let out = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            for s in &out.timeline {
                assert!(s.end > s.start, "{d}: empty segment {s:?}");
            }
            for w in out.timeline.segments().windows(2) {
                assert!(w[0].end <= w[1].start, "{d}: {:?} overlaps {:?}", w[0], w[1]);
            }
        }
    }
}

#[test]
fn no_process_runs_before_arrival() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let out = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            for p in &out.processes {
                let first = out.timeline.segments_for_process(&p.id)[0].start;
                assert!(first >= p.arrival_time, "{d} {}", p.id);
                assert_eq!(p.started_at(), Some(first));
            }
        }
    }
}

#[test]
fn waiting_and_turnaround_are_consistent() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let report = simulate(processes.clone(), d, Some(QUANTUM))
                .unwrap()
                .report()
                .unwrap();
            for m in &report.processes {
                assert_eq!(m.waiting_time, m.turnaround_time - m.burst_time);
                assert!(m.waiting_time >= 0, "{d} {}", m.id);
                assert!(m.turnaround_time >= 0);
                assert!(m.response_time >= 0);
                assert!(m.response_time <= m.waiting_time);
            }
        }
    }
}

#[test]
fn utilization_is_one_only_without_idle_gaps() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let out = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            let report = out.report().unwrap();
            if out.timeline.idle_gaps().is_empty() {
                assert!((report.cpu_utilization - 1.0).abs() < 1e-10);
            } else {
                assert!(report.cpu_utilization < 1.0);
            }
        }
    }
}

#[test]
fn independent_runs_are_identical() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let a = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            let b = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a.report().unwrap()).unwrap(),
                serde_json::to_string(&b.report().unwrap()).unwrap()
            );
        }
    }
}

#[test]
fn stepping_matches_batch_run() {
    for processes in workloads() {
        for d in Discipline::ALL {
            let batch = simulate(processes.clone(), d, Some(QUANTUM)).unwrap();

            let mut sim = Simulation::new(processes.clone(), d, Some(QUANTUM)).unwrap();
            let mut executed: Vec<TimelineSegment> = Vec::new();
            loop {
                match sim.step().unwrap() {
                    StepOutcome::Dispatched(s) => executed.push(s),
                    StepOutcome::Idle { from, to } => assert!(to > from),
                    StepOutcome::Finished => break,
                }
            }

            let stepped_busy: i64 = executed.iter().map(|s| s.duration()).sum();
            assert_eq!(stepped_busy, batch.timeline.busy_time());
            assert_eq!(sim.into_output(), batch, "{d}");
        }
    }
}

#[test]
fn non_preemptive_disciplines_never_split_a_process() {
    for processes in workloads() {
        for d in [
            Discipline::Fcfs,
            Discipline::Sjf,
            Discipline::PriorityNonPreemptive,
        ] {
            let out = simulate(processes.clone(), d, None).unwrap();
            assert_eq!(out.timeline.len(), out.processes.len(), "{d}");
        }
    }
}

#[test]
fn round_robin_slices_never_exceed_quantum() {
    for processes in workloads() {
        let out = simulate(processes, Discipline::RoundRobin, Some(QUANTUM)).unwrap();
        assert!(out.timeline.iter().all(|s| s.duration() <= QUANTUM));
    }
}

#[test]
fn near_limit_workloads_complete_or_are_rejected() {
    let half = i64::MAX / 2;
    let fits = vec![ProcessRecord::new("P1", 0, half), ProcessRecord::new("P2", 1, half - 1)];
    for d in Discipline::ALL {
        let out = simulate(fits.clone(), d, Some(i64::MAX)).unwrap();
        let report = out.report().unwrap();
        assert_eq!(report.makespan, 2 * half - 1, "{d}");
        assert_eq!(report.total_busy_time, 2 * half - 1, "{d}");
        assert!(report.average_turnaround_time > 0.0);
    }

    let late = vec![ProcessRecord::new("P1", i64::MAX - 1, 5)];
    for d in Discipline::ALL {
        let err = simulate(late.clone(), d, Some(QUANTUM)).unwrap_err();
        assert!(matches!(err, SimError::InvalidInput(_)), "{d}");
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let processes = vec![ProcessRecord::new("P1", 0, 1), ProcessRecord::new("P1", 0, 2)];
    for d in Discipline::ALL {
        let err = simulate(processes.clone(), d, Some(QUANTUM)).unwrap_err();
        assert!(matches!(err, SimError::InvalidInput(_)), "{d}");
    }
}
