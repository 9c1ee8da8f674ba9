//! staffing-runner: headless driver for the staffing decision engine.
//!
//! Usage:
//!   staffing-runner --request request.json --roster roster.json --db staff.db
//!   staffing-runner --ipc-mode --db staff.db
//!   staffing-runner --watch --request request.json --interval-secs 60 --iterations 10

use anyhow::Result;
use chrono::Local;
use staffing_core::{
    alerts::LogAlertSink,
    config::StaffingConfig,
    error::StaffingError,
    orchestrator::{DecisionOrchestrator, DecisionRecord},
    predictor::LinearDemandModel,
    roster::Roster,
    snapshot::SituationSnapshot,
    store::{DailySnapshot, RosterStore},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(serde::Serialize)]
struct ErrorResponse {
    status: u16,
    error:  String,
}

impl ErrorResponse {
    fn from_error(e: &StaffingError) -> Self {
        let status = if e.is_client_error() { 400 } else { 500 };
        Self { status, error: e.to_string() }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let watch_mode = args.iter().any(|a| a == "--watch");
    let interval_secs = parse_arg(&args, "--interval-secs", 60u64);
    let iterations = parse_arg(&args, "--iterations", 0u64);
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let default_model = format!("{data_dir}/model/demand_model.json");
    let model_path = string_arg(&args, "--model").unwrap_or(&default_model);
    let roster_path = string_arg(&args, "--roster");
    let request_path = string_arg(&args, "--request");

    if !ipc_mode {
        println!("Hospital staffing: staffing-runner");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!("  model:     {model_path}");
        println!();
    }

    let config = StaffingConfig::load(data_dir)?;
    let model = LinearDemandModel::load(model_path)?;

    let store = RosterStore::open(db)?;
    store.migrate()?;
    if let Some(path) = roster_path {
        let imported = Roster::from_json_file(path)?;
        store.save_roster(&imported)?;
        log::info!("imported {} staff records from {path}", imported.len());
    }

    let mut orchestrator =
        DecisionOrchestrator::new(&config, Box::new(model), Box::new(LogAlertSink));

    if ipc_mode {
        run_ipc_loop(&mut orchestrator, &store)
    } else if watch_mode {
        let path = request_path
            .ok_or_else(|| anyhow::anyhow!("--watch needs --request for demand features"))?;
        run_watch_loop(&mut orchestrator, &store, path, interval_secs, iterations)
    } else {
        let path = request_path.ok_or_else(|| anyhow::anyhow!("--request is required"))?;
        run_once(&mut orchestrator, &store, path)
    }
}

fn run_once(orchestrator: &mut DecisionOrchestrator, store: &RosterStore, path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let payload: serde_json::Value = serde_json::from_str(&content)?;

    match handle_request(orchestrator, store, &payload) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            print_summary(&record);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from_error(&e))?);
            Err(e.into())
        }
    }
}

fn run_ipc_loop(orchestrator: &mut DecisionOrchestrator, store: &RosterStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let payload: serde_json::Value = match serde_json::from_str(&buffer) {
            Ok(v) => v,
            Err(e) => {
                let err = ErrorResponse { status: 400, error: e.to_string() };
                writeln!(stdout, "{}", serde_json::to_string(&err)?)?;
                stdout.flush()?;
                continue;
            }
        };

        match handle_request(orchestrator, store, &payload) {
            Ok(record) => writeln!(stdout, "{}", serde_json::to_string(&record)?)?,
            Err(e) => {
                log::warn!("request failed: {e}");
                writeln!(stdout, "{}", serde_json::to_string(&ErrorResponse::from_error(&e))?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn run_watch_loop(
    orchestrator:  &mut DecisionOrchestrator,
    store:         &RosterStore,
    path:          &str,
    interval_secs: u64,
    iterations:    u64,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let snapshot = SituationSnapshot::from_value(&serde_json::from_str(&content)?)?;
    let features = snapshot.demand_features()?;

    let mut pass = 0u64;
    loop {
        pass += 1;
        let mut roster = store.load_roster()?;
        if let Some(outcome) = orchestrator.sweep(&features, &mut roster)? {
            store.save_roster(&roster)?;
            println!("AI automation logs (predicted {}):", outcome.predicted_total_patients);
            for line in &outcome.actions_taken {
                println!("  - {line}");
            }
        }

        if iterations != 0 && pass >= iterations {
            break;
        }
        std::thread::sleep(Duration::from_secs(interval_secs));
    }
    Ok(())
}

/// One full decision against the stored roster, with the roster written
/// back and the day's snapshot and decision recorded.
fn handle_request(
    orchestrator: &mut DecisionOrchestrator,
    store:        &RosterStore,
    payload:      &serde_json::Value,
) -> Result<DecisionRecord, StaffingError> {
    let snapshot = SituationSnapshot::from_value(payload)?;
    let features = snapshot.demand_features()?;
    let mut roster = store.load_roster()?;

    let record = orchestrator.decide(&snapshot, &mut roster)?;
    store.save_roster(&roster)?;

    let today = Local::now().date_naive();
    if !store.insert_daily_snapshot(&DailySnapshot::capture(today, &features, &roster))? {
        log::debug!("daily snapshot for {today} already recorded");
    }
    let decision_id = store.record_decision(today, &record)?;
    log::info!("decision {decision_id} recorded");

    Ok(record)
}

fn print_summary(record: &DecisionRecord) {
    let summary = &record.staff_status_summary;
    println!();
    println!("=== DECISION SUMMARY ===");
    println!("  risk:           {} ({:?})", record.risk_assessment.risk_score, record.risk_assessment.risk_level);
    println!("  predicted:      {}", record.patient_prediction.predicted_total_patients);
    println!("  mode:           {}", record.patient_prediction.decision_mode);
    println!("  on duty:        {}", summary.on_duty_count);
    println!("  off-duty ready: {}", summary.off_duty_ready_count);
    println!("  blocked:        {}", summary.blocked_staff_count);
    for line in &record.ai_automation.actions_taken {
        println!("  action:         {line}");
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
