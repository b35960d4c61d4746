//! Sleeve Headless Simulation Harness
//!
//! Drives a roster of sleeves through task assignments and game cycles
//! using the bundled task catalog. Runs entirely in-process with no UI, no
//! save file, no game loop.
//!
//! Usage:
//!   cargo run -p sleeve-simtest
//!   cargo run -p sleeve-simtest -- --verbose --seed=7 --cycles=5000
//!   cargo run -p sleeve-simtest -- --config=harness.json
//!
//! `RUST_LOG` overrides the log level (default `warn`, `debug` with
//! `--verbose`).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use sleeve_logic::catalog::TaskCatalog;
use sleeve_logic::config::{validate_config, SleeveConfig};
use sleeve_logic::constants::{faction_work, selector};
use sleeve_logic::controller::{
    assign_from_selector, describe_current_activity, AssignOutcome,
};
use sleeve_logic::cycle::process_cycles;
use sleeve_logic::environment::TaskEnvironment;
use sleeve_logic::gains::{
    compute_displayed_gains_with, crime_progress, progress_bar_text, render_row, GainKind,
    Qualifier,
};
use sleeve_logic::roster::{can_manage_augmentations, can_travel, SleeveRoster, SortOption};
use sleeve_logic::sleeve::{GainRates, Sleeve, SleeveStats};
use sleeve_logic::snapshot::SleeveSnapshot;
use sleeve_logic::task::TaskKind;
use tracing_subscriber::EnvFilter;

// ── Task catalog (bundled game data) ────────────────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/task_catalog.json");

/// Harness run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct HarnessConfig {
    seed: u64,
    cycles: u32,
    display: SleeveConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cycles: 20_000,
            display: SleeveConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// `--config=path.json` loads a full config; `--seed=` and `--cycles=`
    /// override individual fields.
    fn from_args(args: &[String]) -> Self {
        let mut config = args
            .iter()
            .find_map(|a| a.strip_prefix("--config="))
            .and_then(|path| match load_config(path) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::warn!("ignoring --config={}: {}", path, e);
                    None
                }
            })
            .unwrap_or_default();

        for arg in args {
            if let Some(v) = arg.strip_prefix("--seed=") {
                match v.parse() {
                    Ok(seed) => config.seed = seed,
                    Err(e) => log::warn!("ignoring --seed={}: {}", v, e),
                }
            } else if let Some(v) = arg.strip_prefix("--cycles=") {
                match v.parse() {
                    Ok(cycles) => config.cycles = cycles,
                    Err(e) => log::warn!("ignoring --cycles={}: {}", v, e),
                }
            }
        }
        config
    }
}

fn load_config(path: &str) -> Result<HarnessConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    init_logging(verbose);

    let config = HarnessConfig::from_args(&args);
    println!("=== Sleeve Simulation Harness ===");
    println!("seed={} cycles={}\n", config.seed, config.cycles);

    let mut results = Vec::new();

    // 1. Catalog & config validation
    let catalog = match serde_json::from_str::<TaskCatalog>(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ catalog_parse: JSON parse error: {}", e);
            std::process::exit(1);
        }
    };
    results.extend(validate_catalog(&catalog, &config));

    // 2. Selector sweep over every task kind
    results.extend(validate_assignments(&catalog, verbose));

    // 3. Earnings table modes
    results.extend(validate_gain_display(&catalog, &config, verbose));

    // 4. Crime cycles with random rolls
    results.extend(validate_crime_cycles(&catalog, &config, verbose));

    // 5. Roster sorting & gating
    results.extend(validate_roster(&config));

    // 6. Save snapshot round trip
    results.extend(validate_snapshots(&catalog, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The selector slots used to exercise each task kind.
fn sample_selections() -> Vec<(TaskKind, [&'static str; 3])> {
    vec![
        (TaskKind::Company, [selector::COMPANY, "MegaCorp", ""]),
        (
            TaskKind::Faction,
            [selector::FACTION, "CyberSec", faction_work::HACKING],
        ),
        (TaskKind::Crime, [selector::CRIME, "Mug", ""]),
        (
            TaskKind::Class,
            [selector::CLASS, "Algorithms", "Rothman University"],
        ),
        (TaskKind::Gym, [selector::GYM, "Strength", "Powerhouse Gym"]),
        (TaskKind::Recovery, [selector::RECOVERY, "", ""]),
        (TaskKind::Synchro, [selector::SYNCHRO, "", ""]),
    ]
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(catalog: &TaskCatalog, config: &HarnessConfig) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "catalog_has_crimes".into(),
        passed: !catalog.crimes.is_empty(),
        detail: format!("{} crimes loaded", catalog.crimes.len()),
    });

    let bad_time: Vec<_> = catalog
        .crimes
        .iter()
        .filter(|c| c.time_ms <= 0.0 || c.difficulty <= 0.0)
        .map(|c| c.id.as_str())
        .collect();
    results.push(TestResult {
        name: "catalog_crime_timing".into(),
        passed: bad_time.is_empty(),
        detail: if bad_time.is_empty() {
            "all crimes have positive time and difficulty".into()
        } else {
            format!("bad timing: {}", bad_time.join(", "))
        },
    });

    let negative: Vec<_> = catalog
        .task_rates
        .iter()
        .filter(|r| has_negative(&r.rates))
        .map(|r| format!("{:?}", r.kind))
        .chain(
            catalog
                .crimes
                .iter()
                .filter(|c| has_negative(&c.exp) || c.money < 0.0)
                .map(|c| c.id.clone()),
        )
        .collect();
    results.push(TestResult {
        name: "catalog_non_negative_rates".into(),
        passed: negative.is_empty(),
        detail: if negative.is_empty() {
            "all rates non-negative".into()
        } else {
            format!("negative rates: {}", negative.join(", "))
        },
    });

    let missing: Vec<_> = TaskKind::ALL
        .iter()
        .filter(|k| !matches!(k, TaskKind::Idle | TaskKind::Crime))
        .filter(|k| !catalog.task_rates.iter().any(|r| r.kind == **k))
        .map(|k| format!("{:?}", k))
        .collect();
    results.push(TestResult {
        name: "catalog_covers_continuous_tasks".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "every continuous task has rates".into()
        } else {
            format!("missing rates: {}", missing.join(", "))
        },
    });

    let errors = validate_config(&config.display);
    results.push(TestResult {
        name: "display_config_valid".into(),
        passed: errors.is_empty(),
        detail: format!("{:?}", errors),
    });

    results
}

fn has_negative(r: &GainRates) -> bool {
    [r.hack, r.str, r.def, r.dex, r.agi, r.cha, r.money]
        .iter()
        .any(|v| *v < 0.0)
}

// ── 2. Assignments ──────────────────────────────────────────────────────

fn validate_assignments(catalog: &TaskCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Assignments ---");
    let mut results = Vec::new();
    let mut roster = SleeveRoster::with_count(1);
    let Some(sleeve) = roster.get_mut(0) else {
        return results;
    };

    for (kind, slots) in sample_selections() {
        let mut renders = 0;
        let outcome = assign_from_selector(sleeve, slots, catalog, || renders += 1);
        let desc = describe_current_activity(sleeve, catalog);
        if verbose {
            println!("  {:?}: {}", kind, desc);
        }
        results.push(TestResult {
            name: format!("assign_{:?}", kind).to_lowercase(),
            passed: outcome == AssignOutcome::Assigned(kind)
                && sleeve.current_task() == kind
                && !desc.is_empty()
                && renders == 1,
            detail: format!("{:?} → {}", outcome, desc),
        });
    }

    let outcome = assign_from_selector(sleeve, ["Infiltrate", "", ""], catalog, || {});
    results.push(TestResult {
        name: "unrecognized_kind_fails_safe".into(),
        passed: matches!(outcome, AssignOutcome::Rejected(_)) && sleeve.task().is_idle(),
        detail: format!("{:?}, task now {:?}", outcome, sleeve.current_task()),
    });

    let outcome = assign_from_selector(sleeve, [selector::CRIME, "Heist", ""], catalog, || {});
    results.push(TestResult {
        name: "unknown_crime_fails_safe".into(),
        passed: matches!(outcome, AssignOutcome::Rejected(_)) && sleeve.task().is_idle(),
        detail: format!("{:?}", outcome),
    });

    results
}

// ── 3. Gain display ─────────────────────────────────────────────────────

fn validate_gain_display(
    catalog: &TaskCatalog,
    config: &HarnessConfig,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Gain Display ---");
    let mut results = Vec::new();
    let mut roster = SleeveRoster::with_count(1);
    let Some(sleeve) = roster.get_mut(0) else {
        return results;
    };
    let multiplier = config.display.display_multiplier;

    let idle_rows = compute_displayed_gains_with(sleeve, catalog, &config.display);
    results.push(TestResult {
        name: "idle_no_rows".into(),
        passed: idle_rows.is_empty(),
        detail: format!("{} rows", idle_rows.len()),
    });

    for (kind, slots) in sample_selections() {
        assign_from_selector(sleeve, slots, catalog, || {});
        let rows = compute_displayed_gains_with(sleeve, catalog, &config.display);
        if verbose {
            println!("  [{:?}]", kind);
            for row in &rows {
                println!("    {}", render_row(row));
            }
        }

        let has_rep = rows.iter().any(|r| r.kind == GainKind::Reputation);
        let rates = *sleeve.gain_rates();
        let passed = match kind {
            TaskKind::Crime => {
                !has_rep
                    && rows.iter().all(|r| r.qualifier != Qualifier::PerSecond)
                    && rows
                        .iter()
                        .all(|r| r.kind.rate_in(&rates) == Some(r.value))
            }
            _ => {
                has_rep == kind.earns_reputation()
                    && rows.iter().all(|r| match r.kind.rate_in(&rates) {
                        Some(rate) => (r.value - multiplier * rate).abs() < 1e-9,
                        None => true,
                    })
            }
        };
        results.push(TestResult {
            name: format!("gains_{:?}", kind).to_lowercase(),
            passed,
            detail: format!("{} rows, reputation={}", rows.len(), has_rep),
        });
    }

    results
}

// ── 4. Crime cycles ─────────────────────────────────────────────────────

fn validate_crime_cycles(
    catalog: &TaskCatalog,
    config: &HarnessConfig,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Crime Cycles ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut roster = SleeveRoster::default();
    for (i, crime) in ["Shoplift", "Mug", "Homicide"].into_iter().enumerate() {
        let level = 5.0 + 10.0 * i as f64;
        let mut sleeve = Sleeve::new(0).with_stats(SleeveStats {
            hacking: level,
            strength: level,
            defense: level,
            dexterity: level,
            agility: level,
            charisma: level,
        });
        assign_from_selector(&mut sleeve, [selector::CRIME, crime, ""], catalog, || {});
        roster.push(sleeve);
    }

    // Advance in 5-cycle steps, one second of game time each.
    const STEP: u32 = 5;
    let mut attempts = vec![0u32; roster.len()];
    let mut successes = vec![0u32; roster.len()];
    let mut progress_in_range = true;
    for _ in 0..(config.cycles / STEP) {
        for sleeve in roster.iter_mut() {
            let roll: f64 = rng.gen();
            if let Some(res) = process_cycles(sleeve, catalog, STEP, roll) {
                attempts[sleeve.index] += 1;
                if res.success {
                    successes[sleeve.index] += 1;
                }
            }
            if let Some(p) = crime_progress(sleeve) {
                progress_in_range &= (0.0..=1.0).contains(&p);
            }
        }
    }

    for sleeve in roster.iter() {
        let Some(crime) = sleeve.task().crime() else {
            continue;
        };
        let chance = catalog.crime_success_chance(crime, &sleeve.stats);
        let n = attempts[sleeve.index];
        let s = successes[sleeve.index];
        let observed = if n > 0 { s as f64 / n as f64 } else { 0.0 };
        if verbose {
            let bar = crime_progress(sleeve)
                .map(|p| progress_bar_text(p, config.display.progress_ticks))
                .unwrap_or_default();
            println!(
                "  {:<10} chance={:.3} observed={:.3} ({}/{}) {}",
                crime, chance, observed, s, n, bar
            );
        }
        // Loose bound: a binomial proportion within 0.15 of its mean.
        results.push(TestResult {
            name: format!("crime_rate_{}", crime.to_lowercase()),
            passed: n > 0 && (observed - chance).abs() < 0.15,
            detail: format!("chance {:.3}, observed {:.3} over {} attempts", chance, observed, n),
        });

        let earned = sleeve.earnings_for_task();
        let payout = sleeve.gain_rates().money;
        results.push(TestResult {
            name: format!("crime_earnings_{}", crime.to_lowercase()),
            passed: (earned.money - s as f64 * payout).abs() < 1e-6,
            detail: format!("earned ${:.0} from {} successes", earned.money, s),
        });
    }

    results.push(TestResult {
        name: "crime_progress_bounded".into(),
        passed: progress_in_range,
        detail: "progress stayed within [0, 1]".into(),
    });

    results
}

// ── 5. Roster ───────────────────────────────────────────────────────────

fn validate_roster(config: &HarnessConfig) -> Vec<TestResult> {
    println!("--- Roster ---");
    let mut results = Vec::new();
    let mut roster = SleeveRoster::with_count(6);
    for (i, sleeve) in roster.iter_mut().enumerate() {
        let v = ((i * 37) % 11) as f64;
        sleeve.stats = SleeveStats {
            hacking: v,
            strength: 10.0 - v,
            defense: v * 2.0,
            dexterity: v,
            agility: 1.0,
            charisma: v / 2.0,
        };
        sleeve.augmentations = (0..i % 3).map(|n| format!("Aug {}", n)).collect();
        sleeve.shock = if i % 2 == 0 { 100.0 } else { 40.0 };
    }

    for option in SortOption::ALL {
        let order = roster.sorted_indices(option);
        let sorted = order.windows(2).all(|w| {
            match (roster.get(w[0]), roster.get(w[1])) {
                (Some(a), Some(b)) => option.metric(a) <= option.metric(b),
                _ => false,
            }
        });
        results.push(TestResult {
            name: format!("sort_{:?}", option).to_lowercase(),
            passed: sorted && order.len() == roster.len(),
            detail: format!("{} → {:?}", option.label(), order),
        });
    }

    let manageable = roster.iter().filter(|s| can_manage_augmentations(s)).count();
    results.push(TestResult {
        name: "augmentation_gating".into(),
        passed: manageable == 3,
        detail: format!("{} of {} sleeves fully recovered", manageable, roster.len()),
    });

    let cost = config.display.travel_cost;
    results.push(TestResult {
        name: "travel_gating".into(),
        passed: can_travel(cost, &config.display) && !can_travel(cost - 1.0, &config.display),
        detail: format!("travel cost ${:.0}", cost),
    });

    results
}

// ── 6. Snapshots ────────────────────────────────────────────────────────
//
// The corrupt-tag check makes the library log at error level. That record is
// only shown with --verbose.

fn validate_snapshots(catalog: &TaskCatalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();
    let mut roster = SleeveRoster::with_count(1);
    let Some(sleeve) = roster.get_mut(0) else {
        return results;
    };

    for (kind, slots) in sample_selections() {
        assign_from_selector(sleeve, slots, catalog, || {});
        let round_trip = serde_json::to_string(&sleeve.to_snapshot())
            .and_then(|json| serde_json::from_str::<SleeveSnapshot>(&json));
        let passed = match round_trip {
            Ok(snap) => snap.restore().task() == sleeve.task(),
            Err(_) => false,
        };
        results.push(TestResult {
            name: format!("snapshot_{:?}", kind).to_lowercase(),
            passed,
            detail: "task survives save round trip".into(),
        });
    }

    let corrupt = SleeveSnapshot {
        current_task: "Bladeburner".into(),
        current_task_location: "Sector-12".into(),
        ..SleeveSnapshot::default()
    };
    let level = log::max_level();
    if !verbose {
        log::set_max_level(log::LevelFilter::Off);
    }
    let restored = corrupt.restore();
    log::set_max_level(level);
    results.push(TestResult {
        name: "snapshot_unknown_task_restores_idle".into(),
        passed: restored.task().is_idle(),
        detail: "corrupt task tag falls back to idle".into(),
    });

    results
}
