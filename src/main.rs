use anyhow::{bail, Result};
use std::env;

use fertility_dashboard::{
    range_report, report, DashboardPipeline, SourcePaths, MODEL_COMPARISON,
    REPLACEMENT_LEVEL_TFR,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args[1..].iter().filter(|a| *a != "--json").collect();

    if positional.len() != 3 && positional.len() != 5 {
        bail!(
            "Usage: fertility-dashboard <tfr.csv> <births.csv> <hdb.csv> [lo hi] [--json]"
        );
    }

    let sources = SourcePaths::new(positional[0], positional[1], positional[2]);
    let mut pipeline = DashboardPipeline::new(sources);

    let snapshot = match pipeline.snapshot() {
        Ok(s) => s,
        Err(e) => bail!("{}", e),
    };

    // Default range = the full anchor horizon
    let (lo, hi) = if positional.len() == 5 {
        (positional[3].parse()?, positional[4].parse()?)
    } else {
        snapshot.year_bounds()
    };

    let range = range_report(snapshot, lo, hi);

    if json_mode {
        println!("{}", range.to_json()?);
        return Ok(());
    }

    println!("📊 Fertility Dashboard");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {}", snapshot.summary());
    for warning in &snapshot.warnings {
        println!("⚠️  {}", warning);
    }

    println!("\n📈 Headline metrics for [{}-{}]", lo, hi);
    match &range.metrics {
        Some(m) => {
            print_metric(
                "Latest TFR",
                report::fmt_tfr(m.tfr.latest),
                report::fmt_tfr_delta(m.tfr.delta),
            );
            print_metric(
                "Latest resident births",
                report::fmt_births(m.births.latest),
                report::fmt_births_delta(m.births.delta),
            );
            print_metric(
                "Latest HDB resale index",
                report::fmt_index(m.housing.latest),
                report::fmt_index_delta(m.housing.delta),
            );
            if let Some(tfr) = m.tfr.latest {
                if tfr < REPLACEMENT_LEVEL_TFR {
                    println!(
                        "  (below replacement level {:.1})",
                        REPLACEMENT_LEVEL_TFR
                    );
                }
            }
        }
        None => println!("  No rows in the selected range"),
    }

    println!("\n🔍 Housing vs fertility");
    match range.correlation {
        Some(r) => println!("  Correlation in selected range: r = {:.3}", r),
        None => println!("  Not enough data in the selected range."),
    }

    println!("\n👶 Births by birth order: {} row(s) in range", range.breakdown.len());

    println!("\n🧮 Model comparison (precomputed)");
    for score in &MODEL_COMPARISON {
        println!(
            "  {:<34} MAE {:.4}  RMSE {:.4}  R² {:+.4}",
            score.model, score.mae, score.rmse, score.r_squared
        );
    }

    Ok(())
}

fn print_metric(label: &str, value: String, delta: Option<String>) {
    match delta {
        Some(d) => println!("  {:<26} {}  ({})", label, value, d),
        None => println!("  {:<26} {}", label, value),
    }
}
