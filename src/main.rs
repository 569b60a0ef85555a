use anyhow::{bail, Result};
use std::env;

use resale_estimator::{estimate, Dataset, Estimation, Query};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage(&args);
        std::process::exit(1);
    }

    let data_path = &args[1];
    match args[2].as_str() {
        "estimate" => run_estimate(data_path, &args[3..]),
        "summary" => run_summary(data_path),
        mode => {
            eprintln!("Unknown mode: {}", mode);
            print_usage(&args);
            std::process::exit(1);
        }
    }
}

fn print_usage(args: &[String]) {
    let program = args.first().map(String::as_str).unwrap_or("resale-estimator");
    eprintln!("Usage:");
    eprintln!("  {} <data.gz> estimate <street> <block> <flat_type> <floor>", program);
    eprintln!("  {} <data.gz> summary", program);
}

fn run_estimate(data_path: &str, args: &[String]) -> Result<()> {
    if args.len() != 4 {
        bail!("estimate mode needs <street> <block> <flat_type> <floor>");
    }
    let floor_number: i32 = args[3]
        .parse()
        .map_err(|_| anyhow::anyhow!("floor must be an integer, got {:?}", args[3]))?;

    println!("🏠 Resale Price Estimator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let dataset = Dataset::load(data_path)?;
    println!("✓ Loaded {} transactions", dataset.len());

    let query = Query::new(&args[0], &args[1], &args[2], floor_number);
    println!(
        "\n🔍 {} blk {} / {} / floor {} ({})\n",
        query.street_name.to_uppercase(),
        query.block.to_uppercase(),
        query.flat_type.to_uppercase(),
        query.floor_number,
        query.floor_band(),
    );

    match estimate(&dataset, &query) {
        Estimation::Estimate(summary) => {
            println!("Estimated price range: {}", summary.price_range_text);

            println!("\nMost recent transactions:");
            for txn in &summary.recent_transactions {
                println!(
                    "  {:<12} {:<10} {}",
                    txn.date, txn.storey_range, txn.price_text
                );
            }

            match summary.average_psf {
                Some(psf) => println!("\nAverage PSF: SGD {:.2}", psf),
                None => println!("\nAverage PSF: n/a (no usable floor areas)"),
            }
            println!(
                "Average price on {}: SGD {}",
                query.street_name.to_uppercase(),
                resale_estimator::format_thousands(summary.average_street_price as i64),
            );
        }
        outcome => println!("{}", outcome.message()),
    }

    Ok(())
}

fn run_summary(data_path: &str) -> Result<()> {
    let dataset = Dataset::load(data_path)?;

    println!("✓ Loaded {} transactions", dataset.len());
    println!("✓ Streets: {}", dataset.streets().len());

    Ok(())
}
