//! Prints the canonical ranking and AUC examples for manual verification.
//!
//! Build with `--features demo`. Set `RUST_LOG=debug` to see the per-computation tracing events.

use tiedrank_core::{Result, Summarizable};
use tiedrank_stats::{
    auc, auc_sorted, auc_stream, auc_stream_with, rank, rank_stream, tie_runs, AucAccumulator,
    StreamOptions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCORES: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 3.0, 5.0];
const ACTUAL: [i32; 6] = [0, 0, 1, 1, 0, 1];
const POSTERIOR: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 5.0, 6.0];

const SIGNED_SCORES: [f64; 10] = [
    0.488540, 0.588689, 0.311658, 0.379008, 0.224716, 0.522872, 0.530129, 0.446732, 0.700344,
    0.304563,
];
const SIGNED_LABELS: [i32; 10] = [1, -1, -1, -1, 1, -1, -1, -1, 1, -1];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        tracing::error!(error = %err, "demo failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("rank          {:?}", rank(&SCORES));
    println!("rank_stream   {:?}", rank_stream(SCORES).collect::<Vec<_>>());
    for run in tie_runs(&SCORES).iter().filter(|r| r.is_tied()) {
        info!(value = run.value, len = run.len, rank = run.rank(), "tie run");
    }

    println!("auc           {:.12}", auc(&ACTUAL, &POSTERIOR)?);
    let pairs: Vec<(i32, f64)> = ACTUAL.iter().copied().zip(POSTERIOR).collect();
    println!("auc_stream    {:.12}", auc_stream(&pairs)?);
    println!("auc_sorted    {:.12}", auc_sorted(ACTUAL, POSTERIOR)?);

    let mut signed: Vec<(i32, f64)> = SIGNED_LABELS.iter().copied().zip(SIGNED_SCORES).collect();
    signed.sort_by(|a, b| a.1.total_cmp(&b.1));
    println!("auc {{-1,1}}    {:.11}", auc(&SIGNED_LABELS, &SIGNED_SCORES)?);
    let checked = StreamOptions::new().with_verify_sorted(true);
    println!("auc_stream    {:.11}", auc_stream_with(&signed, &checked)?);

    let mut acc = AucAccumulator::new();
    for ((label, _), r) in signed.iter().zip(rank_stream(signed.iter().map(|p| p.1))) {
        acc.observe(label, r);
    }
    println!("accumulator   {}", acc.summary());

    match auc(&[1, 1, 1], &[0.2, 0.4, 0.6]) {
        Ok(value) => println!("single class  {value}"),
        Err(err) => println!("single class  {err}"),
    }
    Ok(())
}
