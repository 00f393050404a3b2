//! Replays fixed insert workloads against every probing policy and records
//! how the collision counters evolve.
//!
//! Writes `hash_stats.csv` and `insert_collisions.png` into the output
//! directory.

#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use plotters::prelude::*;
use probe_table::{
    DefaultHash, DoubleHashing, HashFunction, Linear, OpenTable, ProbeStats, ProbingPolicy,
    Quadratic,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const CSV_NAME: &str = "hash_stats.csv";
const PLOT_NAME: &str = "insert_collisions.png";
const CSV_HEADER: &str =
    "key_type,probing,inserted,insert_collisions,rehash_count,rehash_collisions";

const STRING_KEYS: usize = 2000;
const STRING_SAMPLE_EVERY: usize = 20;
const INT_KEY_LIMIT: usize = 5000;
const INT_KEY_STEP: usize = 10;
const INT_SAMPLE_EVERY: usize = 100;

const POLICIES: [&str; 3] = ["linear", "double", "quadratic"];

#[derive(Parser, Debug)]
#[command(about = "Collect collision statistics for every probing policy")]
struct Args {
    /// Directory receiving the CSV and the plot
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,
    /// Number of random u64 keys to insert, 0 skips the random workload
    #[arg(short = 'r', long = "random-keys", default_value_t = 5000)]
    random_keys: usize,
    /// Seed for the random workload
    #[arg(short = 's', long = "seed", default_value_t = 42)]
    seed: u64,
}

/// One CSV row: the counters of a table after `inserted` keys
#[derive(Debug, Clone, Copy)]
struct Sample {
    key_type: &'static str,
    probing: &'static str,
    inserted: usize,
    stats: ProbeStats,
}

/// Inserts `keys` in order into a fresh table using policy `P`, sampling the
/// counters whenever the label is a multiple of `sample_every`
fn run_workload<K, P>(
    key_type: &'static str,
    probing: &'static str,
    keys: &[(usize, K)],
    sample_every: usize,
) -> Vec<Sample>
where
    K: Clone + PartialEq,
    DefaultHash: HashFunction<K>,
    P: ProbingPolicy + Default,
{
    let mut table: OpenTable<K, usize, DefaultHash, P> = OpenTable::default();
    let mut samples = Vec::new();
    for (label, key) in keys {
        table.insert(key.clone(), *label);
        if label % sample_every == 0 {
            samples.push(Sample { key_type, probing, inserted: *label, stats: table.stats() });
        }
    }
    samples
}

/// Runs one key workload under every probing policy
fn run_all_policies<K>(
    key_type: &'static str,
    keys: &[(usize, K)],
    sample_every: usize,
) -> Vec<Sample>
where
    K: Clone + PartialEq,
    DefaultHash: HashFunction<K>,
{
    let mut samples = run_workload::<K, Linear>(key_type, POLICIES[0], keys, sample_every);
    samples.extend(run_workload::<K, DoubleHashing>(key_type, POLICIES[1], keys, sample_every));
    samples.extend(run_workload::<K, Quadratic>(key_type, POLICIES[2], keys, sample_every));
    samples
}

fn write_csv(path: &Path, samples: &[Sample]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{CSV_HEADER}")?;
    for sample in samples {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            sample.key_type,
            sample.probing,
            sample.inserted,
            sample.stats.insert_collisions,
            sample.stats.rehash_count,
            sample.stats.rehash_collisions
        )?;
    }
    file.flush()
}

/// Draws one panel per key type with a line per probing policy
fn plot_insert_collisions(
    path: &Path,
    key_types: &[&'static str],
    samples: &[Sample],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // red
        RGBColor(50, 90, 220),  // blue
        RGBColor(50, 180, 50),  // green
    ];
    let line_width = 2;
    let text_size = 16;
    let title_size = 28;

    let height = 400 * u32::try_from(key_types.len())?;
    let root = BitMapBackend::new(path, (1200, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((key_types.len(), 1));

    for (area, &key_type) in areas.iter().zip(key_types) {
        let panel: Vec<&Sample> = samples.iter().filter(|s| s.key_type == key_type).collect();
        let max_inserted = panel.iter().map(|s| s.inserted).max().unwrap_or(0).max(1);
        let max_collisions =
            panel.iter().map(|s| s.stats.insert_collisions).max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(area)
            .caption(format!("Insert collisions, {key_type} keys"), (font_family, title_size))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0..max_inserted, 0..max_collisions)?;

        chart
            .configure_mesh()
            .x_desc("Keys inserted")
            .y_desc("Insert collisions")
            .axis_desc_style((font_family, text_size))
            .draw()?;

        for (policy_idx, &probing) in POLICIES.iter().enumerate() {
            let color = &colors[policy_idx % colors.len()];
            let line_style = ShapeStyle::from(color).stroke_width(line_width);

            chart
                .draw_series(LineSeries::new(
                    panel
                        .iter()
                        .filter(|s| s.probing == probing)
                        .map(|s| (s.inserted, s.stats.insert_collisions)),
                    line_style,
                ))?
                .label(probing)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    fs::create_dir_all(&args.output_dir)?;

    let string_keys: Vec<(usize, String)> =
        (0..STRING_KEYS).map(|i| (i, format!("key_{i}"))).collect();
    let int_keys: Vec<(usize, i32)> = (0..INT_KEY_LIMIT)
        .step_by(INT_KEY_STEP)
        .map(|i| i32::try_from(i).map(|key| (i, key)))
        .collect::<Result<_, _>>()?;

    let mut key_types = vec!["string", "int"];
    println!("Inserting {} string keys", string_keys.len());
    let mut samples = run_all_policies("string", &string_keys, STRING_SAMPLE_EVERY);
    println!("Inserting {} int keys", int_keys.len());
    samples.extend(run_all_policies("int", &int_keys, INT_SAMPLE_EVERY));

    if args.random_keys > 0 {
        println!("Inserting {} random u64 keys with seed {}", args.random_keys, args.seed);
        let mut rng = StdRng::seed_from_u64(args.seed);
        let random_keys: Vec<(usize, u64)> =
            (0..args.random_keys).map(|i| (i, rng.random::<u64>())).collect();
        samples.extend(run_all_policies("random", &random_keys, INT_SAMPLE_EVERY));
        key_types.push("random");
    }

    for &key_type in &key_types {
        for probing in POLICIES {
            if let Some(last) =
                samples.iter().rev().find(|s| s.key_type == key_type && s.probing == probing)
            {
                println!(
                    "  {key_type}/{probing}: insert collisions = {}, rehashes = {}, rehash collisions = {}",
                    last.stats.insert_collisions,
                    last.stats.rehash_count,
                    last.stats.rehash_collisions
                );
            }
        }
    }

    let csv_path = args.output_dir.join(CSV_NAME);
    write_csv(&csv_path, &samples)?;
    println!("Statistics saved to {}", csv_path.display());

    let plot_path = args.output_dir.join(PLOT_NAME);
    plot_insert_collisions(&plot_path, &key_types, &samples)?;
    println!("Generated plot image: {}", plot_path.display());

    Ok(())
}
