use std::error::Error;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::info;

use wigcov::{parse_file, CoverageSegment, Strand};

#[derive(Parser)]
#[command(
    name = "wigcov",
    about = "Strand-split per-base coverage from wiggle tracks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print track metadata and the declared extent of each chromosome.
    Info {
        /// the track to inspect (plain or gzipped)
        track: String,
    },
    /// Print the coverage over one range as two tab-separated rows.
    Query {
        /// the track to query (plain or gzipped)
        track: String,

        /// chromosome to query
        #[arg(long)]
        chrom: String,

        /// 1-based inclusive start of the window
        #[arg(long)]
        start: u32,

        /// 1-based inclusive end of the window
        #[arg(long)]
        end: u32,
    },
    /// Print every covered position with non-zero depth as
    /// `chrom  strand  pos  value` lines.
    Dump {
        /// the track to dump (plain or gzipped)
        track: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    match Cli::parse().command {
        Commands::Info { track } => print_info(&track),
        Commands::Query {
            track,
            chrom,
            start,
            end,
        } => query(&track, &chrom, start, end),
        Commands::Dump { track } => dump(&track),
    }
}

fn strand_label(strand: Strand) -> &'static str {
    match strand {
        Strand::Forward => "+",
        Strand::Reverse => "-",
    }
}

fn print_info(track: &str) -> Result<(), Box<dyn Error>> {
    let genome = parse_file(track)?;
    for (key, value) in genome.metadata().iter().sorted() {
        println!("{}={}", key, value);
    }
    for chrom in genome.chromosomes().sorted_by_key(|c| c.name().to_owned()) {
        for strand in [Strand::Forward, Strand::Reverse] {
            let segments = chrom.segments(strand);
            if segments.is_empty() {
                continue;
            }
            let joined = CoverageSegment::join(segments, 0.0)?;
            println!(
                "{}\t{}\t{}-{}",
                chrom.name(),
                strand_label(strand),
                joined.start(),
                joined.stop()
            );
        }
    }
    Ok(())
}

fn query(track: &str, chrom: &str, start: u32, end: u32) -> Result<(), Box<dyn Error>> {
    if end < start {
        return Err(format!("--end ({}) is before --start ({})", end, start).into());
    }
    let genome = parse_file(track)?;
    info!("parsed {} chromosomes from {}", genome.len(), track);
    let chrom = genome
        .get(chrom)
        .ok_or_else(|| format!("no chromosome named '{}' in {}", chrom, track))?;
    let (forward, reverse) = chrom.get_coverage(start, end);
    println!("+\t{}", forward.iter().join("\t"));
    println!("-\t{}", reverse.iter().join("\t"));
    Ok(())
}

fn dump(track: &str) -> Result<(), Box<dyn Error>> {
    let genome = parse_file(track)?;
    for chrom in genome.chromosomes().sorted_by_key(|c| c.name().to_owned()) {
        for strand in [Strand::Forward, Strand::Reverse] {
            let segments = chrom.segments(strand);
            if segments.is_empty() {
                continue;
            }
            let joined = CoverageSegment::join(segments, 0.0)?;
            for (i, &value) in joined.values().iter().enumerate() {
                if value != 0.0 {
                    println!(
                        "{}\t{}\t{}\t{}",
                        chrom.name(),
                        strand_label(strand),
                        joined.start() + i as u32,
                        value
                    );
                }
            }
        }
    }
    Ok(())
}
