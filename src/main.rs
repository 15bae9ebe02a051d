use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossbeam_channel::bounded;
use seal_universe::{
    Seal,
    jutsu::{self, Jutsu},
    pipeline::{ConfirmConfig, Delivery, SealSequence, start_landmark_reader, start_recognizer},
};

#[derive(Debug, Parser)]
#[command(name = "seal-universe")]
#[command(about = "Replay hand landmark recordings and print the confirmed seals")]
struct Cli {
    /// Keep only the newest frame when classification falls behind
    #[arg(long)]
    live: bool,

    /// How long a seal must be held before it is confirmed
    #[arg(long, default_value_t = 1_000)]
    hold_ms: u64,

    /// Lowest detection confidence that counts towards a hold
    #[arg(long, default_value_t = 0.8, value_parser = parse_confidence)]
    min_confidence: f32,

    /// Jutsu to practise; progress towards it is reported per seal
    #[arg(long, value_parser = parse_jutsu)]
    target: Option<&'static Jutsu>,

    /// JSON-lines landmark recording (stdin when omitted)
    input: Option<PathBuf>,
}

fn parse_confidence(value: &str) -> Result<f32, String> {
    let confidence: f32 = value.parse().map_err(|err| format!("{err}"))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(format!("must be within [0, 1], got {confidence}"));
    }
    Ok(confidence)
}

fn parse_jutsu(value: &str) -> Result<&'static Jutsu, String> {
    jutsu::by_name(value).ok_or_else(|| format!("unknown jutsu {value:?}"))
}

impl Cli {
    fn delivery(&self) -> Delivery {
        if self.live {
            Delivery::LatestOnly
        } else {
            Delivery::Sequential
        }
    }

    fn confirm_config(&self) -> ConfirmConfig {
        ConfirmConfig {
            hold: Duration::from_millis(self.hold_ms),
            min_confidence: self.min_confidence,
        }
    }

    fn open_input(&self) -> Result<Box<dyn BufRead + Send>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = cli.open_input()?;
    let delivery = cli.delivery();

    let (frame_tx, frame_rx) = bounded(1);
    let (result_tx, result_rx) = bounded(1);

    let reader = start_landmark_reader(input, delivery, frame_tx);
    let recognizer = start_recognizer(delivery, frame_rx, result_tx);

    if let Some(target) = cli.target {
        println!("target: {} ({})", target.name, seal_names(target.seals));
    }

    let mut sequence = SealSequence::new(cli.confirm_config());
    for recognized in result_rx {
        let Some(seal) = sequence.update(&recognized.result, recognized.timestamp) else {
            continue;
        };

        println!(
            "{:>2}. {}",
            sequence.seals().len(),
            recognized.result.display_text()
        );
        for completed in jutsu::completed_by(sequence.seals()) {
            println!("    => {}", completed.name);
        }

        if let Some(target) = cli.target {
            println!("    {}", target_progress(target, sequence.seals()));
        }

        let next: Vec<_> = jutsu::candidates(sequence.seals())
            .iter()
            .map(|jutsu| jutsu.name)
            .collect();
        if next.is_empty() {
            let fresh: Vec<_> = jutsu::containing(seal)
                .iter()
                .map(|jutsu| jutsu.name)
                .collect();
            log::debug!(
                "no jutsu continues the sequence; {} appears in {fresh:?}",
                seal.display_name()
            );
        } else {
            log::debug!("after {}: reachable jutsu {next:?}", seal.display_name());
        }
    }

    let frames = reader
        .join()
        .map_err(|_| anyhow!("landmark reader panicked"))?;
    recognizer
        .join()
        .map_err(|_| anyhow!("seal recognizer panicked"))?;
    log::info!("processed {frames} landmark frames");

    Ok(())
}

fn seal_names(seals: &[Seal]) -> String {
    seals
        .iter()
        .map(|seal| seal.display_name())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// How many of the target's seals the tail of `sequence` has already made.
fn target_progress(target: &Jutsu, sequence: &[Seal]) -> String {
    let done = (1..=target.seals.len().min(sequence.len()))
        .rev()
        .find(|&n| sequence.ends_with(&target.seals[..n]))
        .unwrap_or(0);
    if done == target.seals.len() {
        format!("{} complete", target.name)
    } else {
        format!("{}: {done}/{}", target.name, target.seals.len())
    }
}
