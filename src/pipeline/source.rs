use std::{
    io::BufRead,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossbeam_channel::{Sender, TrySendError};
use serde::Deserialize;

use super::Delivery;
use crate::types::{HandPosition, Handedness, Landmark, LandmarkFrame};

#[derive(Debug, Deserialize)]
struct WireFrame {
    /// Milliseconds since the start of the recording.
    #[serde(default)]
    t_ms: Option<u64>,
    #[serde(default)]
    hands: Vec<WireHand>,
}

#[derive(Debug, Deserialize)]
struct WireHand {
    handedness: String,
    landmarks: Vec<WireLandmark>,
}

// Trackers emit null for coordinates they lost.
#[derive(Debug, Deserialize)]
struct WireLandmark {
    x: Option<f32>,
    y: Option<f32>,
    #[serde(default)]
    z: Option<f32>,
}

impl From<WireLandmark> for Landmark {
    fn from(wire: WireLandmark) -> Self {
        Landmark {
            x: wire.x.unwrap_or(f32::NAN),
            y: wire.y.unwrap_or(f32::NAN),
            z: wire.z.unwrap_or(0.0),
        }
    }
}

fn parse_handedness(label: &str) -> Option<Handedness> {
    match label.trim().to_ascii_lowercase().as_str() {
        "left" | "l" => Some(Handedness::Left),
        "right" | "r" => Some(Handedness::Right),
        _ => None,
    }
}

/// Parses one JSON line into a frame. Frames without `t_ms` are stamped with
/// the current time.
pub fn parse_frame(line: &str, origin: Instant) -> Result<LandmarkFrame> {
    let wire: WireFrame = serde_json::from_str(line).context("invalid landmark frame")?;

    let hands = wire
        .hands
        .into_iter()
        .filter_map(|hand| match parse_handedness(&hand.handedness) {
            Some(handedness) => Some(HandPosition {
                landmarks: hand.landmarks.into_iter().map(Landmark::from).collect(),
                handedness,
            }),
            None => {
                log::warn!("dropping hand with unknown handedness {:?}", hand.handedness);
                None
            }
        })
        .collect();

    let timestamp = match wire.t_ms {
        Some(ms) => origin + Duration::from_millis(ms),
        None => Instant::now(),
    };

    Ok(LandmarkFrame { hands, timestamp })
}

/// Reads JSON-lines landmark frames on a background thread until the input
/// ends or the receiver goes away. The thread returns how many frames it
/// handed to the channel, including ones dropped in `LatestOnly` mode.
pub fn start_landmark_reader<R>(
    reader: R,
    delivery: Delivery,
    frame_tx: Sender<LandmarkFrame>,
) -> thread::JoinHandle<usize>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let origin = Instant::now();
        let mut frames = 0;

        for (line_no, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("failed to read landmark input: {err:?}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let frame = match parse_frame(&line, origin) {
                Ok(frame) => frame,
                Err(err) => {
                    log::warn!("skipping line {}: {err:#}", line_no + 1);
                    continue;
                }
            };

            let sent = match delivery {
                Delivery::Sequential => frame_tx.send(frame).is_ok(),
                // Drop if the worker is busy, like a live camera feed.
                Delivery::LatestOnly => !matches!(
                    frame_tx.try_send(frame),
                    Err(TrySendError::Disconnected(_))
                ),
            };
            if !sent {
                log::info!("recognizer closed, stopping landmark reader");
                break;
            }
            frames += 1;
        }

        frames
    })
}
