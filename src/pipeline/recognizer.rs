use std::thread;

use crossbeam_channel::{Receiver, Sender};

use super::Delivery;
use crate::{
    seal::SealClassifier,
    types::{LandmarkFrame, RecognizedFrame},
};

fn run_worker_loop(
    delivery: Delivery,
    frame_rx: Receiver<LandmarkFrame>,
    result_tx: Sender<RecognizedFrame>,
) {
    let mut classifier = SealClassifier::new();
    let mut frames = 0usize;

    while let Some(frame) = next_frame(delivery, &frame_rx) {
        let result = classifier.classify(&frame.hands);
        frames += 1;

        if let Some(seal) = result.seal {
            log::debug!(
                "frame {frames}: {} at {:.2}",
                seal.display_name(),
                result.confidence
            );
        }

        let recognized = RecognizedFrame {
            timestamp: frame.timestamp,
            result,
        };
        if result_tx.send(recognized).is_err() {
            break;
        }
    }

    log::info!("seal recognizer stopped after {frames} frames");
}

fn next_frame(delivery: Delivery, frame_rx: &Receiver<LandmarkFrame>) -> Option<LandmarkFrame> {
    match delivery {
        Delivery::Sequential => frame_rx.recv().ok(),
        Delivery::LatestOnly => recv_latest_frame(frame_rx),
    }
}

fn recv_latest_frame(frame_rx: &Receiver<LandmarkFrame>) -> Option<LandmarkFrame> {
    let mut frame = frame_rx.recv().ok()?;
    while let Ok(newer) = frame_rx.try_recv() {
        frame = newer;
    }
    Some(frame)
}

/// Classifies frames on a dedicated thread. Frames are handled one at a time
/// so each sees the memory of the frame before it.
pub fn start_recognizer(
    delivery: Delivery,
    frame_rx: Receiver<LandmarkFrame>,
    result_tx: Sender<RecognizedFrame>,
) -> thread::JoinHandle<()> {
    log::info!("starting seal recognizer ({delivery:?} delivery)");
    thread::spawn(move || run_worker_loop(delivery, frame_rx, result_tx))
}
