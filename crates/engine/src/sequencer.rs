// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dice roll sequencer
//!
//! Every roller gets a lane: a task that walks queued rolls through the
//! reveal stages one at a time, at the configured cadence. Lanes are
//! independent, so two players' reveals overlap freely, but within one
//! lane the queue is strict FIFO and stages never interleave.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;
use tb_adapters::RevealSink;
use tb_core::dice::collapse;
use tb_core::{DiceResult, ParticipantId, RevealStage, RevealTiming, RollEntry};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::sleep;

/// Queues dice rolls and reveals them on each roller's portrait
pub struct DiceSequencer<K> {
    sink: K,
    timing: RevealTiming,
    lanes: Mutex<HashMap<ParticipantId, mpsc::UnboundedSender<RollEntry>>>,
}

impl<K: RevealSink> DiceSequencer<K> {
    pub fn new(sink: K, timing: RevealTiming) -> Self {
        Self {
            sink,
            timing,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Queue a submission on the roller's lane, spawning it on first use
    ///
    /// An aggregate submission folds every die into one synthetic total;
    /// otherwise each die queues as its own reveal, in order.
    pub fn submit(&self, viewer: ParticipantId, results: Vec<DiceResult>, aggregate: bool) {
        let entries = collapse(results, aggregate);
        if entries.is_empty() {
            return;
        }
        tracing::debug!(%viewer, entries = entries.len(), "dice submission queued");

        let mut lanes = self.lanes.lock().unwrap_or_else(|e| e.into_inner());
        let sender = match lanes.entry(viewer) {
            Entry::Occupied(mut slot) => {
                // A closed sender means the lane task is gone; replace it
                if slot.get().is_closed() {
                    slot.insert(self.spawn_lane(viewer));
                }
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(self.spawn_lane(viewer)),
        };
        for entry in entries {
            let _ = sender.send(entry);
        }
    }

    /// Drop a roller's lane
    ///
    /// Rolls already queued still reveal; the lane exits once drained.
    /// A later submission starts a fresh lane.
    pub fn detach(&self, viewer: ParticipantId) -> bool {
        let removed = self
            .lanes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&viewer)
            .is_some();
        if removed {
            tracing::debug!(%viewer, "reveal lane detached");
        }
        removed
    }

    /// Number of lanes currently attached
    pub fn lane_count(&self) -> usize {
        self.lanes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn spawn_lane(&self, viewer: ParticipantId) -> mpsc::UnboundedSender<RollEntry> {
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::debug!(%viewer, "reveal lane opened");
        tokio::spawn(run_lane(viewer, self.timing.clone(), self.sink.clone(), rx));
        tx
    }
}

async fn run_lane<K: RevealSink>(
    viewer: ParticipantId,
    timing: RevealTiming,
    sink: K,
    mut queue: mpsc::UnboundedReceiver<RollEntry>,
) {
    let mut next = queue.recv().await;
    while let Some(entry) = next {
        reveal_one(viewer, &timing, &sink, entry).await;
        sleep(timing.settle).await;

        next = match queue.try_recv() {
            Ok(entry) => Some(entry),
            // Drained: park the portrait until the next roll arrives
            Err(TryRecvError::Empty) => {
                present(&sink, viewer, RevealStage::Idle).await;
                queue.recv().await
            }
            // Detached and drained
            Err(TryRecvError::Disconnected) => None,
        };
    }
    tracing::debug!(%viewer, "reveal lane closed");
}

async fn reveal_one<K: RevealSink>(
    viewer: ParticipantId,
    timing: &RevealTiming,
    sink: &K,
    entry: RollEntry,
) {
    present(sink, viewer, RevealStage::Rolling).await;
    sleep(timing.pre_roll).await;
    present(
        sink,
        viewer,
        RevealStage::Value {
            value: entry.result.value,
        },
    )
    .await;
    if let Some(text) = entry.result.description {
        sleep(timing.description_delay).await;
        present(sink, viewer, RevealStage::Description { text }).await;
    }
    sleep(timing.display).await;
    present(sink, viewer, RevealStage::Cleared).await;
    sleep(timing.clear_gap).await;
}

/// A lost stage degrades the presentation, never the queue
async fn present<K: RevealSink>(sink: &K, viewer: ParticipantId, stage: RevealStage) {
    if let Err(error) = sink.show(viewer, stage).await {
        tracing::warn!(%viewer, %error, "reveal surface dropped a stage");
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod tests;
