//! Shared helpers for board specs
//!
//! Specs assemble a real board over the in-memory adapters and observe
//! it the way clients do: through the event stream a join hands back.

use tb_adapters::FakeRevealSink;
use tb_core::{BoardConfig, FakeClock, RevealTiming, SequentialIdGen, TradeConfig};
use tb_engine::{BoardDeps, BusRevealSink};
use tokio::time::timeout;

pub use std::sync::Arc;
pub use std::time::Duration;
pub use tb_adapters::{MemoryOwnershipStore, OwnershipStore, RevealSink, StaticDirectory, Transfer};
pub use tb_core::{
    Ammo, DiceResult, ObjectId, ObjectKind, OwnedObject, ParticipantId, ResolveReason, RevealStage,
    RoomId, TableEvent, TradeError, TradeProposal, TradeStatus,
};
pub use tb_engine::{Board, EngineError, EventReceiver};

pub const ALICE: ParticipantId = ParticipantId(1);
pub const BOB: ParticipantId = ParticipantId(2);
pub const CAROL: ParticipantId = ParticipantId(3);

pub type SpecBoard =
    Board<MemoryOwnershipStore, StaticDirectory, FakeRevealSink, FakeClock, SequentialIdGen>;
pub type BusBoard =
    Board<MemoryOwnershipStore, StaticDirectory, BusRevealSink, FakeClock, SequentialIdGen>;

/// One assembled table, its collaborators exposed for assertions
pub struct Table {
    pub board: Arc<SpecBoard>,
    pub store: MemoryOwnershipStore,
    pub clock: FakeClock,
}

impl Table {
    /// Board with Alice's and Bob's gear seeded and quick reveal timing
    pub fn setup() -> Self {
        let store = seeded_store();
        let clock = FakeClock::new();
        let board = Board::with_reveal(
            BoardDeps {
                store: store.clone(),
                directory: directory(),
            },
            FakeRevealSink::new(),
            config(),
            clock.clone(),
            SequentialIdGen::new("tr"),
        );
        Self {
            board: Arc::new(board),
            store,
            clock,
        }
    }

    /// Seat a participant at the default table
    pub async fn seat(&self, participant: ParticipantId) -> EventReceiver {
        seat_at(&self.board, "table-1", participant).await
    }
}

/// Board whose dice reveals fan out as bus events
pub fn bus_board() -> Arc<BusBoard> {
    let board = Board::new(
        BoardDeps {
            store: seeded_store(),
            directory: directory(),
        },
        config(),
        FakeClock::new(),
        SequentialIdGen::new("tr"),
    );
    Arc::new(board)
}

pub async fn seat_at<K: RevealSink>(
    board: &Board<MemoryOwnershipStore, StaticDirectory, K, FakeClock, SequentialIdGen>,
    room_name: &str,
    participant: ParticipantId,
) -> EventReceiver {
    board
        .join(RoomId::from(room_name), participant)
        .await
        .unwrap()
}

pub fn sword(owner: ParticipantId) -> OwnedObject {
    OwnedObject::new(10u64, ObjectKind::Weapon, "Longsword", owner)
}

pub fn hammer(owner: ParticipantId) -> OwnedObject {
    OwnedObject::new(20u64, ObjectKind::Weapon, "Warhammer", owner)
}

pub fn flintlock(owner: ParticipantId) -> OwnedObject {
    OwnedObject::new(40u64, ObjectKind::Weapon, "Flintlock", owner).with_ammo(Ammo::full(12))
}

/// Alice offers her sword for Bob's hammer
pub fn swap() -> TradeProposal {
    TradeProposal {
        kind: ObjectKind::Weapon,
        sender: ALICE,
        receiver: BOB,
        offered: ObjectId(10),
        requested: Some(ObjectId(20)),
    }
}

/// Alice gives her sword away
pub fn gift() -> TradeProposal {
    TradeProposal {
        requested: None,
        ..swap()
    }
}

/// Everything already sitting in an event stream
pub fn drain(rx: &mut EventReceiver) -> Vec<TableEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Next event on a stream, failing loudly instead of hanging
pub async fn next_event(rx: &mut EventReceiver) -> TableEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .expect("event stream closed")
}

/// Collect one viewer's reveal stages until their portrait goes idle
pub async fn reveal_stages(rx: &mut EventReceiver, viewer: ParticipantId) -> Vec<RevealStage> {
    let mut stages = Vec::new();
    loop {
        if let TableEvent::DiceReveal { viewer: seen, stage } = next_event(rx).await {
            if seen != viewer {
                continue;
            }
            let done = stage == RevealStage::Idle;
            stages.push(stage);
            if done {
                return stages;
            }
        }
    }
}

fn seeded_store() -> MemoryOwnershipStore {
    MemoryOwnershipStore::with_objects([sword(ALICE), hammer(BOB), flintlock(ALICE)])
}

fn directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_member(1u64, "Alice")
        .with_member(2u64, "Bob")
        .with_member(3u64, "Carol")
}

fn config() -> BoardConfig {
    BoardConfig {
        trade: TradeConfig::default(),
        reveal: RevealTiming::default()
            .with_pre_roll(Duration::from_millis(5))
            .with_description_delay(Duration::from_millis(5))
            .with_display(Duration::from_millis(5))
            .with_clear_gap(Duration::from_millis(1))
            .with_settle(Duration::from_millis(1)),
    }
}
