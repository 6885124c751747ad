//! Room membership specs
//!
//! Joining, leaving, reconnecting, and the walls between rooms.

use crate::prelude::*;

#[tokio::test]
async fn a_reconnect_takes_over_the_stream_and_resyncs() {
    let table = Table::setup();
    let mut old_rx = table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut old_rx);
    drain(&mut bob_rx);

    let trade = table.board.propose_trade(swap()).await.unwrap();
    drain(&mut old_rx);
    drain(&mut bob_rx);

    // Reconnect: same participant, fresh stream
    let mut new_rx = table.seat(ALICE).await;
    drain(&mut new_rx);

    // The prompt is still live and the sheet matches the store
    assert_eq!(
        table.board.trade_status(&trade.id).unwrap(),
        TradeStatus::Proposed
    );
    assert_eq!(
        table.board.sheet_snapshot(ALICE),
        vec![sword(ALICE), flintlock(ALICE)]
    );

    table
        .board
        .respond_trade(&trade.id, BOB, false)
        .await
        .unwrap();

    assert!(matches!(
        next_event(&mut new_rx).await,
        TableEvent::TradeResolved { .. }
    ));
    assert!(old_rx.try_recv().is_err());
}

#[tokio::test]
async fn leaving_ends_deliveries_but_not_the_room() {
    let table = Table::setup();
    let mut alice_rx = table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    table.board.leave(ALICE);

    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::ParticipantLeft { participant, .. } if participant == ALICE
    ));

    // Bob still hears the table
    table.board.roll_dice(BOB, vec![DiceResult::new(3)], false);
    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::DiceRollAnnounced { roller } if roller == BOB
    ));
}

#[tokio::test]
async fn events_stay_inside_their_room() {
    let table = Table::setup();
    let mut alice_rx = table.seat(ALICE).await;
    let mut carol_rx = seat_at(&table.board, "table-2", CAROL).await;
    drain(&mut alice_rx);
    drain(&mut carol_rx);

    table.board.roll_dice(ALICE, vec![DiceResult::new(5)], false);

    assert!(matches!(
        next_event(&mut alice_rx).await,
        TableEvent::DiceRollAnnounced { .. }
    ));
    assert!(drain(&mut carol_rx).is_empty());
}

#[tokio::test]
async fn equipment_grants_reach_the_whole_room() {
    let table = Table::setup();
    let mut alice_rx = table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    let dagger = OwnedObject::new(30u64, ObjectKind::Weapon, "Dagger", BOB);
    table.board.equipment_changed(BOB, dagger.clone(), false);

    // Everyone at the table sees Bob's new dagger
    for rx in [&mut alice_rx, &mut bob_rx] {
        assert!(matches!(
            next_event(rx).await,
            TableEvent::EquipmentOwnershipChanged { participant, removed: false, .. }
                if participant == BOB
        ));
    }
    assert_eq!(table.board.sheet_snapshot(BOB), vec![hammer(BOB), dagger]);
}
