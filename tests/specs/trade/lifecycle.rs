//! Trade lifecycle specs
//!
//! One trade, two participants, every way it can end.

use crate::prelude::*;

#[tokio::test]
async fn a_swap_accept_moves_both_objects_atomically() {
    let table = Table::setup();
    let mut alice_rx = table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    let trade = table.board.propose_trade(swap()).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    let resolved = table
        .board
        .respond_trade(&trade.id, BOB, true)
        .await
        .unwrap();
    assert_eq!(resolved.status, TradeStatus::Accepted);

    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), BOB);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), ALICE);

    for rx in [&mut alice_rx, &mut bob_rx] {
        assert!(matches!(
            next_event(rx).await,
            TableEvent::TradeResolved {
                accepted: true,
                reason: ResolveReason::Accepted,
                ..
            }
        ));
    }

    assert_eq!(
        table.board.sheet_snapshot(ALICE),
        vec![hammer(ALICE), flintlock(ALICE)]
    );
    assert_eq!(table.board.sheet_snapshot(BOB), vec![sword(BOB)]);
}

#[tokio::test]
async fn a_gift_accept_moves_only_the_offer() {
    let table = Table::setup();

    let trade = table.board.propose_trade(gift()).await.unwrap();
    let resolved = table
        .board
        .respond_trade(&trade.id, BOB, true)
        .await
        .unwrap();

    assert_eq!(resolved.status, TradeStatus::Accepted);
    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), BOB);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), BOB);
}

#[tokio::test]
async fn a_declined_swap_leaves_ownership_in_place() {
    let table = Table::setup();
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut bob_rx);

    let trade = table.board.propose_trade(swap()).await.unwrap();
    drain(&mut bob_rx);

    let resolved = table
        .board
        .respond_trade(&trade.id, BOB, false)
        .await
        .unwrap();
    assert_eq!(resolved.status, TradeStatus::Rejected);

    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), ALICE);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), BOB);
    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::TradeResolved {
            accepted: false,
            reason: ResolveReason::Declined,
            ..
        }
    ));
}

#[tokio::test]
async fn the_prompt_names_the_sender_and_the_goods() {
    let table = Table::setup();
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut bob_rx);

    table.board.propose_trade(swap()).await.unwrap();

    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::TradeRequested { prompt, .. }
            if prompt == "Alice offers you Longsword in exchange for Warhammer"
    ));
}

#[tokio::test]
async fn resolved_trades_dismiss_their_prompts() {
    let table = Table::setup();

    let trade = table.board.propose_trade(swap()).await.unwrap();
    assert_eq!(
        table.board.trade_status(&trade.id).unwrap(),
        TradeStatus::Proposed
    );

    table
        .board
        .respond_trade(&trade.id, BOB, false)
        .await
        .unwrap();

    // A reconnecting client polls status; not-found means dismiss
    assert!(table.board.trade_status(&trade.id).is_err());
}

#[tokio::test]
async fn an_abandoned_trade_expires_on_schedule() {
    let table = Table::setup();
    let mut alice_rx = table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;

    let trade = table.board.propose_trade(swap()).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    table.clock.advance(Duration::from_secs(61));
    let expired = table.board.sweep_expired();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, trade.id);

    for rx in [&mut alice_rx, &mut bob_rx] {
        assert!(matches!(
            next_event(rx).await,
            TableEvent::TradeResolved {
                reason: ResolveReason::Expired,
                ..
            }
        ));
    }
    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), ALICE);
}

#[tokio::test]
async fn a_disconnected_sender_keeps_their_trade_on_the_clock() {
    let table = Table::setup();
    table.seat(ALICE).await;
    let mut bob_rx = table.seat(BOB).await;

    let trade = table.board.propose_trade(swap()).await.unwrap();
    table.board.leave(ALICE);
    drain(&mut bob_rx);

    // The offer survives the disconnect
    assert_eq!(
        table.board.trade_status(&trade.id).unwrap(),
        TradeStatus::Proposed
    );

    table.clock.advance(Duration::from_secs(61));
    table.board.sweep_expired();

    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::TradeResolved {
            reason: ResolveReason::Expired,
            ..
        }
    ));
}

#[tokio::test]
async fn an_object_sits_in_at_most_one_open_trade() {
    let table = Table::setup();

    let first = table.board.propose_trade(swap()).await.unwrap();

    let err = table.board.propose_trade(gift()).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Trade(TradeError::ObjectAlreadyOffered { object })
            if object == ObjectId(10)
    ));

    table
        .board
        .respond_trade(&first.id, BOB, false)
        .await
        .unwrap();

    // Resolution frees the object for a fresh offer
    table.board.propose_trade(gift()).await.unwrap();
}
