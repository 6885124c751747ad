//! Trade race specs
//!
//! Two transitions aimed at one trade must admit exactly one winner,
//! no matter how the tasks interleave.

use crate::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_accept_and_cancel_admit_one_winner() {
    let table = Table::setup();
    let trade = table.board.propose_trade(swap()).await.unwrap();

    let board = Arc::clone(&table.board);
    let id = trade.id.clone();
    let accept = tokio::spawn(async move { board.respond_trade(&id, BOB, true).await });
    let board = Arc::clone(&table.board);
    let id = trade.id.clone();
    let cancel = tokio::spawn(async move { board.cancel_trade(&id, ALICE) });

    let accepted = accept.await.unwrap();
    let cancelled = cancel.await.unwrap();

    let sword_owner = table.store.owner_of(ObjectId(10)).await.unwrap();
    match (accepted, cancelled) {
        (Ok(resolved), Err(_)) => {
            assert_eq!(resolved.status, TradeStatus::Accepted);
            assert_eq!(sword_owner, BOB);
        }
        (Err(_), Ok(resolved)) => {
            assert_eq!(resolved.status, TradeStatus::Cancelled);
            assert_eq!(sword_owner, ALICE);
        }
        (accepted, cancelled) => {
            panic!("expected one winner, got accept={accepted:?} cancel={cancelled:?}")
        }
    }
    assert!(table.board.trade_status(&trade.id).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_double_accept_applies_ownership_once() {
    let table = Table::setup();
    let trade = table.board.propose_trade(swap()).await.unwrap();

    let mut responses = Vec::new();
    for _ in 0..2 {
        let board = Arc::clone(&table.board);
        let id = trade.id.clone();
        responses.push(tokio::spawn(
            async move { board.respond_trade(&id, BOB, true).await },
        ));
    }

    let mut wins = 0;
    for response in responses {
        if response.await.unwrap().is_ok() {
            wins += 1;
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), BOB);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), ALICE);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn expiry_racing_acceptance_resolves_exactly_once() {
    let table = Table::setup();
    let trade = table.board.propose_trade(swap()).await.unwrap();
    table.clock.advance(Duration::from_secs(61));

    let board = Arc::clone(&table.board);
    let id = trade.id.clone();
    let accept = tokio::spawn(async move { board.respond_trade(&id, BOB, true).await });
    let board = Arc::clone(&table.board);
    let sweep = tokio::spawn(async move { board.sweep_expired() });

    let accepted = accept.await.unwrap();
    let expired = sweep.await.unwrap();

    let resolutions = expired.len() + usize::from(accepted.is_ok());
    assert_eq!(resolutions, 1, "trade resolved {resolutions} times");

    let sword_owner = table.store.owner_of(ObjectId(10)).await.unwrap();
    match accepted {
        Ok(resolved) => {
            assert_eq!(resolved.status, TradeStatus::Accepted);
            assert_eq!(sword_owner, BOB);
        }
        Err(_) => {
            assert_eq!(expired[0].status, TradeStatus::Expired);
            assert_eq!(sword_owner, ALICE);
        }
    }
}

#[tokio::test]
async fn stale_ownership_rejects_instead_of_moving_goods() {
    let table = Table::setup();
    let mut bob_rx = table.seat(BOB).await;
    drain(&mut bob_rx);

    let trade = table.board.propose_trade(swap()).await.unwrap();
    drain(&mut bob_rx);

    // The sword leaves Alice through another channel mid-negotiation
    table
        .store
        .transfer(Transfer {
            object: ObjectId(10),
            from: ALICE,
            to: CAROL,
        })
        .await
        .unwrap();

    let resolved = table
        .board
        .respond_trade(&trade.id, BOB, true)
        .await
        .unwrap();
    assert_eq!(resolved.status, TradeStatus::Rejected);

    assert!(matches!(
        next_event(&mut bob_rx).await,
        TableEvent::TradeResolved {
            accepted: false,
            reason: ResolveReason::Stale,
            ..
        }
    ));

    // Neither side of the swap applied
    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), CAROL);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), BOB);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_trades_resolve_in_parallel() {
    let table = Table::setup();

    let first = table.board.propose_trade(swap()).await.unwrap();
    let second = table
        .board
        .propose_trade(TradeProposal {
            kind: ObjectKind::Weapon,
            sender: ALICE,
            receiver: BOB,
            offered: ObjectId(40),
            requested: None,
        })
        .await
        .unwrap();

    let board = Arc::clone(&table.board);
    let id = first.id.clone();
    let one = tokio::spawn(async move { board.respond_trade(&id, BOB, true).await });
    let board = Arc::clone(&table.board);
    let id = second.id.clone();
    let two = tokio::spawn(async move { board.respond_trade(&id, BOB, true).await });

    assert_eq!(one.await.unwrap().unwrap().status, TradeStatus::Accepted);
    assert_eq!(two.await.unwrap().unwrap().status, TradeStatus::Accepted);

    assert_eq!(table.store.owner_of(ObjectId(10)).await.unwrap(), BOB);
    assert_eq!(table.store.owner_of(ObjectId(20)).await.unwrap(), ALICE);
    assert_eq!(table.store.owner_of(ObjectId(40)).await.unwrap(), BOB);
}
