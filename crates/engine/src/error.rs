// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the board engine

use tb_adapters::StoreError;
use tb_core::TradeError;
use thiserror::Error;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("trade error: {0}")]
    Trade(#[from] TradeError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
