// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenIssuer;
use crate::mail::Mailer;
use crate::storage::FileStorage;

/// Shared application state.
///
/// The storage lock is the only point of shared mutation: every OTP
/// issue/consume and every note write runs inside one write-guard critical
/// section, so challenge consumption is atomic with respect to concurrent
/// verification attempts.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<RwLock<FileStorage>>,
    pub mailer: Arc<dyn Mailer>,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(storage: FileStorage, mailer: Arc<dyn Mailer>, tokens: TokenIssuer) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
            mailer,
            tokens,
        }
    }
}
