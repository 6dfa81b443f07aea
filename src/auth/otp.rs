// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! One-time code generation.

use rand::Rng;

/// Generate a 6-digit OTP code, uniform over 100000..=999999.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999).to_string()
}
