// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion with a flamegraph profiler attached; tune through `CHATFLOW_PROFILE_FREQ`,
/// `CHATFLOW_BENCH_SAMPLE_SIZE`, `CHATFLOW_BENCH_WARMUP_SECS` and
/// `CHATFLOW_BENCH_MEASUREMENT_SECS`.
pub fn criterion() -> Criterion {
    let frequency = env_or("CHATFLOW_PROFILE_FREQ", 100i32).clamp(1, 1000);
    let sample_size = env_or("CHATFLOW_BENCH_SAMPLE_SIZE", 50usize).clamp(10, 200);
    let warmup = env_or("CHATFLOW_BENCH_WARMUP_SECS", 2u64).clamp(1, 60);
    let measurement = env_or("CHATFLOW_BENCH_MEASUREMENT_SECS", 5u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
