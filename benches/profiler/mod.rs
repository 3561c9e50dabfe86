// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Link extraction and layout finish in micro- to milliseconds, so short windows are enough.
/// The ring search is the only case that gets near a millisecond per iteration.
const SAMPLE_SIZE: usize = 40;
const WARM_UP: Duration = Duration::from_secs(1);
const MEASUREMENT: Duration = Duration::from_secs(3);

/// Sampling rate (Hz) for the flamegraph written with `--profile-time`.
const PROFILE_FREQUENCY: i32 = 250;

pub fn criterion() -> Criterion {
    Criterion::default()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT)
        .with_profiler(PProfProfiler::new(PROFILE_FREQUENCY, Output::Flamegraph(None)))
}
