// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use chatflow::layout::{layout_document, LayoutOptions};
use chatflow::model::fixtures::demo_conversation;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.flow`, `layout.flow_grouped`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_layout(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("layout.flow");
        let options = LayoutOptions::default();

        for (case_id, document) in [
            ("demo", demo_conversation()),
            ("small", fixtures::fixture(Case::Small)),
            ("medium", fixtures::fixture(Case::Medium)),
            ("large", fixtures::fixture(Case::Large)),
        ] {
            group.throughput(Throughput::Elements(document.nodes.len() as u64));
            let options = options.clone();
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let result = layout_document(black_box(&document), black_box(&options));
                    black_box(fixtures::checksum_layout(&result))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.flow_grouped");
        let options = LayoutOptions::default().with_sort_by_combo(true).with_control_points(true);

        for (case_id, document) in [
            ("medium", fixtures::fixture(Case::Medium)),
            ("large", fixtures::fixture(Case::Large)),
        ] {
            group.throughput(Throughput::Elements(document.nodes.len() as u64));
            let options = options.clone();
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let result = layout_document(black_box(&document), black_box(&options));
                    black_box(fixtures::checksum_layout(&result))
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
