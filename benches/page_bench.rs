use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portfolio::form::{ContactForm, Field};
use portfolio::nav::{active_link, SectionLayout, TrackerConfig};

// Hot paths of the page controller and the card generator. Run with:
//    cargo bench

fn bench_validate_form(c: &mut Criterion) {
    let mut form = ContactForm::new();
    for (field, value) in Field::ALL.into_iter().zip(["Ada Lovelace", "ada@example.com", "Analytical engines", "Notes on the engine, section G"]) {
        form.set_value(field, value);
    }
    c.bench_function("validate_form", |b| b.iter(|| black_box(&mut form).validate_form()));
}

fn bench_active_link(c: &mut Criterion) {
    let sections: Vec<SectionLayout> = (0..12)
        .map(|i| SectionLayout::new(format!("s{}", i), i as f64 * 700.0, 700.0))
        .collect();
    let cfg = TrackerConfig {
        probe_offset: 100.0,
        home_threshold: 50.0,
    };
    c.bench_function("active_link", |b| {
        b.iter(|| {
            for y in (0..8400).step_by(350) {
                black_box(active_link(y as f64, &sections, cfg));
            }
        })
    });
}

fn bench_render_card(c: &mut Criterion) {
    let mut group = c.benchmark_group("cards");
    group.sample_size(20);
    group.bench_function("render_card", |b| {
        b.iter(|| portfolio::rendering::render_card(black_box("Algorithm Visualizer"), "#6c5ce7").unwrap())
    });
    group.bench_function("fallback_data_url", |b| {
        b.iter(|| portfolio::rendering::fallback_data_url(black_box("Weather App"), "#45b7d1").unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_validate_form, bench_active_link, bench_render_card);
criterion_main!(benches);
