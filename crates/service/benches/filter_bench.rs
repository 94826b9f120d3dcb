use criterion::{black_box, criterion_group, criterion_main, Criterion};

use service::home::domain::HomeQuery;
use service::home::filter::HomeFilter;

fn bench_filter(c: &mut Criterion) {
    let full = HomeQuery {
        city: Some("Toronto".into()),
        min_price: Some("100000".into()),
        max_price: Some("750000.50".into()),
        property_type: Some("CONDO".into()),
    };
    let empty = HomeQuery::default();

    c.bench_function("home_filter_full", |b| {
        b.iter(|| {
            let f = HomeFilter::try_from(black_box(&full)).expect("valid query");
            black_box(f.to_condition());
        });
    });

    c.bench_function("home_filter_empty", |b| {
        b.iter(|| black_box(HomeFilter::try_from(black_box(&empty)).expect("valid query")));
    });
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
