// benches/municipal.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use court_harvest::core::content_blocks;
use court_harvest::specs::municipal::extract_listings;

/// A listing page shaped like the real one, repeated to a realistic size.
fn sample_page() -> String {
    let mut doc = String::from("<html><body><h1>Pickleball</h1>");
    for i in 0..200 {
        doc.push_str(&format!(
            "<p><strong>Park {i}</strong> {n} E {i}th St, Austin, TX 78702</p>\
             <ul><li>{c} Dedicated Outdoor Courts</li><li>Lights</li><li>Restrooms</li></ul>\
             <p>Reservations are not required.</p>",
            n = 1000 + i,
            c = i % 6 + 1,
        ));
    }
    doc.push_str("</body></html>");
    doc
}

fn bench_municipal(c: &mut Criterion) {
    let doc = sample_page();

    c.bench_function("content_blocks", |b| {
        b.iter(|| black_box(content_blocks(black_box(&doc)).len()))
    });

    let blocks = content_blocks(&doc);
    c.bench_function("extract_listings", |b| {
        b.iter(|| black_box(extract_listings(black_box(&blocks)).len()))
    });
}

criterion_group!(benches, bench_municipal);
criterion_main!(benches);
