use criterion::{black_box, criterion_group, criterion_main, Criterion};
use img_slim::config::ScanPolicy;
use img_slim::fingerprint::{self, FingerprintMap};
use img_slim::scanner;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn create_image_tree(count: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..count {
        let path = temp_dir.path().join(format!("image_{i:03}.png"));
        File::create(&path)
            .unwrap()
            .write_all(&vec![0u8; 256])
            .unwrap();
    }
    temp_dir
}

fn bench_compute_key(c: &mut Criterion) {
    c.bench_function("fingerprint_compute_key", |b| {
        b.iter(|| {
            fingerprint::compute_key(
                black_box("src/assets/hero-banner.png"),
                black_box(123_456u64),
            )
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let tree = create_image_tree(100);
    let input = tree.path().to_string_lossy().into_owned();
    let policy = ScanPolicy::default();

    c.bench_function("scan_100_files", |b| {
        b.iter(|| scanner::scan(black_box(&input), &FingerprintMap::new(), &policy).unwrap())
    });
}

fn bench_scan_with_warm_fingerprints(c: &mut Criterion) {
    let tree = create_image_tree(100);
    let input = tree.path().to_string_lossy().into_owned();
    let policy = ScanPolicy::default();

    let candidates = scanner::scan(&input, &FingerprintMap::new(), &policy).unwrap();
    let fingerprints: FingerprintMap = candidates
        .iter()
        .map(|r| (r.path.clone(), fingerprint::compute_key(&r.path, r.size)))
        .collect();

    c.bench_function("rescan_100_unchanged_files", |b| {
        b.iter(|| scanner::scan(black_box(&input), &fingerprints, &policy).unwrap())
    });
}

criterion_group!(
    benches,
    bench_compute_key,
    bench_scan,
    bench_scan_with_warm_fingerprints
);
criterion_main!(benches);
