use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use postcraft_core::{Converter, Document, ExtractConfig, NoiseFilter, extract_content, format_post_with_rng};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_parse(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/generic_article.html").unwrap();
    let medium = std::fs::read_to_string("../../tests/fixtures/feishu_doc.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "article"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "document editor"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/feishu_doc.html").unwrap();
    let doc = Document::parse(&html).unwrap();
    let config = ExtractConfig::default();

    c.bench_function("selector_cascade", |b| {
        b.iter(|| extract_content(black_box(&doc), black_box(&config)))
    });
}

fn bench_noise_filter(c: &mut Criterion) {
    let line = "正文段落内容 with   some\tspacing\n分享\n复制\n";
    let text = line.repeat(500);
    let filter = NoiseFilter::default();

    c.bench_function("noise_filter", |b| b.iter(|| filter.clean(black_box(&text))));
}

fn bench_format(c: &mut Criterion) {
    let text = "Title\nIntro paragraph\n- one\n- two\n3) three\nOutro\n".repeat(100);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("format_post", |b| b.iter(|| format_post_with_rng(black_box(&text), &mut rng)));
}

fn bench_full_conversion(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/feishu_doc.html").unwrap();
    let converter = Converter::new();

    c.bench_function("full_conversion", |b| b.iter(|| converter.convert_html(black_box(&html))));
}

criterion_group!(
    benches,
    bench_parse,
    bench_extraction,
    bench_noise_filter,
    bench_format,
    bench_full_conversion
);
criterion_main!(benches);
