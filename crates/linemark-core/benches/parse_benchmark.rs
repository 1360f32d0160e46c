//! Benchmarks comparing linemark parsing vs pulldown-cmark
//!
//! Run with: cargo bench -p linemark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linemark_core::Parser;
use pulldown_cmark::{Options, Parser as MdParser};

/// Sample document exercising every block kind
const MARKDOWN_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, and `inline code`.
It demonstrates the basic capabilities of the parser.

## Lists

- First item with some content
- Second item with more content
- Third item concluding the list

1. Step one of the process
2. Step two continues
3. Step three completes

## Code Example

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

## Table

| Name    | Speed   | Memory |
| ------- | ------- | ------ |
| Fast    | 100ms   | 10MB   |
| Medium  | 500ms   | 50MB   |
| Slow    | 1000ms  | 100MB  |

## Quote

> The best code is no code at all.
> Every line of code you write is a liability.
>
> -- Someone wise

See [the docs](https://example.com "docs") and ![a chart](https://example.com/chart.png).

---

End of document.
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    // Set throughput for bytes/sec reporting
    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("linemark", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let doc = parser.parse(black_box(MARKDOWN_SAMPLE)).unwrap();
            black_box(doc.blocks.len())
        })
    });

    group.bench_function("pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(MARKDOWN_SAMPLE), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    // Test with different document sizes
    for size in [1, 5, 10, 20].iter() {
        let content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("linemark", size), &content, |b, content| {
            b.iter(|| {
                let mut parser = Parser::new();
                let doc = parser.parse(black_box(content)).unwrap();
                black_box(doc.blocks.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("pulldown", size), &content, |b, content| {
            b.iter(|| {
                let parser = MdParser::new_ext(black_box(content), Options::all());
                let events: Vec<_> = parser.collect();
                black_box(events.len())
            })
        });
    }

    group.finish();
}

fn bench_inline_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let line = "This has *emphasis*, **strong**, `code`, [a link](https://example.com), and \\*escapes\\*. ";
    let content = line.repeat(50);

    group.throughput(Throughput::Bytes(content.len() as u64));

    group.bench_with_input(BenchmarkId::new("linemark", 50), &content, |b, content| {
        b.iter(|| {
            let mut parser = Parser::new();
            let doc = parser.parse(black_box(content)).unwrap();
            black_box(doc.blocks.len())
        })
    });

    group.bench_with_input(BenchmarkId::new("pulldown", 50), &content, |b, content| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(content), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_scaling, bench_inline_heavy);
criterion_main!(benches);
