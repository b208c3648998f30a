use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toon::{decode_strict, encode, EncodeOptions, ToonMap, Value};

fn simple_object() -> Value {
    let mut map = ToonMap::new();
    map.insert("id".to_string(), Value::Int(123));
    map.insert("name".to_string(), Value::Str("Alice".to_string()));
    map.insert("email".to_string(), Value::Str("alice@example.com".to_string()));
    map.insert("active".to_string(), Value::Bool(true));
    Value::Object(map)
}

fn tabular_products(size: usize) -> Value {
    let rows = (0..size)
        .map(|i| {
            let mut map = ToonMap::new();
            map.insert("sku".to_string(), Value::Str(format!("SKU{i}")));
            map.insert("name".to_string(), Value::Str(format!("Product {i}")));
            map.insert("price".to_string(), Value::Float(9.99 + i as f64));
            map.insert("quantity".to_string(), Value::Int(i as i64));
            Value::Object(map)
        })
        .collect();
    Value::List(rows)
}

fn nested_document() -> Value {
    let mut metadata = ToonMap::new();
    metadata.insert("created".to_string(), Value::Str("2023-01-01T00:00:00Z".to_string()));
    metadata.insert("updated".to_string(), Value::Str("2023-12-31T23:59:59Z".to_string()));
    metadata.insert("version".to_string(), Value::Int(3));

    let mut doc = ToonMap::new();
    doc.insert("id".to_string(), Value::Int(42));
    doc.insert("metadata".to_string(), Value::Object(metadata));
    doc.insert(
        "tags".to_string(),
        Value::List(vec![
            Value::Str("important".to_string()),
            Value::Str("verified".to_string()),
            Value::Str("production".to_string()),
        ]),
    );
    Value::Object(doc)
}

fn bench_encode_simple(c: &mut Criterion) {
    let value = simple_object();
    c.bench_function("encode_simple_object", |b| {
        b.iter(|| encode(black_box(&value), &EncodeOptions::default()))
    });
}

fn bench_decode_simple(c: &mut Criterion) {
    let text = encode(&simple_object(), &EncodeOptions::default()).unwrap();
    c.bench_function("decode_simple_object", |b| {
        b.iter(|| decode_strict(black_box(&text)))
    });
}

fn bench_encode_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_tabular");
    for size in [10, 50, 100, 500] {
        let value = tabular_products(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| encode(black_box(value), &EncodeOptions::default()))
        });
    }
    group.finish();
}

fn bench_decode_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_tabular");
    for size in [10, 50, 100, 500] {
        let text = encode(&tabular_products(size), &EncodeOptions::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| decode_strict(black_box(text)))
        });
    }
    group.finish();
}

fn bench_encode_nested(c: &mut Criterion) {
    let value = nested_document();
    c.bench_function("encode_nested_document", |b| {
        b.iter(|| encode(black_box(&value), &EncodeOptions::default()))
    });
}

fn bench_decode_nested(c: &mut Criterion) {
    let text = encode(&nested_document(), &EncodeOptions::default()).unwrap();
    c.bench_function("decode_nested_document", |b| {
        b.iter(|| decode_strict(black_box(&text)))
    });
}

fn bench_lenient_vs_strict(c: &mut Criterion) {
    let text = encode(&tabular_products(100), &EncodeOptions::default()).unwrap();

    let mut group = c.benchmark_group("decode_comparison");
    group.bench_function("strict", |b| b.iter(|| decode_strict(black_box(&text))));
    group.bench_function("lenient", |b| {
        b.iter(|| toon::decode_lenient(black_box(&text)))
    });
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let value = simple_object();
    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let text = encode(black_box(&value), &EncodeOptions::default()).unwrap();
            let _decoded = decode_strict(black_box(&text)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_encode_simple,
    bench_decode_simple,
    bench_encode_tabular,
    bench_decode_tabular,
    bench_encode_nested,
    bench_decode_nested,
    bench_lenient_vs_strict,
    bench_roundtrip,
);
criterion_main!(benches);
