//! Benchmarks for table serialization
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};

use pqsink::encoding::{ColumnEncoding, EncodingPolicy};
use pqsink::rw::{Codec, Writer, WriterConfigBuilder};
use pqsink::stream::Table;

/// Create a test RecordBatch with realistic sensor data
fn create_sensor_batch(num_rows: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("timestamp", DataType::Int64, false),
        Field::new("sensor_id", DataType::Utf8, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));

    let timestamps: Vec<i64> = (0..num_rows as i64).collect();
    let sensor_ids: Vec<&str> = (0..num_rows)
        .map(|i| if i % 2 == 0 { "imu_front" } else { "imu_rear" })
        .collect();
    let x_vals: Vec<f64> = (0..num_rows).map(|i| (i as f64).sin()).collect();
    let y_vals: Vec<f64> = (0..num_rows).map(|i| (i as f64).cos()).collect();

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(timestamps)) as ArrayRef,
            Arc::new(StringArray::from(sensor_ids)),
            Arc::new(Float64Array::from(x_vals)),
            Arc::new(Float64Array::from(y_vals)),
        ],
    )
    .expect("Failed to create RecordBatch")
}

fn table(batches: Vec<RecordBatch>) -> Table {
    let schema = batches[0].schema();
    Table::try_new(schema, batches).expect("Failed to create table")
}

/// Benchmark in-memory writes per codec (parquet encoding + compression)
fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codecs");

    for num_rows in [1000, 10000, 100000].iter() {
        let table = table(vec![create_sensor_batch(*num_rows)]);

        for codec in [Codec::Uncompressed, Codec::Snappy, Codec::Zstd] {
            let writer = Writer::new(
                WriterConfigBuilder::default()
                    .codec(codec)
                    .build()
                    .expect("Failed to build config"),
            );

            group.bench_with_input(
                BenchmarkId::new(codec.to_string(), num_rows),
                &table,
                |b, table| {
                    b.iter(|| {
                        let (buffer, _report) = writer
                            .write_to_buffer(black_box(table))
                            .expect("Failed to write");
                        black_box(buffer)
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark delta encoding against the default dictionary policy
fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encodings");

    let table = table((0..10).map(|_| create_sensor_batch(10000)).collect());

    let delta = EncodingPolicy::resolve(
        table.schema(),
        ColumnEncoding::DeltaBinaryPacked.into(),
        ["timestamp"],
    )
    .expect("Failed to resolve policy");
    let split = EncodingPolicy::resolve(
        table.schema(),
        ColumnEncoding::ByteStreamSplit.into(),
        ["x", "y"],
    )
    .expect("Failed to resolve policy");

    for (name, policy) in [
        ("dictionary", EncodingPolicy::dictionary()),
        ("delta_timestamp", delta),
        ("byte_stream_split", split),
    ] {
        let writer = Writer::new(
            WriterConfigBuilder::default()
                .policy(policy)
                .build()
                .expect("Failed to build config"),
        );

        group.bench_function(name, |b| {
            b.iter(|| {
                let (buffer, _report) = writer
                    .write_to_buffer(black_box(&table))
                    .expect("Failed to write");
                black_box(buffer)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codecs, bench_encodings);
criterion_main!(benches);
