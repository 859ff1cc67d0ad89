// In benches/dispatch_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arrow::array::{ArrayRef, Int32Array};
use arrow::compute::kernels::numeric::add;
use std::sync::Arc;

use lamina_columnar::compute::{invoke_binary_array_kernel_as_datum, ChunkedArray, Datum};
use lamina_columnar::LaminaError;

// --- Mock Data Generation ---

/// Generates one flat array of `rows` deterministic values.
fn generate_flat_datum(rows: usize) -> Datum {
    let array = Int32Array::from_iter_values((0..rows).map(|i| (i % 1_000) as i32));
    Datum::from(Arc::new(array) as ArrayRef)
}

/// Generates the same values split into chunks of at most `chunk_len` rows.
fn generate_chunked_datum(rows: usize, chunk_len: usize) -> Datum {
    let mut chunks: Vec<ArrayRef> = Vec::with_capacity(rows.div_ceil(chunk_len));
    let mut start = 0;
    while start < rows {
        let end = usize::min(start + chunk_len, rows);
        let chunk = Int32Array::from_iter_values((start..end).map(|i| (i % 1_000) as i32));
        chunks.push(Arc::new(chunk));
        start = end;
    }
    let chunked = ChunkedArray::try_new(chunks).expect("chunk layout is valid");
    Datum::from(chunked)
}

fn add_kernel(left: &ArrayRef, right: &ArrayRef) -> Result<ArrayRef, LaminaError> {
    add(left, right).map_err(LaminaError::from)
}

// --- Benchmark Suite ---

const BENCH_ROW_COUNT: usize = 65_536;

fn bench_binary_dispatch(c: &mut Criterion) {
    // --- Setup Data ---
    let flat_left = generate_flat_datum(BENCH_ROW_COUNT);
    let flat_right = generate_flat_datum(BENCH_ROW_COUNT);
    let aligned_left = generate_chunked_datum(BENCH_ROW_COUNT, 4_096);
    let aligned_right = generate_chunked_datum(BENCH_ROW_COUNT, 4_096);
    // Off-by-one chunking forces a kernel call at every boundary of either input.
    let misaligned_left = generate_chunked_datum(BENCH_ROW_COUNT, 4_096);
    let misaligned_right = generate_chunked_datum(BENCH_ROW_COUNT, 4_095);

    // --- Create a Benchmark Group ---
    let mut group = c.benchmark_group("Binary Dispatch Comparison");
    group.throughput(criterion::Throughput::Elements(BENCH_ROW_COUNT as u64));

    group.bench_function("Add [1] Flat x Flat", |b| {
        b.iter(|| {
            black_box(invoke_binary_array_kernel_as_datum(
                &add_kernel,
                black_box(&flat_left),
                black_box(&flat_right),
            ))
        })
    });
    group.bench_function("Add [2] Aligned Chunks", |b| {
        b.iter(|| {
            black_box(invoke_binary_array_kernel_as_datum(
                &add_kernel,
                black_box(&aligned_left),
                black_box(&aligned_right),
            ))
        })
    });
    group.bench_function("Add [3] Misaligned Chunks", |b| {
        b.iter(|| {
            black_box(invoke_binary_array_kernel_as_datum(
                &add_kernel,
                black_box(&misaligned_left),
                black_box(&misaligned_right),
            ))
        })
    });
    group.bench_function("Add [4] Flat x Chunked (concatenating)", |b| {
        b.iter(|| {
            black_box(invoke_binary_array_kernel_as_datum(
                &add_kernel,
                black_box(&flat_left),
                black_box(&misaligned_right),
            ))
        })
    });

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_binary_dispatch);
criterion_main!(benches);
