//! Gram matrix and model gradient benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rgram::{
    GaussianKernel, Kernel, KernelKind, KernelLogisticRegression, LinearKernel, Matrix, Model,
    PolynomialKernel, Vector,
};
use std::hint::black_box;

fn create_data(dim: usize, n: usize) -> Matrix {
    Matrix::from_fn(dim, n, |i, j| ((i * 31 + j * 17) % 23) as f64 / 23.0 - 0.5)
}

fn kernels() -> Vec<KernelKind> {
    vec![
        LinearKernel::new(1.0).into(),
        PolynomialKernel::quadratic(1.0).into(),
        GaussianKernel::new(0.5).into(),
    ]
}

fn bench_gram_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("gram_matrix");

    for n in [16, 64, 256] {
        let data = create_data(10, n);
        group.throughput(Throughput::Elements((n * n) as u64));

        for kernel in kernels() {
            group.bench_with_input(BenchmarkId::new(kernel.name(), n), &data, |b, data| {
                b.iter(|| black_box(kernel.gram_matrix(data, data).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_gram_matrix_stable(c: &mut Criterion) {
    let mut group = c.benchmark_group("gram_matrix_stable");
    let kernel = GaussianKernel::new(0.5);

    for n in [16, 64, 256] {
        let data = create_data(10, n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| black_box(kernel.gram_matrix_stable(data, data).unwrap()));
        });
    }

    group.finish();
}

fn bench_kernel_logistic_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_logistic_gradient");

    for n in [64, 256] {
        let data = create_data(10, n);
        let labels = Vector::from_fn(n, |i, _| (i % 2) as f64);
        let weights = Vector::from_element(n, 0.01);

        // Cached Gram matrix: only the first call pays for the kernel evaluations
        let model = KernelLogisticRegression::new(GaussianKernel::new(0.5), 0.1);
        group.bench_with_input(BenchmarkId::new("cached", n), &data, |b, data| {
            b.iter(|| black_box(model.gradient(&weights, data, &labels).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("cold", n), &data, |b, data| {
            b.iter(|| {
                model.invalidate();
                black_box(model.gradient(&weights, data, &labels).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gram_matrix,
    bench_gram_matrix_stable,
    bench_kernel_logistic_gradient
);
criterion_main!(benches);
