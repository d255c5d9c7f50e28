use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use roastline_core::{
    bean_temperature_curve, thin, DeltaCodec, DerivativeMethod, RateOfRiseEngine, RorConfig, TelemetrySample,
    TemporalRingBuffer,
};

/// 1 Hz roast-like history: slow rise with a little ripple on every channel.
fn generate_roast(n: usize) -> Vec<TelemetrySample> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let bean = 90.0 + 0.15 * i as f32 + 0.2 * ((i as f32) * 0.7).sin();
            TelemetrySample::at(1_712_000_000.0 + t)
                .with_bean_temp(bean)
                .with_env_temp(bean + 40.0)
                .with_setpoint(220.0)
                .with_duty(180, 70)
                .with_control(1, true)
        })
        .collect()
}

fn bench_buffer_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_push");

    for size in [1_000, 10_000] {
        let data = generate_roast(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("wrapping", size), &data, |b, data| {
            b.iter(|| {
                let mut buffer = TemporalRingBuffer::new(3600).unwrap();
                for sample in data {
                    buffer.push(black_box(*sample));
                }
                black_box(buffer.len())
            });
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let codec = DeltaCodec::new(10.0).unwrap();
    let mut group = c.benchmark_group("codec");

    for size in [100, 1_000, 10_000] {
        let data = generate_roast(size);
        let (compressed, state) = codec.encode(&data);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &data, |b, data| {
            b.iter(|| black_box(codec.encode(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("decode", size), &compressed, |b, compressed| {
            b.iter(|| black_box(codec.decode(black_box(compressed), &state)));
        });
    }

    group.finish();
}

fn bench_thinning(c: &mut Criterion) {
    let data = generate_roast(3_600);
    c.bench_function("thin_3600_to_500", |b| b.iter(|| black_box(thin(black_box(&data), 500, 0.5))));
}

fn bench_ror(c: &mut Criterion) {
    let curve = bean_temperature_curve(&generate_roast(3_600));
    let mut group = c.benchmark_group("ror");
    group.throughput(Throughput::Elements(curve.len() as u64));

    for method in [DerivativeMethod::WindowedDifference, DerivativeMethod::LinearRegression] {
        let engine = RateOfRiseEngine::new(RorConfig {
            method,
            window_size: 15,
            ..Default::default()
        })
        .unwrap();

        group.bench_with_input(BenchmarkId::new(format!("{method:?}"), curve.len()), &curve, |b, curve| {
            b.iter(|| black_box(engine.calculate(black_box(curve))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_buffer_push, bench_codec, bench_thinning, bench_ror);
criterion_main!(benches);
