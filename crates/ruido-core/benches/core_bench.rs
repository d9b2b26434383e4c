//! Hot-path primitive benchmarks.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ruido_core::{Biquad, DelayLine, Oscillator, Waveform, fast_sin_cos, soft_limit};

fn bench_fast_sin_cos(c: &mut Criterion) {
    let mut group = c.benchmark_group("trig");
    group.bench_function("fast_sin_cos", |b| {
        let mut phase = 0.0f32;
        b.iter(|| {
            phase = (phase + 0.013) % 1.0;
            black_box(fast_sin_cos(black_box(phase)))
        });
    });
    group.bench_function("libm_sinf_cosf", |b| {
        let mut phase = 0.0f32;
        b.iter(|| {
            phase = (phase + 0.013) % 1.0;
            let angle = phase * core::f32::consts::TAU;
            black_box((libm::sinf(angle), libm::cosf(angle)))
        });
    });
    group.finish();
}

fn bench_biquad(c: &mut Criterion) {
    let mut filter = Biquad::new();
    filter.set_lowpass(1000.0, 0.707, 48000.0);
    c.bench_function("biquad_process", |b| {
        b.iter(|| black_box(filter.process(black_box(0.5))));
    });
}

fn bench_oscillator(c: &mut Criterion) {
    let mut osc = Oscillator::new(48000.0);
    osc.set_frequency(440.0);
    c.bench_function("oscillator_sine", |b| {
        b.iter(|| black_box(osc.step(Waveform::Sine)));
    });
}

fn bench_delay(c: &mut Criterion) {
    let mut delay = DelayLine::new(8192);
    for i in 0..8192 {
        delay.write(i as f32 * 1e-4);
    }
    c.bench_function("delay_read_write", |b| {
        b.iter(|| black_box(delay.read_write(black_box(0.5), black_box(1234.56))));
    });
}

fn bench_soft_limit(c: &mut Criterion) {
    c.bench_function("soft_limit", |b| {
        b.iter(|| black_box(soft_limit(black_box(1.7))));
    });
}

criterion_group!(
    benches,
    bench_fast_sin_cos,
    bench_biquad,
    bench_oscillator,
    bench_delay,
    bench_soft_limit
);
criterion_main!(benches);
