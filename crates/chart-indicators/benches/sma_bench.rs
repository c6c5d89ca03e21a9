use chart_indicators::series::{Candle, PointValue};
use chart_indicators::sma_values;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_candles(n: usize) -> (Vec<f64>, Vec<PointValue>) {
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + (i as f64 * 0.01).sin();
        price = c;
        x.push(i as f64);
        y.push(PointValue::from(Candle { t: i as f64, o, h: o.max(c) + 0.5, l: o.min(c) - 0.5, c }));
    }
    (x, y)
}

fn bench_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("sma");
    for &n in &[50_000usize, 100_000usize] {
        let (x, y) = gen_candles(n);
        for &period in &[14usize, 50usize, 200usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_p{period}")), &period, |b, &p| {
                b.iter(|| black_box(sma_values(&x, &y, p, 3)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sma);
criterion_main!(benches);
