use criterion::{
    criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
    measurement::WallTime, AxisScale, PlotConfiguration, Throughput,
};
use rand::{distributions::Standard, prelude::Distribution, thread_rng, Rng};
use supset::{dispatch, ScanElement, SupersetScanner};

const SAMPLE_SIZE: usize = 16;

const K: usize = 1000;
const LENGTHS: [usize; 6] = [8, 64, K, 16 * K, 256 * K, 1024 * K];

criterion_group!(benches, bench_scan_u32, bench_scan_u16);
criterion_main!(benches);

fn bench_scan_u32(c: &mut Criterion) {
    let group = c.benchmark_group("superset_scan_u32");
    bench_scan::<u32>(group)
}

fn bench_scan_u16(c: &mut Criterion) {
    let group = c.benchmark_group("superset_scan_u16");
    bench_scan::<u16>(group)
}

fn bench_scan<T: ScanElement>(mut group: BenchmarkGroup<WallTime>)
where
    Standard: Distribution<T>,
{
    group.sample_size(SAMPLE_SIZE);
    group.plot_config(
        PlotConfiguration::default().summary_scale(AxisScale::Logarithmic)
    );

    for &len in &LENGTHS {
        let (set, query) = last_match_only::<T>(len);
        group.throughput(Throughput::Elements(len as u64));

        for backend in dispatch::available::<T>() {
            if let Some(scanner) = SupersetScanner::<T>::with_backend(backend) {
                group.bench_with_input(
                    BenchmarkId::new(backend.name(), len),
                    &set,
                    |b, set| b.iter(|| scanner.scan(set, query)),
                );
            }
        }
    }
    group.finish();
}

/// Worst case: only the final element matches, so the whole sequence is
/// read.
fn last_match_only<T: ScanElement>(len: usize) -> (Vec<T>, T)
where
    Standard: Distribution<T>,
{
    let rng = &mut thread_rng();
    let query = T::one() << (T::BITS as usize - 1);

    let mut set: Vec<T> = (0..len)
        .map(|_| rng.gen::<T>() & !query)
        .collect();
    if let Some(last) = set.last_mut() {
        *last = *last | query;
    }
    (set, query)
}
