use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use light_crypto::cipher::{Iv, Key, KeyIvInit, StreamCipher};
use light_crypto::{
    sha512, ChaCha20, Rabbit, SimonCtr128_256, SimonCtr64_96, SpeckCtr128_256, SpeckCtr64_96,
    Trivium,
};

const SIZES: [usize; 4] = [1024, 4096, 16384, 65536];

// Any stream cipher constructible from a key and IV.
fn bench_cipher<C>(c: &mut Criterion, name: &str)
where
    C: KeyIvInit + StreamCipher,
{
    let mut group = c.benchmark_group(name);

    for size in SIZES.iter() {
        let mut buffer = vec![0u8; *size];
        let key = Key::<C>::default();
        let nonce = Iv::<C>::default();
        let mut cipher = C::new(&key, &nonce);

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| cipher.apply_keystream(&mut buffer));
        });
    }
    group.finish();
}

fn bench_sha512(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA-512");

    for size in SIZES.iter() {
        let buffer = vec![0x5au8; *size];
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sha512(&buffer));
        });
    }
    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_cipher::<SimonCtr64_96>(c, "Simon64/96-CTR");
    bench_cipher::<SimonCtr128_256>(c, "Simon128/256-CTR");
    bench_cipher::<SpeckCtr64_96>(c, "Speck64/96-CTR");
    bench_cipher::<SpeckCtr128_256>(c, "Speck128/256-CTR");
    bench_cipher::<ChaCha20>(c, "ChaCha20");
    bench_cipher::<Rabbit>(c, "Rabbit");
    bench_cipher::<Trivium>(c, "Trivium");
    bench_sha512(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
