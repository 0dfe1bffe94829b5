use std::io::{Cursor, Read};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use wsframe::ws::{FrameDecoder, FrameEncoder, Role};

const SIZES: [usize; 3] = [125, 4096, 65536];

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

fn encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in SIZES {
        let data = payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        for role in [Role::Client, Role::Server] {
            let mut encoder = FrameEncoder::with_max_chunk_size(Vec::with_capacity(size + 64), role, size).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("{role:?}"), size), &data, |b, data| {
                b.iter(|| {
                    encoder.get_mut().clear();
                    encoder.encode_from(&mut &data[..]).unwrap();
                    black_box(encoder.get_ref().len());
                })
            });
        }
    }
    group.finish();
}

fn decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        for (sender, receiver) in [(Role::Client, Role::Server), (Role::Server, Role::Client)] {
            let mut encoder = FrameEncoder::with_max_chunk_size(Vec::new(), sender, size).unwrap();
            encoder.encode_from(&mut &payload(size)[..]).unwrap();
            let wire = encoder.into_inner();
            let mut out = vec![0u8; size];
            group.bench_with_input(BenchmarkId::new(format!("{receiver:?}"), size), &wire, |b, wire| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new(Cursor::new(&wire[..]), receiver);
                    decoder.read_exact(&mut out).unwrap();
                    black_box(&out);
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, encode, decode);
criterion_main!(benches);
