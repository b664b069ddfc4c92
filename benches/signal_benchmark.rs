use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use parley::signaling::{ClientMessage, ServerMessage};

const OFFER_JSON: &[u8] =
    br#"{"type":"createOffer","sdp":"v=0\r\no=- 4611731 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n"}"#;

/// parsing benchmark
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parsing");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ClientMessage", |b| {
        b.iter(|| {
            let msg = ClientMessage::parse(black_box(OFFER_JSON)).unwrap();
            black_box(msg)
        })
    });

    group.finish();
}

/// relayed message encoding benchmark
fn bench_encoding(c: &mut Criterion) {
    let sdp = "v=0\r\no=- 4611731 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n".to_string();

    let mut group = c.benchmark_group("Encoding");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ServerMessage", |b| {
        b.iter(|| {
            let msg = ServerMessage::CreateOffer {
                sdp: black_box(sdp.clone()),
            };
            let json = serde_json::to_string(&msg).unwrap();
            black_box(json)
        })
    });

    group.finish();
}

/// full parse-then-re-encode relay cycle benchmark
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("FullCycle");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_reencode", |b| {
        b.iter(|| {
            let relayed = match ClientMessage::parse(black_box(OFFER_JSON)).unwrap() {
                ClientMessage::CreateOffer { sdp } => ServerMessage::CreateOffer { sdp },
                _ => unreachable!(),
            };
            let json = serde_json::to_string(&relayed).unwrap();
            black_box(json)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_encoding, bench_full_cycle);
criterion_main!(benches);
