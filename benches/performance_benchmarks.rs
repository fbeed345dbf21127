use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skillserver::prelude::*;

const INTENT_REQUEST: &str = r#"{
    "version": "1.0",
    "session": {
        "new": false,
        "sessionId": "amzn1.echo-api.session.bench",
        "application": {"applicationId": "amzn1.ask.skill.bench"},
        "attributes": {"count": 7},
        "user": {"userId": "amzn1.ask.account.bench"}
    },
    "context": {"System": {"device": {"deviceId": "amzn1.ask.device.bench"}}},
    "request": {
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.bench",
        "timestamp": "2024-03-01T12:00:00Z",
        "locale": "en-US",
        "intent": {
            "name": "PlayStation",
            "slots": {"Station": {"name": "Station", "value": "jazz"}}
        }
    }
}"#;

fn benchmark_request_decoding(c: &mut Criterion) {
    c.bench_function("decode_intent_request", |b| {
        b.iter(|| {
            let request = SkillRequest::from_json(black_box(INTENT_REQUEST)).unwrap();
            black_box(request.slot_value("Station").unwrap().len());
        })
    });
}

fn benchmark_response_encoding(c: &mut Criterion) {
    c.bench_function("encode_audio_response", |b| {
        b.iter(|| {
            let mut response = SkillResponse::new();
            response
                .output_speech("Playing jazz")
                .standard_card("Radio", "Jazz", "https://img.example.com/s.png", "")
                .audio_player_play(
                    PlayBehavior::ReplaceAll,
                    "https://cdn.example.com/jazz.mp3",
                    "jazz",
                    None,
                    0,
                );
            black_box(response.to_json().unwrap());
        })
    });
}

criterion_group!(benches, benchmark_request_decoding, benchmark_response_encoding);
criterion_main!(benches);
