mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use support::wav::{sine, wav_bytes};

use voxcheck::analysis::{
    ANALYSIS_SAMPLE_RATE, ANALYSIS_SAMPLES, ANALYSIS_SECONDS, DB_FLOOR, FEATURE_LEN, FeatureTensor,
    audio, features,
};
use voxcheck::detect::{ClassScores, Classifier, ClipInfo, Detector, Prediction};
use voxcheck::error::{DetectError, InferenceError};

/// Classifier stub returning fixed raw scores and recording its inputs.
struct StubClassifier {
    scores: ClassScores,
    calls: AtomicUsize,
}

impl StubClassifier {
    fn new(real: f32, fake: f32) -> Arc<Self> {
        Arc::new(Self {
            scores: ClassScores { real, fake },
            calls: AtomicUsize::new(0),
        })
    }
}

impl Classifier for StubClassifier {
    fn model_version(&self) -> &str {
        "1.0"
    }

    fn classify(&self, features: &FeatureTensor) -> Result<ClassScores, InferenceError> {
        assert_eq!(features.len(), FEATURE_LEN);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scores)
    }
}

struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn model_version(&self) -> &str {
        "1.0"
    }

    fn classify(&self, _features: &FeatureTensor) -> Result<ClassScores, InferenceError> {
        Err(InferenceError::Unavailable {
            message: "model file missing".into(),
        })
    }
}

fn clip_info(name: &str) -> ClipInfo {
    ClipInfo {
        file_name: name.into(),
        media_type: Some("audio/wav".into()),
    }
}

#[test]
fn real_voice_scores_produce_a_clean_real_verdict() {
    let classifier = StubClassifier::new(2.0, -2.0);
    let detector = Detector::new(classifier.clone());
    let bytes = wav_bytes(&sine(440.0, 44_100, 2.0), 1, 44_100);

    let result = detector.analyze(&bytes, &clip_info("voice.wav")).unwrap();

    assert_eq!(result.prediction, Prediction::Real);
    assert!(result.confidence > 0.95);
    assert!(!result.is_suspicious);
    assert!((result.probabilities.real + result.probabilities.fake - 1.0).abs() < 1e-6);
    assert_eq!(result.details.file_name, "voice.wav");
    assert_eq!(result.details.file_size, bytes.len() as u64);
    assert_eq!(result.details.model_version, "1.0");
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fake_scores_set_the_suspicious_flag() {
    let detector = Detector::new(StubClassifier::new(-1.0, 3.0));
    let bytes = wav_bytes(&sine(220.0, 22_050, 1.0), 1, 22_050);

    let result = detector.analyze(&bytes, &clip_info("synth.wav")).unwrap();

    assert_eq!(result.prediction, Prediction::Fake);
    assert!(result.probabilities.fake > 0.7);
    assert!(result.is_suspicious);
}

#[test]
fn equal_scores_resolve_to_real() {
    let detector = Detector::new(StubClassifier::new(0.0, 0.0));
    let bytes = wav_bytes(&sine(330.0, 22_050, 1.0), 1, 22_050);

    let result = detector.analyze(&bytes, &clip_info("tie.wav")).unwrap();

    assert_eq!(result.prediction, Prediction::Real);
    assert!((result.confidence - 0.5).abs() < 1e-6);
}

#[test]
fn silent_clip_yields_a_well_formed_result() {
    let detector = Detector::new(StubClassifier::new(0.3, -0.1));
    let silence = vec![0.0_f32; (ANALYSIS_SAMPLE_RATE * 5) as usize];
    let bytes = wav_bytes(&silence, 1, ANALYSIS_SAMPLE_RATE);

    let result = detector.analyze(&bytes, &clip_info("silence.wav")).unwrap();

    assert!(result.confidence.is_finite());
    assert!((0.5..=1.0).contains(&result.confidence));
}

#[test]
fn stereo_and_high_rate_uploads_are_normalized() {
    let detector = Detector::new(StubClassifier::new(1.0, 0.0));
    let mono = sine(440.0, 48_000, 7.0);
    let mut interleaved = Vec::with_capacity(mono.len() * 2);
    for sample in &mono {
        interleaved.push(*sample);
        interleaved.push(*sample * 0.5);
    }
    let bytes = wav_bytes(&interleaved, 2, 48_000);

    let result = detector.analyze(&bytes, &clip_info("stereo.wav")).unwrap();
    assert_eq!(result.prediction, Prediction::Real);
}

#[test]
fn inference_failure_is_reported_not_fabricated() {
    let detector = Detector::new(Arc::new(BrokenClassifier));
    let bytes = wav_bytes(&sine(440.0, 22_050, 1.0), 1, 22_050);

    let err = detector.analyze(&bytes, &clip_info("clip.wav")).unwrap_err();
    assert!(matches!(
        err,
        DetectError::Inference(InferenceError::Unavailable { .. })
    ));
}

#[test]
fn garbage_bytes_fail_as_decode_errors() {
    let detector = Detector::new(StubClassifier::new(0.0, 0.0));
    let err = detector
        .analyze(&[0x00, 0x01, 0x02, 0x03, 0x04], &clip_info("junk.bin"))
        .unwrap_err();
    assert!(matches!(err, DetectError::Decode(_)));
}

#[test]
fn unsupported_media_type_is_rejected_up_front() {
    let detector = Detector::new(StubClassifier::new(0.0, 0.0));
    let info = ClipInfo {
        file_name: "page.html".into(),
        media_type: Some("text/html".into()),
    };
    let err = detector.analyze(&[1, 2, 3], &info).unwrap_err();
    assert!(matches!(err, DetectError::Validation(_)));
}

#[test]
fn analysis_window_and_tensor_have_contract_sizes() {
    let decoded = audio::decode_bytes(
        wav_bytes(&sine(440.0, 44_100, 8.0), 1, 44_100),
        Some("audio/wav"),
    )
    .unwrap();
    let mut window = audio::resample(&decoded.mono, decoded.sample_rate, ANALYSIS_SAMPLE_RATE).unwrap();
    audio::fit_to_duration(&mut window, ANALYSIS_SAMPLE_RATE, ANALYSIS_SECONDS);
    assert_eq!(window.len(), ANALYSIS_SAMPLES);

    let tensor = features::extract_features(&window).unwrap();
    assert_eq!(tensor.len(), FEATURE_LEN);
    assert!(
        tensor
            .as_slice()
            .iter()
            .all(|&v| (DB_FLOOR..=0.0).contains(&v))
    );
}

#[test]
fn byte_identical_input_yields_identical_tensor_and_verdict() {
    let bytes = wav_bytes(&sine(523.25, 44_100, 3.0), 1, 44_100);

    let decode = |bytes: &[u8]| {
        let decoded = audio::decode_bytes(bytes.to_vec(), Some("audio/wav")).unwrap();
        let mut window =
            audio::resample(&decoded.mono, decoded.sample_rate, ANALYSIS_SAMPLE_RATE).unwrap();
        audio::fit_to_duration(&mut window, ANALYSIS_SAMPLE_RATE, ANALYSIS_SECONDS);
        features::extract_features(&window).unwrap()
    };
    assert_eq!(decode(&bytes), decode(&bytes));

    let detector = Detector::new(StubClassifier::new(0.8, -0.8));
    let first = detector.analyze(&bytes, &clip_info("clip.wav")).unwrap();
    let second = detector.analyze(&bytes, &clip_info("clip.wav")).unwrap();
    assert_eq!(first.prediction, second.prediction);
    assert!((first.confidence - second.confidence).abs() < 1e-6);
}

#[test]
fn disk_backed_uploads_analyze_like_in_memory_buffers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.wav");
    let bytes = wav_bytes(&sine(440.0, 44_100, 2.0), 1, 44_100);
    std::fs::write(&path, &bytes).unwrap();

    let detector = Detector::new(StubClassifier::new(2.0, -2.0));
    let from_disk = std::fs::read(&path).unwrap();
    let result = detector.analyze(&from_disk, &clip_info("upload.wav")).unwrap();
    assert_eq!(result.prediction, Prediction::Real);
    assert_eq!(result.details.file_size, bytes.len() as u64);
}

#[test]
fn result_serializes_to_the_wire_shape() {
    let detector = Detector::new(StubClassifier::new(2.0, -2.0));
    let bytes = wav_bytes(&sine(440.0, 22_050, 1.0), 1, 22_050);
    let result = detector.analyze(&bytes, &clip_info("voice.wav")).unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["prediction"], "REAL");
    assert!(json["confidence"].as_f64().unwrap() > 0.95);
    assert!(json["probabilities"]["real"].is_number());
    assert!(json["probabilities"]["fake"].is_number());
    assert_eq!(json["is_suspicious"], false);
    assert_eq!(json["details"]["file_name"], "voice.wav");
    assert_eq!(json["details"]["model_version"], "1.0");
    assert!(json["details"]["processing_time_ms"].is_number());
    assert!(json["timestamp"].as_str().unwrap().contains('T'));
}
