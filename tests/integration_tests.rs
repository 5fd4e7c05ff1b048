//! Integration tests for the pitch correction engine

use retune_dsp::{
    process, CorrectionConfig, CorrectionError, EstimatorMethod, PassthroughShifter, PitchShifter,
    ResampleShifter,
};

/// Generate a sine wave at the given frequency and amplitude
fn gen_sine(freq: f32, sample_rate: u32, duration_s: f32, amplitude: f32) -> Vec<f32> {
    let n_samples = (duration_s * sample_rate as f32).round() as usize;
    let two_pi_f = 2.0_f32 * std::f32::consts::PI * freq;
    (0..n_samples)
        .map(|n| {
            let t = n as f32 / sample_rate as f32;
            amplitude * (two_pi_f * t).sin()
        })
        .collect()
}

/// Configuration shared by the synthetic scenarios
fn scenario_config() -> CorrectionConfig {
    CorrectionConfig {
        chunk_ms: 120.0,
        overlap_ms: 12.0,
        gate_db: -45.0,
        min_frequency: 70.0,
        max_frequency: 900.0,
        ..CorrectionConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_silence() {
        let _ = env_logger::builder().is_test(true).try_init();

        for len in [0usize, 1, 999, 48_000, 48_001, 100_000] {
            let samples = vec![0.0f32; len];
            let result = process(&samples, 48_000, scenario_config(), &ResampleShifter)
                .expect("Silence should process cleanly");

            assert_eq!(result.output.len(), len);
            assert!(
                result.output.iter().all(|&x| x == 0.0),
                "Silence must reconstruct to exact silence (len {})",
                len
            );
            assert_eq!(result.diagnostics.voiced_frames, 0);
        }
    }

    #[test]
    fn test_known_sine_scenario() {
        // 220 Hz at 48 kHz: root A, all frames voiced, ratios within 1% of 1.0
        let samples = gen_sine(220.0, 48_000, 2.0, 0.5);
        let result = process(&samples, 48_000, scenario_config(), &ResampleShifter)
            .expect("Correction should succeed");

        assert_eq!(
            result.diagnostics.scale.root_pitch_class, 9,
            "220 Hz (A3) should seed root A"
        );
        assert_eq!(result.diagnostics.root_name, "A");
        assert_eq!(
            result.diagnostics.voiced_frames, result.diagnostics.total_frames,
            "All frames of a loud sine should be voiced"
        );
        assert!(result.diagnostics.total_frames > 0);

        for frame in &result.diagnostics.frames {
            assert!(
                (frame.shift_ratio - 1.0).abs() < 0.01,
                "In-scale frame at {} should not be corrected, ratio {:.4}",
                frame.start_offset,
                frame.shift_ratio
            );
        }
    }

    #[test]
    fn test_off_scale_correction_scenario() {
        // 233 Hz (A#3, midway between A3 and B3) with the root forced to A:
        // every voiced frame must target A3 (57) or B3 (59), never A#3 (58)
        let samples = gen_sine(233.0, 48_000, 2.0, 0.5);
        let mut config = scenario_config();
        config.root_override = Some(9);

        let result =
            process(&samples, 48_000, config, &ResampleShifter).expect("Correction should succeed");

        let voiced: Vec<_> = result.diagnostics.frames.iter().filter(|f| f.voiced).collect();
        assert!(!voiced.is_empty(), "A loud 233 Hz sine must have voiced frames");

        for frame in voiced {
            let target = frame.target_midi.expect("Voiced frame must carry a target");
            assert!(
                target == 57 || target == 59,
                "Target must be A3 or B3, got {}",
                target
            );
        }
    }

    #[test]
    fn test_reconstruction_length_invariant() {
        let mut config = scenario_config();
        for len in [1usize, 500, 5_759, 5_760, 5_761, 77_777] {
            for chunk_ms in [50.0, 120.0, 200.0] {
                config.chunk_ms = chunk_ms;
                config.overlap_ms = 10.0;
                let samples = vec![0.25f32; len];

                let result = process(&samples, 48_000, config.clone(), &ResampleShifter)
                    .expect("Correction should succeed");
                assert_eq!(
                    result.output.len(),
                    samples.len(),
                    "Length invariant violated for len {} chunk {} ms",
                    len,
                    chunk_ms
                );
            }
        }
    }

    #[test]
    fn test_unvoiced_pass_is_surfaced_not_hidden() {
        // Sub-gate amplitude: every frame fails the voicing gate, the pass
        // degrades to pass-through and the diagnostics say so
        let samples = gen_sine(220.0, 48_000, 1.0, 0.001);
        let result = process(&samples, 48_000, scenario_config(), &ResampleShifter)
            .expect("Quiet input should still process");

        assert_eq!(result.diagnostics.voiced_frames, 0);
        assert!(result.diagnostics.total_frames > 0);
        for frame in &result.diagnostics.frames {
            assert_eq!(frame.shift_ratio, 1.0);
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let samples = gen_sine(220.0, 48_000, 0.5, 0.5);

        let mut config = scenario_config();
        config.gate_db = -5.0;
        let result = process(&samples, 48_000, config, &ResampleShifter);
        assert!(matches!(result, Err(CorrectionError::InvalidConfig(_))));
    }

    #[test]
    fn test_shift_primitive_failure_aborts_pass() {
        struct BrokenShifter;
        impl PitchShifter for BrokenShifter {
            fn shift(&self, _frame: &[f32], _ratio: f32) -> Result<Vec<f32>, CorrectionError> {
                Err(CorrectionError::ShiftPrimitive("device lost".to_string()))
            }
        }

        let samples = gen_sine(220.0, 48_000, 0.5, 0.5);
        let result = process(&samples, 48_000, scenario_config(), &BrokenShifter);
        assert!(matches!(result, Err(CorrectionError::ShiftPrimitive(_))));
    }

    #[test]
    fn test_amdf_strategy_end_to_end() {
        let samples = gen_sine(220.0, 48_000, 2.0, 0.5);
        let mut config = scenario_config();
        config.estimator = EstimatorMethod::Amdf;

        let result =
            process(&samples, 48_000, config, &ResampleShifter).expect("AMDF pass should succeed");

        assert_eq!(result.diagnostics.scale.root_pitch_class, 9);
        assert!(result.diagnostics.voiced_frames > 0);
        for frame in result.diagnostics.frames.iter().filter(|f| f.voiced) {
            assert!(
                (frame.shift_ratio - 1.0).abs() < 0.015,
                "AMDF ratio diverged at {}: {:.4}",
                frame.start_offset,
                frame.shift_ratio
            );
        }
    }

    #[test]
    fn test_passthrough_shifter_preserves_pitch_content() {
        // With a passthrough shifter the corrected buffer keeps the input's
        // pitch; the plan still reports what correction was wanted
        let samples = gen_sine(233.0, 48_000, 1.0, 0.4);
        let mut config = scenario_config();
        config.root_override = Some(9);

        let result = process(&samples, 48_000, config, &PassthroughShifter)
            .expect("Correction should succeed");

        assert!(result.diagnostics.voiced_frames > 0);
        assert!(result
            .diagnostics
            .frames
            .iter()
            .filter(|f| f.voiced)
            .all(|f| (f.shift_ratio - 1.0).abs() > 0.01));
    }

    #[test]
    fn test_diagnostics_serialize_to_json() {
        let samples = gen_sine(220.0, 48_000, 0.5, 0.5);
        let result = process(&samples, 48_000, scenario_config(), &ResampleShifter)
            .expect("Correction should succeed");

        let json = serde_json::to_string(&result.diagnostics).expect("Diagnostics should serialize");
        let parsed: retune_dsp::PassDiagnostics =
            serde_json::from_str(&json).expect("Diagnostics should deserialize");

        assert_eq!(parsed.total_frames, result.diagnostics.total_frames);
        assert_eq!(parsed.scale, result.diagnostics.scale);
    }

    #[test]
    fn test_wav_round_trip() {
        // Write a synthetic take to a WAV file, read it back the way a front
        // end would, and run the pass on the decoded samples
        let samples = gen_sine(220.0, 48_000, 1.0, 0.5);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = std::env::temp_dir().join("retune_dsp_test_take.wav");
        let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create WAV");
        for &sample in &samples {
            writer
                .write_sample((sample * 32_767.0) as i16)
                .expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");

        let mut reader = hound::WavReader::open(&path).expect("Failed to open WAV");
        let decoded: Vec<f32> = reader
            .samples::<i16>()
            .map(|s| s.expect("Failed to read sample") as f32 / 32_768.0)
            .collect();
        let _ = std::fs::remove_file(&path);

        let result = process(&decoded, 48_000, scenario_config(), &ResampleShifter)
            .expect("Decoded WAV should process");

        assert_eq!(result.output.len(), decoded.len());
        assert_eq!(result.diagnostics.scale.root_pitch_class, 9);
        assert!(result.diagnostics.voiced_frames > 0);
    }
}
