//! End-to-end tests driving the `ruido` binary.

use std::process::Command;

/// Path to the binary cargo built for this test run.
fn ruido_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ruido"))
}

/// Write a raw s32 PCM sine file and return its path.
fn write_sine_raw(dir: &std::path::Path, name: &str, freq: f32, seconds: f32) -> std::path::PathBuf {
    let sr = 48000.0;
    let count = (sr * seconds) as usize;
    let mut bytes = Vec::with_capacity(count * 4);
    for n in 0..count {
        let value = 0.5 * (core::f32::consts::TAU * freq * n as f32 / sr).sin();
        let wire = (value * 2_147_483_648.0) as i32;
        bytes.extend_from_slice(&wire.to_le_bytes());
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn read_raw_samples(path: &std::path::Path) -> Vec<f32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f32 / 2_147_483_648.0)
        .collect()
}

// ---------------------------------------------------------------------------
// `ruido effects`
// ---------------------------------------------------------------------------

#[test]
fn effects_lists_the_whole_registry() {
    let output = ruido_bin().arg("effects").output().expect("run failed");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "formant",
        "braid",
        "pitch_shift",
        "tremolo",
        "chorus",
        "distortion",
        "am",
        "fm",
        "probe",
    ] {
        assert!(stdout.contains(id), "listing is missing '{id}'");
    }
    // Generators are tagged so the silence behavior is discoverable
    assert!(stdout.contains("[generator]"));
}

#[test]
fn effects_detail_shows_pot_labels() {
    let output = ruido_bin()
        .args(["effects", "braid"])
        .output()
        .expect("run failed");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("coupling"));
    assert!(stdout.contains("pot 3"));
}

#[test]
fn unknown_effect_fails_with_message() {
    let output = ruido_bin()
        .args(["effects", "reverb"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown effect"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// `ruido describe`
// ---------------------------------------------------------------------------

#[test]
fn describe_prints_derived_parameters() {
    let output = ruido_bin()
        .args(["describe", "tremolo", "1.0", "0.5"])
        .output()
        .expect("run failed");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // pot0 = 1 → 10.5 Hz
    assert!(stdout.contains("lfo=10.50 Hz"), "stdout: {stdout}");
    assert!(stdout.contains("depth=0.50"), "stdout: {stdout}");
}

#[test]
fn describe_defaults_missing_pots_to_center() {
    let output = ruido_bin()
        .args(["describe", "distortion"])
        .output()
        .expect("run failed");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("drive=25.5x"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// `ruido process`
// ---------------------------------------------------------------------------

#[test]
fn process_raw_through_tremolo_modulates_amplitude() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sine_raw(dir.path(), "in.pcm", 440.0, 0.5);
    let output_path = dir.path().join("out.pcm");

    let status = ruido_bin()
        .args([
            "process",
            "tremolo",
            input.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "1.0",
            "1.0",
        ])
        .status()
        .expect("run failed");
    assert!(status.success());

    let samples = read_raw_samples(&output_path);
    assert_eq!(samples.len(), 24000);

    // Full-depth tremolo at 10.5 Hz: output envelope dips near zero and
    // recovers to near the input level within the half second
    let peak = samples.iter().fold(0.0f32, |a, s| a.max(s.abs()));
    assert!(peak > 0.4, "peak {peak}");
    // A plain copy would have constant envelope; look for a deep trough
    let window = 2000; // ~40 ms, less than one LFO period
    let mut min_window_peak = f32::MAX;
    for chunk in samples.chunks(window) {
        let wp = chunk.iter().fold(0.0f32, |a, s| a.max(s.abs()));
        min_window_peak = min_window_peak.min(wp);
    }
    assert!(min_window_peak < 0.2, "no tremolo trough: {min_window_peak}");
}

#[test]
fn process_wav_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");

    let sr = 48000u32;
    let samples: Vec<f32> = (0..24000)
        .map(|n| 0.5 * (core::f32::consts::TAU * 440.0 * n as f32 / sr as f32).sin())
        .collect();
    ruido_io::write_wav(&input, &samples, ruido_io::WavSpec::default()).unwrap();

    let status = ruido_bin()
        .args([
            "process",
            "distortion",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "1.0",
            "0.5",
            "1.0",
            "0.0",
        ])
        .status()
        .expect("run failed");
    assert!(status.success());

    let (processed, spec) = ruido_io::read_wav(&output).unwrap();
    assert_eq!(spec.sample_rate, sr);
    assert_eq!(processed.len(), samples.len());
    assert!(processed.iter().all(|s| s.is_finite()));
    // Heavy soft clipping flattens the crest: output peak well below a
    // linear 50x gain
    let peak = processed.iter().fold(0.0f32, |a, s| a.max(s.abs()));
    assert!(peak <= 1.0, "peak {peak}");
}

#[test]
fn process_generator_sings_over_silence() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silence.pcm");
    std::fs::write(&input, vec![0u8; 24000 * 4]).unwrap();
    let output = dir.path().join("tone.pcm");

    let status = ruido_bin()
        .args([
            "process",
            "am",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "0.5",
            "0.5",
            "0.5",
            "1.0",
        ])
        .status()
        .expect("run failed");
    assert!(status.success());

    let samples = read_raw_samples(&output);
    let energy: f32 = samples.iter().map(|s| s * s).sum();
    assert!(energy > 100.0, "generator produced energy {energy}");
}

#[test]
fn process_preset_file() {
    let dir = tempfile::tempdir().unwrap();
    let preset = dir.path().join("growl.toml");
    std::fs::write(
        &preset,
        r#"
name = "warm growl"
effect = "braid"
pots = [0.4, 0.8, 0.3, 0.9]
"#,
    )
    .unwrap();

    let input = write_sine_raw(dir.path(), "in.pcm", 110.0, 0.25);
    let output = dir.path().join("out.pcm");

    let status = ruido_bin()
        .args([
            "process",
            preset.to_str().unwrap(),
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .status()
        .expect("run failed");
    assert!(status.success());

    let samples = read_raw_samples(&output);
    assert_eq!(samples.len(), 12000);
    assert!(samples.iter().all(|s| s.is_finite()));
}

#[test]
fn process_rejects_unknown_effect() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sine_raw(dir.path(), "in.pcm", 440.0, 0.01);
    let output = dir.path().join("out.pcm");

    let result = ruido_bin()
        .args([
            "process",
            "octaver",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .output()
        .expect("run failed");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("unknown effect"), "stderr: {stderr}");
}

#[test]
fn process_rejects_out_of_range_pot() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sine_raw(dir.path(), "in.pcm", 440.0, 0.01);
    let output = dir.path().join("out.pcm");

    let result = ruido_bin()
        .args([
            "process",
            "tremolo",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "1.5",
        ])
        .output()
        .expect("run failed");
    assert!(!result.status.success());
}

#[test]
fn control_channel_applies_mid_stream_updates() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempfile::tempdir().unwrap();
    // Long enough that control input lands while blocks are still flowing
    let input = write_sine_raw(dir.path(), "in.pcm", 440.0, 1.0);
    let output = dir.path().join("out.pcm");

    let mut child = ruido_bin()
        .args([
            "process",
            "tremolo",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "0.0",
            "0.0",
            "--control",
        ])
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn failed");

    // Valid update plus garbage that must be dropped, not fatal
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"p199\nnonsense\n")
        .unwrap();

    let result = child.wait_with_output().expect("wait failed");
    assert!(result.status.success());

    let samples = read_raw_samples(&output);
    assert_eq!(samples.len(), 48000);
    assert!(samples.iter().all(|s| s.is_finite()));
}
