//! Offline file processing: the block-cadence host loop.
//!
//! Samples stream through the active effect one at a time; parameters are
//! re-derived from the latest pot snapshot once per block, never
//! mid-block. That boundary is what makes the lock-free control channel
//! safe: within a block the parameters are frozen, and a control write
//! lands at the next block edge at the latest.

use crate::control::{parse_pot_value, pots_from_args, spawn_stdin_control};
use crate::preset::Preset;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use ruido_core::SharedPots;
use ruido_io::{WavSpec, read_raw, read_wav, write_raw, write_wav};
use ruido_registry::EffectRegistry;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Args)]
pub struct ProcessArgs {
    /// Effect id (see `ruido effects`), or a .toml preset file
    #[arg(value_name = "EFFECT")]
    effect: String,

    /// Input file: .wav, or raw signed 32-bit PCM otherwise
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file: .wav, or raw signed 32-bit PCM otherwise
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Up to four pot values in [0, 1]; missing pots default to 0.5
    #[arg(value_name = "POT", value_parser = parse_pot_value)]
    pots: Vec<f32>,

    /// Read live pot updates (p<idx><dd>) from stdin
    #[arg(long)]
    control: bool,

    /// Samples per parameter block
    #[arg(long, default_value = "200")]
    block_size: usize,

    /// Sample rate for raw PCM input (WAV input carries its own)
    #[arg(long, default_value = "48000")]
    sample_rate: u32,
}

fn is_wav(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be positive");
    anyhow::ensure!(
        args.pots.len() <= 4,
        "too many pot values ({}); an effect has exactly four",
        args.pots.len()
    );

    // The EFFECT argument is either a registry id or a preset document
    let (effect_id, initial_pots) = if args.effect.ends_with(".toml") {
        anyhow::ensure!(
            args.pots.is_empty(),
            "pot values conflict with a preset; edit the preset instead"
        );
        let preset = Preset::load(Path::new(&args.effect))?;
        match &preset.description {
            Some(text) => info!(preset = %preset.name, "{text}"),
            None => info!(preset = %preset.name, "loaded preset"),
        }
        (preset.effect.clone(), preset.pots())
    } else {
        (args.effect.clone(), pots_from_args(&args.pots))
    };

    // Load input
    let (samples, sample_rate) = if is_wav(&args.input) {
        let (samples, spec) = read_wav(&args.input)?;
        (samples, spec.sample_rate)
    } else {
        let file = File::open(&args.input)
            .map_err(|e| anyhow::anyhow!("opening {}: {e}", args.input.display()))?;
        (read_raw(file)?, args.sample_rate)
    };
    info!(
        input = %args.input.display(),
        samples = samples.len(),
        sample_rate,
        "loaded input"
    );

    let registry = EffectRegistry::new();
    let mut effect = registry
        .create(&effect_id, sample_rate as f32)
        .ok_or_else(|| anyhow::anyhow!("unknown effect '{effect_id}'"))?;

    info!("{effect_id}: {}", effect.describe(&initial_pots));

    // Shared pot storage: the audio loop snapshots once per block, the
    // control thread (if any) stores asynchronously
    let shared = Arc::new(SharedPots::new(initial_pots));
    if args.control {
        let mirror = registry
            .create(&effect_id, sample_rate as f32)
            .expect("id resolved above");
        spawn_stdin_control(Arc::clone(&shared), mirror);
    }

    // Ctrl-C finishes the current block, then stops cleanly
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;
    }

    let progress = ProgressBar::new(samples.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output = Vec::with_capacity(samples.len());
    let mut processed = 0usize;

    for block in samples.chunks(args.block_size) {
        if stop.load(Ordering::Relaxed) {
            info!("stopped at sample {processed}");
            break;
        }

        // Block boundary: freeze the latest pots into parameters
        effect.init(&shared.snapshot());

        for &sample in block {
            output.push(effect.step(sample));
        }
        processed += block.len();
        progress.set_position(processed as u64);
    }
    progress.finish_and_clear();

    log_levels(&samples[..processed.min(samples.len())], &output);

    // Write output
    if is_wav(&args.output) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
        };
        write_wav(&args.output, &output, spec)?;
    } else {
        let file = File::create(&args.output)
            .map_err(|e| anyhow::anyhow!("creating {}: {e}", args.output.display()))?;
        write_raw(file, &output)?;
    }
    info!(output = %args.output.display(), samples = output.len(), "wrote output");

    Ok(())
}

/// Input/output RMS and peak, logged rather than computed inline so the
/// numbers land next to the rest of the run's diagnostics.
fn log_levels(input: &[f32], output: &[f32]) {
    fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }
    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
    fn db(linear: f32) -> f32 {
        if linear <= 0.0 {
            -120.0
        } else {
            20.0 * linear.log10()
        }
    }

    info!(
        in_rms_db = format!("{:.1}", db(rms(input))),
        in_peak_db = format!("{:.1}", db(peak(input))),
        out_rms_db = format!("{:.1}", db(rms(output))),
        out_peak_db = format!("{:.1}", db(peak(output))),
        "levels"
    );
}
