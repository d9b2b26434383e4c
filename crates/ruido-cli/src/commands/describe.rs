//! Parameter diagnostic command: what does this pot vector mean?

use clap::Args;
use ruido_core::Pots;
use ruido_registry::EffectRegistry;

#[derive(Args)]
pub struct DescribeArgs {
    /// Effect id (see `ruido effects`)
    #[arg(value_name = "EFFECT")]
    effect: String,

    /// Up to four pot values in [0, 1]; missing pots default to 0.5
    #[arg(value_name = "POT")]
    pots: Vec<f32>,
}

pub fn run(args: &DescribeArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.pots.len() <= 4,
        "too many pot values ({}); an effect has exactly four",
        args.pots.len()
    );

    let registry = EffectRegistry::new();
    let effect = registry
        .create(&args.effect, 48000.0)
        .ok_or_else(|| anyhow::anyhow!("unknown effect '{}'", args.effect))?;

    let mut values = [0.5f32; 4];
    for (slot, &value) in values.iter_mut().zip(&args.pots) {
        *slot = value;
    }
    let pots = Pots::new(values);

    println!("{}: {}", args.effect, effect.describe(&pots));
    Ok(())
}
