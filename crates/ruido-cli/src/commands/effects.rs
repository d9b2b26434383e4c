//! Effect listing command.

use clap::Args;
use ruido_registry::EffectRegistry;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show pot labels for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: &EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    if let Some(id) = &args.effect {
        let descriptor = registry
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("unknown effect '{id}'"))?;

        println!("{} — {}", descriptor.name, descriptor.description);
        println!();
        for (index, label) in descriptor.pot_labels.iter().enumerate() {
            println!("  pot {index}: {label}");
        }
        if descriptor.is_generator {
            println!();
            println!("  (generator: synthesizes its own signal, input is ignored)");
        }
        println!();
        println!("  ruido describe {id} 0.5 0.5 0.5 0.5");
        println!("  ruido process {id} input.wav output.wav 0.5 0.5 0.5 0.5");
    } else {
        println!("Available effects:");
        println!();
        for descriptor in registry.all_effects() {
            let tag = if descriptor.is_generator {
                " [generator]"
            } else {
                ""
            };
            println!(
                "  {:12} - {}{tag}",
                descriptor.id, descriptor.description
            );
        }
        println!();
        println!("Use 'ruido effects <name>' for pot labels.");
    }

    Ok(())
}
