//! Technique description validation

use anyhow::{Context, Result};
use fx_particles::Technique;
use std::path::Path;

use crate::commands::load_config;
use crate::utils::{add_table_row, create_table};

pub fn execute(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    let technique = Technique::from_config(config)
        .with_context(|| format!("Invalid technique in {}", path.display()))?;

    println!("Technique '{}' is valid", technique.name());
    println!(
        "Seed: {}  Particle quota: {}",
        technique.seed(),
        technique.particle_quota()
    );

    let mut emitters = create_table(&["Emitter", "Shape", "Rate (mean/s)", "Duration", "Repeat"]);
    for emitter in technique.all_emitters() {
        let config = emitter.config();
        let describe = |p: &Option<fx_particles::Parameter>| {
            p.as_ref()
                .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p.mean()))
        };
        add_table_row(
            &mut emitters,
            &[
                emitter.name().to_string(),
                config.shape.type_name().to_string(),
                format!("{:.2}", config.emission_rate.mean()),
                describe(&config.duration),
                describe(&config.repeat_delay),
            ],
        );
    }
    println!();
    emitters.printstd();

    if !technique.affectors().is_empty() {
        let mut affectors = create_table(&["Affector", "Type", "Enabled", "Excludes"]);
        for affector in technique.affectors() {
            let excluded: Vec<&str> = affector
                .excluded_emitters
                .iter()
                .map(String::as_str)
                .collect();
            add_table_row(
                &mut affectors,
                &[
                    affector.name.clone(),
                    affector.kind.type_name().to_string(),
                    affector.enabled.to_string(),
                    if excluded.is_empty() {
                        "-".to_string()
                    } else {
                        excluded.join(", ")
                    },
                ],
            );
        }
        println!();
        affectors.printstd();
    }

    Ok(())
}
