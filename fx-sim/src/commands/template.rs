//! Example technique description

use anyhow::{Context, Result};
use fx_particles::{
    Affector, AffectorKind, Color, ColorMode, EmitterConfig, EmitterShape, Gravity, Interpolation,
    Parameter, Scale, TechniqueConfig, TimeColor,
};
use glam::Vec3;
use std::fs;
use std::path::Path;

pub fn execute(output: Option<&Path>) -> Result<()> {
    let json = example()
        .to_json_pretty()
        .context("Failed to serialize example technique")?;

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote example technique to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn example() -> TechniqueConfig {
    TechniqueConfig {
        name: "fountain".to_string(),
        seed: 1,
        emitters: vec![EmitterConfig {
            emission_rate: Parameter::fixed(40.0),
            time_to_live: Parameter::random(1.5, 2.5),
            velocity: Parameter::random(4.0, 6.0),
            angle: Parameter::fixed(15.0),
            particle_width: Some(Parameter::fixed(0.2)),
            particle_height: Some(Parameter::fixed(0.2)),
            color: Color::rgb(120, 180, 255),
            ..EmitterConfig::new(
                "spout",
                EmitterShape::Circle {
                    radius: Parameter::fixed(0.1),
                    step: 0.0,
                    random: true,
                },
            )
        }],
        affectors: vec![
            Affector::new("fall", AffectorKind::Gravity(Gravity::default()))
                .at(Vec3::new(0.0, -20.0, 0.0))
                .with_mass(30.0),
            Affector::new(
                "fade",
                AffectorKind::Color(TimeColor::new(
                    ColorMode::Multiply,
                    [
                        (0.0, Color::WHITE),
                        (1.0, Color::rgba(255, 255, 255, 0)),
                    ],
                )),
            ),
            Affector::new(
                "spread",
                AffectorKind::Scale(Scale::uniform(Parameter::curved(
                    Interpolation::Linear,
                    [(0.0, 1.0), (1.0, 2.5)],
                ))),
            ),
        ],
        ..Default::default()
    }
}
