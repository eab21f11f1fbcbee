//! Headless simulation

use anyhow::{Context, Result, bail};
use fx_particles::{Technique, TechniqueStats};

use crate::cli::RunArgs;
use crate::commands::load_config;
use crate::utils::{add_table_row, create_table};

pub fn execute(args: RunArgs) -> Result<()> {
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        bail!("--seconds must be a non-negative number");
    }

    let mut config = load_config(&args.file)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let mut technique = Technique::from_config(config)
        .with_context(|| format!("Invalid technique in {}", args.file.display()))?;

    let dt = 1.0 / args.fps as f32;
    let frames = (f64::from(args.seconds) * f64::from(args.fps)).round() as u64;
    log::info!(
        "Running '{}' for {} frames at {} fps (seed {})",
        technique.name(),
        frames,
        args.fps,
        technique.seed()
    );

    let mut table = create_table(&["Time (s)", "Live", "Emitters", "Emitted"]);
    for frame in 1..=frames {
        technique.process(dt);

        if frame % u64::from(args.fps) == 0 || frame == frames {
            let seconds = frame as f64 / f64::from(args.fps);
            let stats = technique.stats();
            if args.json {
                println!("{}", stats_json(seconds, &stats));
            } else {
                add_table_row(
                    &mut table,
                    &[
                        format!("{seconds:.2}"),
                        stats.live_particles.to_string(),
                        stats.active_emitters.to_string(),
                        stats.total_emitted.to_string(),
                    ],
                );
            }
        }
    }

    if !args.json {
        println!("Technique: {}", technique.name());
        table.printstd();
    }
    Ok(())
}

fn stats_json(seconds: f64, stats: &TechniqueStats) -> serde_json::Value {
    serde_json::json!({
        "time": seconds,
        "live_particles": stats.live_particles,
        "active_emitters": stats.active_emitters,
        "total_emitted": stats.total_emitted,
    })
}
