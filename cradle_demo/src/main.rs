use pendulum_cradle::*;
use serde::Deserialize;
use std::env;
use std::fs;

mod visual;

/// Everything needed to set up a run, loadable from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub config: SimulationConfig,
    pub layout: CradleLayout,
}

fn load_settings(path: Option<&String>) -> Result<DemoSettings, String> {
    let Some(path) = path else {
        return Ok(DemoSettings::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let settings: DemoSettings =
        serde_json::from_str(&text).map_err(|e| format!("cannot parse {}: {}", path, e))?;
    settings.config.validate().map_err(|e| e.to_string())?;
    Ok(settings)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("headless");

    let settings = match load_settings(args.get(2)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return;
        }
    };

    println!("Running mode: {}", mode);

    match mode {
        "visual" => {
            if let Err(e) = visual::run_visual(settings) {
                eprintln!("Error running visual demo: {}", e);
            }
        }
        "headless" => run_headless(settings),
        _ => println!("Unknown mode: {}. Available modes: headless, visual", mode),
    }
}

fn run_headless(settings: DemoSettings) {
    let mut sim = match CradleSimulation::from_layout(settings.config, &settings.layout) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error building cradle: {}", e);
            return;
        }
    };

    println!("Simulating Newton's cradle with {} bodies", sim.len());
    for frame in 0..600 {
        sim.step(frame < 2);
        if frame % 60 == 0 {
            println!(
                "Frame {}: momentum={:.3}, energy={:.3}, contacts={}",
                frame,
                sim.total_momentum(),
                sim.kinetic_energy(),
                sim.contacts().len()
            );
        }
    }
    println!("Newton's cradle simulation finished.");
}
