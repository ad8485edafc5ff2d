use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};

use rs_quadsim::io::{compare_particles, generate_particles, load_particles, save_particles, REFERENCE_TOLERANCE};
use rs_quadsim::particles::Simulation;
use rs_quadsim::utils::StepParameters;
use rs_quadsim::visualization::{dump_view, final_frame_path, frame_path, FrameOutputStyle};

/// Quadtree-accelerated particle simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of steps to simulate.
    #[arg(short = 'i', long, default_value_t = 1)]
    iterations: usize,

    /// Side length of the simulated space; the cull radius is a quarter of it.
    #[arg(short = 's', long, default_value_t = 10.0)]
    space_size: f32,

    /// Particle file to start from.
    #[arg(long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Number of random particles to generate when no input file is given.
    #[arg(short = 'n', long, default_value_t = 5)]
    num_particles: usize,

    /// Seed for generated particles.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Half-width of the area shown in exported frames.
    #[arg(short = 'v', long, default_value_t = 10.0)]
    viewport_radius: f32,

    /// Where the final particles are written.
    #[arg(short = 'o', long, default_value = "out.txt")]
    output: PathBuf,

    /// Directory frames are exported into.
    #[arg(long, value_name = "DIR")]
    frame_dir: Option<PathBuf>,

    /// Which frames to export when a frame directory is set.
    #[arg(long, value_enum, default_value_t = FrameOutputStyle::AllFrames)]
    frames: FrameOutputStyle,

    /// Reference answer to compare the final particles against.
    #[arg(long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Validate the quadtree after every build.
    #[arg(long)]
    check_tree: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let params = StepParameters::for_space_size(args.space_size);
    params.validate()?;

    let particles = match &args.input {
        Some(path) => load_particles(path)?,
        None => {
            warn!(
                "no input file given, generating {} particles (seed {})",
                args.num_particles, args.seed
            );
            generate_particles(args.num_particles, args.space_size, args.seed)
        }
    };

    info!(
        "simulating {} particles for {} iterations (dt = {}, cull radius = {})",
        particles.len(),
        args.iterations,
        params.delta_time,
        params.cull_radius
    );

    let frame_style = match &args.frame_dir {
        Some(_) => args.frames,
        None => FrameOutputStyle::None,
    };

    let mut sim = Simulation::new(particles, params)?.with_tree_check(args.check_tree);

    let mut total_tree_time = 0.0;
    let mut total_sim_time = 0.0;
    for i in 0..args.iterations {
        let timer = Instant::now();
        let tree = sim.build_tree()?;
        let tree_time = timer.elapsed().as_secs_f64() * 1000.0;

        let timer = Instant::now();
        sim.step_with_tree(&tree);
        let sim_time = timer.elapsed().as_secs_f64() * 1000.0;
        drop(tree);

        total_tree_time += tree_time;
        total_sim_time += sim_time;
        println!(
            "iteration {}, tree construction: {:.6}ms, simulation: {:.6}ms",
            i, tree_time, sim_time
        );

        if let (FrameOutputStyle::AllFrames, Some(dir)) = (frame_style, &args.frame_dir) {
            dump_view(frame_path(dir, i), args.viewport_radius, sim.particles())?;
        }
    }

    println!(
        "TOTAL TIME: {:.6}ms\ntotal tree construction time: {:.6}ms\ntotal simulation time: {:.6}ms",
        total_tree_time + total_sim_time,
        total_tree_time,
        total_sim_time
    );

    if let (FrameOutputStyle::FinalFrameOnly, Some(dir)) = (frame_style, &args.frame_dir) {
        dump_view(final_frame_path(dir), args.viewport_radius, sim.particles())?;
    }

    save_particles(&args.output, sim.particles())?;

    if let Some(reference) = &args.reference {
        let expected = load_particles(reference)?;
        match compare_particles(sim.particles(), &expected, REFERENCE_TOLERANCE) {
            Ok(()) => println!("Result matches reference {}", reference.display()),
            Err(e) => {
                error!("result differs from reference {}: {}", reference.display(), e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
