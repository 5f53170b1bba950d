use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use gyroid::{
    GenerationParameters, MeshFormat, Settings, ThreadPool, Trim, Variant,
};

/// Gyroid lattice generator
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    params: ParamArgs,

    /// TOML file of generation parameters
    ///
    /// When given, shape parameters on the command line are ignored.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Name of a `.stl` or `.obj` file to write
    #[clap(short, long)]
    out: Option<PathBuf>,

    /// Output format (inferred from `--out` by default)
    #[clap(long)]
    format: Option<MeshFormat>,

    /// Number of threads to use
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    /// Number of times to generate (for benchmarking)
    #[clap(short = 'N', default_value_t = NonZeroUsize::MIN)]
    n: NonZeroUsize,
}

/// Shape parameters; anything left unset keeps its default
#[derive(Parser)]
struct ParamArgs {
    /// Samples per axis
    #[clap(short, long)]
    resolution: Option<usize>,

    /// Domain extent along the first axis
    #[clap(short, long)]
    a: Option<f32>,

    /// Domain extent along the second axis
    #[clap(short, long)]
    b: Option<f32>,

    /// Domain extent along the vertical axis
    #[clap(short, long)]
    c: Option<f32>,

    /// Radius at the start of the first axis
    #[clap(long)]
    r1: Option<f32>,

    /// Radius at the end of the first axis
    #[clap(long)]
    r2: Option<f32>,

    /// Angular frequency multiplier
    #[clap(long)]
    phi_scale: Option<f32>,

    /// Shell thickness for the `band` trim
    #[clap(long)]
    wall_thickness: Option<f32>,

    /// Cells across the radial and angular axes
    #[clap(long)]
    cell_radius: Option<f32>,

    /// Cells along the vertical axis
    #[clap(long)]
    cell_height: Option<f32>,

    /// Frequency multiplier for `cartesian` and `diamond` shapes
    #[clap(long)]
    density: Option<f32>,

    /// Shape variant (`radial`, `cartesian`, or `diamond`)
    #[clap(long)]
    variant: Option<Variant>,

    /// Trim policy (`none`, `band`, or `bound`)
    #[clap(long)]
    trim: Option<Trim>,

    /// Close the surface against the trim boundary
    #[clap(long)]
    caps: bool,

    /// Replace the field `f` with `|f| - t`, producing a sheet lattice
    #[clap(long)]
    sheet_thickness: Option<f32>,

    /// Average this many rotated copies of the field
    #[clap(long)]
    arc_count: Option<u32>,
}

impl ParamArgs {
    fn build(self) -> GenerationParameters {
        let d = GenerationParameters::default();
        GenerationParameters {
            resolution: self.resolution.unwrap_or(d.resolution),
            a: self.a.unwrap_or(d.a),
            b: self.b.unwrap_or(d.b),
            c: self.c.unwrap_or(d.c),
            r1: self.r1.unwrap_or(d.r1),
            r2: self.r2.unwrap_or(d.r2),
            phi_scale: self.phi_scale.unwrap_or(d.phi_scale),
            wall_thickness: self.wall_thickness.unwrap_or(d.wall_thickness),
            cell_radius: self.cell_radius.unwrap_or(d.cell_radius),
            cell_height: self.cell_height.unwrap_or(d.cell_height),
            density: self.density.unwrap_or(d.density),
            variant: self.variant.unwrap_or(d.variant),
            trim: self.trim.unwrap_or(d.trim),
            caps: self.caps || d.caps,
            sheet_thickness: self.sheet_thickness.or(d.sheet_thickness),
            arc_count: self.arc_count.or(d.arc_count),
        }
    }
}

fn load_config(path: &Path) -> Result<GenerationParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {path:?}"))?;
    let params = toml::from_str(&text)
        .with_context(|| format!("could not parse {path:?}"))?;
    Ok(params)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    let params = match &args.config {
        Some(path) => {
            let params = load_config(path)?;
            info!("Loaded parameters from {path:?}");
            params
        }
        None => args.params.build(),
    };
    params.validate()?;
    info!(
        "Generating {} lattice at {}³ ({} trim)",
        params.variant, params.resolution, params.trim
    );

    // Resolve the output format before doing any work
    let format = match (&args.out, args.format) {
        (_, Some(f)) => Some(f),
        (Some(out), None) => Some(MeshFormat::from_path(out)?),
        (None, None) => None,
    };

    let pool = match args.threads {
        Some(n) if n.get() > 1 => Some(ThreadPool::Custom(
            rayon::ThreadPoolBuilder::new().num_threads(n.get()).build()?,
        )),
        _ => None,
    };
    let settings = Settings {
        threads: pool.as_ref(),
    };

    let start = Instant::now();
    let mut mesh = gyroid::generate_with(&params, &settings)?;
    for _ in 1..args.n.get() {
        mesh = gyroid::generate_with(&params, &settings)?;
    }
    info!(
        "Generated {}x at {:?} ms/iter",
        args.n,
        start.elapsed().as_micros() as f64 / 1000.0 / (args.n.get() as f64)
    );
    info!(
        "Mesh has {} vertices, {} faces ({} quads)",
        mesh.vertices.len(),
        mesh.faces.len(),
        mesh.quad_count()
    );

    if let (Some(out), Some(format)) = (args.out, format) {
        if mesh.is_empty() {
            warn!("Mesh is empty; not writing {out:?}");
        } else {
            let start = Instant::now();
            info!("Writing {format} to {out:?}");
            gyroid::export(&mesh, &out, format)?;
            info!("Wrote file in {:?}", start.elapsed());
        }
    }

    Ok(())
}
