//! animtoo: run curve cleanup tools over a JSON scene.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use animtoo_curves::host::selected_curves;
use animtoo_curves::{
    cleanup_selection, loop_selection, offset_selection, parse_scene_json, round_key_values,
    undoable, CurveError, MemoryScene, ObjectHandle, OffsetMode, ReduceConfig,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "animtoo",
    about = "Animation curve cleanup tools for JSON scene snapshots."
)]
struct Opt {
    /// Scene JSON to edit
    #[structopt(parse(from_os_str))]
    scene: PathBuf,

    /// Where to write the edited scene (stdout when omitted)
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Operate on these objects instead of the selection saved in the scene
    #[structopt(long = "select", number_of_values = 1)]
    select: Vec<String>,

    /// Log per-curve detail
    #[structopt(short, long)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Remove redundant keys
    Reduce {
        /// Max. difference for two values to count as equal
        #[structopt(long)]
        tolerance: Option<f64>,
        /// Treat curves as stepped
        #[structopt(long)]
        stepped: bool,
        /// Treat curves as smooth even if the config says stepped
        #[structopt(long, conflicts_with = "stepped")]
        no_stepped: bool,
        /// Also remove a final key that repeats its predecessor
        #[structopt(long)]
        drop_last: bool,
        /// Never remove the final key, even if the config says otherwise
        #[structopt(long, conflicts_with = "drop-last")]
        keep_last: bool,
        /// JSON file holding a reduce config; flags override it
        #[structopt(long, parse(from_os_str))]
        config: Option<PathBuf>,
    },
    /// Round key values to whole numbers
    Round,
    /// Shift the animation of each selected object in time
    Offset {
        /// Same offset for every object
        #[structopt(long, allow_hyphen_values = true)]
        by: Option<f64>,
        /// With --by: keep each curve's first and last key times
        #[structopt(long, requires = "by")]
        keep_range: bool,
        /// Growing offset: previous offset plus a random step in [MIN, MAX]
        #[structopt(long, number_of_values = 2, value_names = &["MIN", "MAX"])]
        progressive: Option<Vec<i64>>,
        /// Random whole-frame offset in [0, MAX)
        #[structopt(long)]
        random: Option<i64>,
        /// Seed for the random modes
        #[structopt(long)]
        seed: Option<u64>,
    },
    /// Append one more cycle to each curve
    Loop,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let default_level = if opt.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut scene = load_scene(&opt.scene)?;

    let report = run(&mut scene, &opt.select, &opt.cmd)?;
    info!("{}", serde_json::to_string(&report)?);

    let out = scene.to_json()?;
    match &opt.output {
        Some(path) => write_scene(path, &out)?,
        None => println!("{out}"),
    }
    Ok(())
}

/// Apply one command to `scene` and return its report as JSON.
fn run(scene: &mut MemoryScene, select: &[String], cmd: &Command) -> Result<serde_json::Value> {
    if !select.is_empty() {
        let names: Vec<ObjectHandle> = select
            .iter()
            .map(|s| ObjectHandle::from(s.as_str()))
            .collect();
        scene.select(&names);
    }

    let report = match cmd {
        Command::Reduce {
            tolerance,
            stepped,
            no_stepped,
            drop_last,
            keep_last,
            config,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(path)?,
                None => ReduceConfig::default(),
            };
            if let Some(t) = tolerance {
                cfg.tolerance = *t;
            }
            if *stepped {
                cfg.stepped = true;
            } else if *no_stepped {
                cfg.stepped = false;
            }
            if *drop_last {
                cfg.keep_last = false;
            } else if *keep_last {
                cfg.keep_last = true;
            }
            debug!("reduce config: {cfg:?}");
            serde_json::to_value(cleanup_selection(scene, &cfg)?)?
        }
        Command::Round => {
            let report = undoable(scene, |s| -> Result<_, CurveError> {
                let (_, curves) = selected_curves(&*s)?;
                Ok(round_key_values(s, &curves))
            })?;
            serde_json::to_value(report)?
        }
        Command::Offset {
            by,
            keep_range,
            progressive,
            random,
            seed,
        } => {
            let mode = match offset_mode(*by, progressive.as_deref(), *random)? {
                OffsetMode::Fixed { offset } if *keep_range => OffsetMode::KeepRange { offset },
                mode => mode,
            };
            let seed = seed.unwrap_or_else(time_seed);
            debug!("offset {mode:?} with seed {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            serde_json::to_value(offset_selection(scene, &mode, &mut rng)?)?
        }
        Command::Loop => serde_json::to_value(loop_selection(scene)?)?,
    };

    if report
        .get("failures")
        .and_then(|f| f.as_array())
        .is_some_and(|f| !f.is_empty())
    {
        warn!("some curves could not be edited; see report");
    }
    Ok(report)
}

fn offset_mode(
    by: Option<f64>,
    progressive: Option<&[i64]>,
    random: Option<i64>,
) -> Result<OffsetMode> {
    match (by, progressive, random) {
        (Some(offset), None, None) => Ok(OffsetMode::Fixed { offset }),
        (None, Some([min, max]), None) => Ok(OffsetMode::Progressive {
            min: *min,
            max: *max,
        }),
        (None, Some(other), None) => Err(anyhow!(
            "--progressive takes MIN and MAX, got {} values",
            other.len()
        )),
        (None, None, Some(max)) => Ok(OffsetMode::Random { max }),
        _ => bail!("choose exactly one of --by, --progressive or --random"),
    }
}

fn load_scene(path: &Path) -> Result<MemoryScene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    parse_scene_json(&text).with_context(|| format!("failed to load scene {}", path.display()))
}

fn load_config(path: &Path) -> Result<ReduceConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn write_scene(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("failed to write scene {}", path.display()))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
