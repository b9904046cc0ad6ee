use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

use maskface::{
    AnimationResource, DisplaySink, EventLoop, FaceConfig, GContext, ManualClock, NullSink,
    PngSequenceSink, ResourceStore, StopWhen, SystemClock, Watchface, probe_sequence,
};

#[derive(Parser, Debug)]
#[command(name = "maskface", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the watchface in real time.
    Run(RunArgs),
    /// Render the first repaints as PNGs without waiting on the wall clock.
    Snapshot(SnapshotArgs),
    /// Print the size, frame count and delays of an animation.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Animation PNG/APNG (overrides the config's resource manifest).
    #[arg(long)]
    animation: Option<PathBuf>,

    /// Face config JSON; resource paths resolve relative to its directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Stop after this many completed passes.
    #[arg(long)]
    passes: Option<u64>,

    /// Stop after this many seconds.
    #[arg(long)]
    seconds: Option<f64>,

    /// Also write every repaint as a PNG into this directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory for frame_00000.png, frame_00001.png, ...
    #[arg(long)]
    out: PathBuf,

    /// Number of repaints to write.
    #[arg(long, default_value_t = 30)]
    redraws: u64,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: &Path) -> anyhow::Result<FaceConfig> {
    let f = File::open(path).with_context(|| format!("open face config '{}'", path.display()))?;
    let cfg: FaceConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse face config JSON")?;
    cfg.validate()?;
    Ok(cfg)
}

fn load_face(source: &SourceArgs) -> anyhow::Result<(FaceConfig, AnimationResource)> {
    let (cfg, root) = match &source.config {
        Some(path) => (
            read_config(path)?,
            path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        ),
        None => (FaceConfig::default(), PathBuf::from(".")),
    };

    let resource = match &source.animation {
        Some(path) => AnimationResource::from_path(cfg.animation.clone(), path)?,
        None => {
            if cfg.resources.is_empty() {
                anyhow::bail!("pass --animation, or a --config whose resources list the animation");
            }
            let store = ResourceStore::prepare(&cfg, root)?;
            store.get(&cfg.animation)?.clone()
        }
    };
    Ok((cfg, resource))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let (cfg, resource) = load_face(&args.source)?;

    let stop = match (args.passes, args.seconds) {
        (Some(n), _) => StopWhen::Passes(n),
        (None, Some(secs)) => StopWhen::Elapsed(
            Duration::try_from_secs_f64(secs).with_context(|| format!("invalid --seconds {secs}"))?,
        ),
        (None, None) => StopWhen::Never,
    };
    let mut sink: Box<dyn DisplaySink> = match &args.out {
        Some(dir) => Box::new(PngSequenceSink::new(dir)?),
        None => Box::new(NullSink),
    };

    let mut face = Watchface::new(resource, &cfg);
    let mut ctx = GContext::for_display();
    let mut ev = EventLoop::new(SystemClock::new());
    let summary = ev.run(&mut face, &mut ctx, sink.as_mut(), stop)?;

    eprintln!(
        "played {} passes, {} repaints in {:.2}s",
        summary.passes,
        summary.redraws,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let (cfg, resource) = load_face(&args.source)?;

    let mut sink = PngSequenceSink::new(&args.out)?.with_limit(args.redraws);
    let mut face = Watchface::new(resource, &cfg);
    let mut ctx = GContext::for_display();
    let mut ev = EventLoop::new(ManualClock::new());
    ev.run(&mut face, &mut ctx, &mut sink, StopWhen::Redraws(args.redraws))?;

    eprintln!("wrote {} frames to {}", sink.written(), args.out.display());
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let (_, resource) = load_face(&args.source)?;
    let info = probe_sequence(&resource)
        .with_context(|| format!("probe resource '{}'", resource.id()))?;

    println!("size:   {}", info.size);
    println!("frames: {}", info.frame_count());
    println!("total:  {} ms", info.total_ms());
    let delays: Vec<String> = info.delays.iter().map(|d| d.0.to_string()).collect();
    println!("delays: [{}]", delays.join(", "));
    Ok(())
}
