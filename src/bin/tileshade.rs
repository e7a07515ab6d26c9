use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tileshade::{
    Color, GradientKernel, KernelConfig, PartitionScheme, RenderConfig, RenderOptions, Renderer,
};

#[derive(Parser, Debug)]
#[command(name = "tileshade", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a kernel into a PNG.
    Render(RenderArgs),
    /// Print the tiles a render would use.
    Tiles(TilesArgs),
}

#[derive(Args, Debug)]
struct PartitionArgs {
    /// Worker thread count.
    #[arg(long)]
    workers: Option<usize>,

    /// Partition scheme.
    #[arg(long, value_enum)]
    partition: Option<PartitionChoice>,

    /// Grid columns (with `--partition grid`).
    #[arg(long, default_value_t = 4)]
    grid_columns: u32,

    /// Grid rows (with `--partition grid`).
    #[arg(long, default_value_t = 4)]
    grid_rows: u32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Render config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Channels per pixel (1-4).
    #[arg(long)]
    channels: Option<usize>,

    /// Kernel to render (with default parameters).
    #[arg(long, value_enum)]
    kernel: Option<KernelChoice>,

    #[command(flatten)]
    partition: PartitionArgs,
}

#[derive(Parser, Debug)]
struct TilesArgs {
    /// Image width in pixels.
    #[arg(long)]
    width: u32,

    /// Image height in pixels.
    #[arg(long)]
    height: u32,

    #[command(flatten)]
    partition: PartitionArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PartitionChoice {
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelChoice {
    Beam,
    Solid,
    Gradient,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Tiles(args) => cmd_tiles(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

impl PartitionArgs {
    fn apply(&self, opts: &mut RenderOptions) {
        if let Some(n) = self.workers {
            opts.workers = n;
        }
        if let Some(choice) = self.partition {
            opts.partition = match choice {
                PartitionChoice::Vertical => PartitionScheme::VerticalStrips,
                PartitionChoice::Horizontal => PartitionScheme::HorizontalStrips,
                PartitionChoice::Grid => PartitionScheme::Grid {
                    columns: self.grid_columns,
                    rows: self.grid_rows,
                },
            };
        }
    }
}

fn kernel_config(choice: KernelChoice) -> KernelConfig {
    match choice {
        KernelChoice::Beam => KernelConfig::default(),
        KernelChoice::Solid => KernelConfig::Solid {
            color: Color::rgb(0.5, 0.5, 0.5),
        },
        KernelChoice::Gradient => KernelConfig::Gradient(GradientKernel::default()),
    }
}

fn resolve_config(args: &RenderArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => {
            let (Some(width), Some(height)) = (args.width, args.height) else {
                anyhow::bail!("--width and --height are required without --config");
            };
            RenderConfig::new(width, height)
        }
    };

    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(c) = args.channels {
        cfg.channels = c;
    }
    if let Some(k) = args.kernel {
        cfg.kernel = kernel_config(k);
    }
    args.partition.apply(&mut cfg.render);
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args)?;
    let kernel = cfg.kernel.build()?;
    let mut renderer = Renderer::new(cfg.render.clone())?;

    let (buffer, stats) = renderer
        .render_with_stats(cfg.width, cfg.height, cfg.channels, kernel.as_ref())
        .with_context(|| format!("render {}x{}", cfg.width, cfg.height))?;

    tileshade::save_png(&buffer, &args.out)?;

    eprintln!(
        "wrote {} ({}x{}, {} tiles, {:.2} ms)",
        args.out.display(),
        cfg.width,
        cfg.height,
        stats.tiles,
        stats.elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn cmd_tiles(args: TilesArgs) -> anyhow::Result<()> {
    let mut opts = RenderOptions::default();
    args.partition.apply(&mut opts);
    opts.validate()?;

    let tiles = tileshade::partition(args.width, args.height, opts.partition, opts.workers)?;
    for (i, t) in tiles.iter().enumerate() {
        println!(
            "{i:>3}: x {:>5}..{:<5} y {:>5}..{:<5} ({}x{})",
            t.x0,
            t.x1,
            t.y0,
            t.y1,
            t.width(),
            t.height()
        );
    }
    Ok(())
}
