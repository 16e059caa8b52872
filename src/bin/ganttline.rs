use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ganttline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart document as a PNG.
    Render(RenderArgs),
    /// Validate a chart document and print its computed layout.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// TTF/OTF font used for all chart text.
    #[arg(long)]
    font: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1600)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 700)]
    height: u32,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_chart_json(path: &Path) -> anyhow::Result<ganttline::ChartSpec> {
    let f = File::open(path).with_context(|| format!("open chart '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: ganttline::ChartSpec =
        serde_json::from_reader(r).with_context(|| "parse chart JSON")?;
    Ok(spec)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = read_chart_json(&args.in_path)?;
    let categories = ganttline::CategorySet::new(spec.categories)?;

    let mut style = ganttline::ChartStyle::default().with_canvas(args.width, args.height);
    style.title = spec.title;
    style.x_label = spec.x_label;

    let font = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;
    let kind = match args.backend {
        BackendChoice::Cpu => ganttline::BackendKind::Cpu,
    };
    let mut backend =
        ganttline::create_backend(kind, ganttline::RenderOptions { font: Some(font) })?;

    let outcome =
        ganttline::render_chart(&spec.records, &categories, &style, backend.as_mut())?;
    let Some(frame) = outcome.frame() else {
        eprintln!("no records, nothing to render");
        return Ok(());
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    ganttline::save_png(frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let spec = read_chart_json(&args.in_path)?;
    let categories = ganttline::CategorySet::new(spec.categories)?;
    let records = ganttline::normalize_records(&spec.records, &categories)?;
    let layout = ganttline::lay_out(records);

    if layout.is_empty() {
        eprintln!("no records, nothing to lay out");
        return Ok(());
    }

    for row in &layout.rows {
        let r = &row.record;
        let kind = if r.milestone { "milestone" } else { "task" };
        let category = categories
            .get(r.category_rank)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!(
            "slot {:>3}  {}  {} .. {}  ({} day{})  [{}]  {}",
            row.slot,
            kind,
            r.start,
            r.end,
            r.duration_days,
            if r.duration_days == 1 { "" } else { "s" },
            category,
            r.name,
        );
    }
    for span in &layout.spans {
        let category = categories
            .get(span.category_rank)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!("span  [{:>5.1}, {:>5.1}]  {}", span.top, span.bottom, category);
    }
    Ok(())
}
