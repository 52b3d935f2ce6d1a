use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use svgreel::prelude::*;
use svgreel::{
    BinaryTreeOrganizer, FontMetrics, GridOrganizer, MetricsCache, NoAnimation, NodeKind,
    WriteSink, flash,
};

#[derive(Parser, Debug)]
#[command(name = "svgreel", version)]
struct Cli {
    /// Scene configuration JSON (missing fields take their defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter for diagnostics on stderr, e.g. `debug` or `svgreel=trace`.
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stream a built-in demo scene to stdout, one SVG document per line.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Demo to play.
    #[arg(value_enum)]
    name: DemoChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemoChoice {
    /// Two chained translations, the second starting wherever the first ended.
    Translate,
    /// Cells of a grid popping in one after another.
    Grid,
    /// An array-backed binary tree with a flashing root.
    Tree,
    /// A follower chasing a leader that travels along a path.
    Follow,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            Config::from_json_str(&json)?
        }
        None => Config::default(),
    };

    let frames = match cli.cmd {
        Command::Demo(args) => match args.name {
            DemoChoice::Translate => demo_translate(config)?,
            DemoChoice::Grid => demo_grid(config)?,
            DemoChoice::Tree => demo_tree(config)?,
            DemoChoice::Follow => demo_follow(config)?,
        },
    };
    eprintln!("emitted {frames} frames");
    Ok(())
}

fn stdout_scene(config: Config, mode: SceneMode) -> anyhow::Result<Scene> {
    let out = std::io::BufWriter::new(std::io::stdout().lock());
    Ok(Scene::new(config, mode)?.with_sink(WriteSink::new(out)))
}

fn demo_translate(config: Config) -> anyhow::Result<u64> {
    let mut scene = stdout_scene(config, SceneMode::Player)?;
    let dot = Node::circle(40.0).with_fill(Rgb::new(0x4c, 0xaf, 0x50));
    scene.add(&dot);

    let metrics: Rc<dyn FontMetrics> = Rc::new(MetricsCache::default());
    let caption = Node::text_with_config(scene.config(), "down, then across", metrics)?
        .with_fill(Rgb::WHITE)
        .with_anchor(Anchor::Bottom)?
        .at(0.0, -60.0);
    dot.add_child(&caption)?;

    let t = dot.transform();
    let cfg = scene.config().clone();
    let down = PropertyAnimation::translation(&t, Vec2::new(0.0, 75.0)).duration(1.0);
    let right = Lazy::root(t.clone()).map(|t| t.translation()) + Vec2::new(100.0, 0.0);
    let across = PropertyAnimation::translation(&t, right).duration(1.0);

    let moves = Sequence::new()
        .then(down.eager(&cfg)?)?
        .then(across.lazy(&cfg)?)?;
    scene.play(moves)?;
    Ok(scene.finish()?)
}

fn demo_grid(config: Config) -> anyhow::Result<u64> {
    let mut scene = stdout_scene(config, SceneMode::Animations)?;
    let grid = GridOrganizer::new(3, 4, 200.0, 200.0)?;
    let cfg = scene.config().clone();

    scene.with_scope(|scene| {
        let mut pops = Sequence::new();
        for i in 0..grid.len() {
            let cell = Node::rect(150.0, 150.0)
                .with_anchor(Anchor::Center)?
                .with_default_stroke(&cfg)
                .with_fill(Rgb::new(0x21, 0x96, 0xf3));
            cell.transform().set(grid.index(i)?);
            cell.transform().set_scale(Vec2::ZERO);
            scene.add(&cell);
            let pop = PropertyAnimation::scale(&cell.transform(), Vec2::new(1.0, 1.0))
                .duration(0.25)
                .easing(Easing::OutCubic);
            pops.push(pop.eager(&cfg)?)?;
        }
        scene.push_animation(pops)?;
        scene.push_animation(NoAnimation::new(&cfg, Some(0.5))?)
    })?;
    Ok(scene.finish()?)
}

fn demo_tree(config: Config) -> anyhow::Result<u64> {
    let mut scene = stdout_scene(config, SceneMode::Player)?;
    let tree = BinaryTreeOrganizer::new(4, 1200.0, 160.0)?;
    let root = Node::group().at(0.0, -240.0);
    scene.add(&root);

    for i in 0..tree.capacity() {
        let here = tree.transform(i)?.translation;
        for child in [tree.left(i)?, tree.right(i)?].into_iter().flatten() {
            let there = tree.transform(child)?.translation;
            let edge = Node::path(Path::new().move_to(here.x, here.y).line_to(there.x, there.y))
                .with_stroke(Rgb::new(0x9e, 0x9e, 0x9e), 3.0);
            edge.set_z(-1.0);
            root.add_child(&edge)?;
        }
        let slot = Node::circle(30.0)
            .with_fill(Rgb::new(0xff, 0x98, 0x00))
            .with_default_stroke(scene.config());
        slot.transform().set(tree.transform(i)?);
        root.add_child(&slot)?;
    }

    let cfg = scene.config().clone();
    let top = root
        .children()
        .into_iter()
        .find(|n| matches!(*n.kind(), NodeKind::Circle { .. }))
        .context("tree has a root slot")?;
    if let Some(fill) = top.fill() {
        scene.play(flash(&cfg, &fill, Rgb::WHITE, Some(2.0))?)?;
    }
    Ok(scene.finish()?)
}

fn demo_follow(config: Config) -> anyhow::Result<u64> {
    let mut scene = stdout_scene(config, SceneMode::Player)?;
    let leader = Node::circle(20.0).with_fill(Rgb::new(0xe9, 0x1e, 0x63)).at(-400.0, 0.0);
    let follower = Node::circle(20.0)
        .with_fill(Rgb::new(0x00, 0xbc, 0xd4))
        .at(-400.0, 200.0);
    scene.add(&leader);
    scene.add(&follower);

    let chase = TranslationUpdater::new(&follower.transform(), &leader.transform())?
        .with_max_velocity(300.0)?
        .with_acceleration(600.0)?;
    scene.push_updater(chase)?;

    let route = Path::new()
        .move_to(-400.0, 0.0)
        .quad(0.0, -400.0, 400.0, 0.0)
        .line_to(0.0, 300.0);
    let cfg = scene.config().clone();
    let travel = PathAnimation::new(&leader.transform(), route).duration(4.0);
    scene.play(travel.eager(&cfg)?)?;
    scene.wait(Some(1.0))?;
    Ok(scene.finish()?)
}
