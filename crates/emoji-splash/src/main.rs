//! Emoji Splash - drop, pile up and shake emoji

use clap::{Parser, ValueEnum};
use emoji_splash::headless::{HeadlessRun, run_headless};
use emoji_splash::{App, AppConfig};
use emoji_splash_core::{DisplayMode, EmojiCategory, Viewport};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    Faces,
    Food,
    Animals,
    Activities,
    Random,
}

impl From<CategoryArg> for EmojiCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Faces => EmojiCategory::Faces,
            CategoryArg::Food => EmojiCategory::Food,
            CategoryArg::Animals => EmojiCategory::Animals,
            CategoryArg::Activities => EmojiCategory::Activities,
            CategoryArg::Random => EmojiCategory::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Accumulate,
    Rain,
}

impl From<ModeArg> for DisplayMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Accumulate => DisplayMode::Accumulate,
            ModeArg::Rain => DisplayMode::Rain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for every random choice (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Emoji category new entities are drawn from
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Display mode: accumulate (floor) or rain (no floor)
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Run without a window, holding the pointer in the middle of the scene
    #[arg(long)]
    headless: bool,

    /// Number of 60 Hz frames to simulate in headless mode
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Headless viewport width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Headless viewport height
    #[arg(long, default_value = "720")]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(seed) = args.seed {
        config.session.seed = Some(seed);
    }
    if let Some(category) = args.category {
        config.session.category = category.into();
    }
    if let Some(mode) = args.mode {
        config.session.mode = mode.into();
    }

    if args.headless {
        let settings = config.session_settings();
        let summary = run_headless(HeadlessRun {
            physics: config.physics,
            settings,
            viewport: Viewport::new(args.width as f32, args.height as f32),
            seed: config.session.seed,
            frames: args.frames,
        });
        println!(
            "{} frames, {} emojis on screen, {} count changes",
            summary.frames,
            summary.final_count,
            summary.count_changes.len()
        );
        return Ok(());
    }

    log::info!("Starting Emoji Splash");

    pollster::block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config).await?;
    App::run(event_loop, app)
}
