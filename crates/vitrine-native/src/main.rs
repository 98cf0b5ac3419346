use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vitrine_core::{
    guard_admin, settle_playback, AdminSession, Auth, CadenceDriver, CmsWrite, ContentView,
    MemoryCms, Mutation, MusicPlayer, NewPhoto, PageConfig, PlaybackError, Preloader,
    ReadinessStore, Role, Stage, User, Viewport,
};

mod sim;

use sim::{Layout, LogAudio, LogSink, VirtualClock};

/// Headless preview of the vitrine page: runs the readiness gate, a scroll
/// sweep and the cadence strobe without a browser.
#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    /// Page config JSON; the built-in site is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll positions sampled between the top and the bottom of the page.
    #[arg(long, default_value_t = 12)]
    steps: usize,

    /// Stage clock advance between sampled positions, in ms; drives the
    /// play-once reveals.
    #[arg(long, default_value_t = 250)]
    frame_ms: u64,

    /// Viewport height in px.
    #[arg(long, default_value_t = 900.0)]
    viewport: f32,

    /// Cadence ticks to simulate.
    #[arg(long, default_value_t = 14)]
    ticks: usize,

    /// Seed for the preloader counter and cadence jitter.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PageConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PageConfig::default(),
    };
    log::info!(
        "vitrine-native: {} sections, viewport {}px, seed {}",
        config.sections.len(),
        cli.viewport,
        cli.seed
    );

    run_gate(&config, cli.seed);
    run_scroll(&config, cli.viewport, cli.steps.max(1), cli.frame_ms)?;
    run_cadence(&config, cli.ticks, cli.seed)?;
    run_cms()?;
    Ok(())
}

/// Preloader, enter gesture and a blocked-then-retried autoplay.
fn run_gate(config: &PageConfig, seed: u64) {
    let store = ReadinessStore::new();
    let player = Rc::new(RefCell::new(MusicPlayer::new(
        LogAudio::default(),
        &config.music,
    )));
    {
        let player = player.clone();
        store.reader().subscribe(move |state| {
            log::info!(
                "[ready] is_ready={} music_requested={} music_started={}",
                state.is_ready,
                state.music_requested,
                state.music_started
            );
            player.borrow_mut().on_readiness(state);
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut preloader = Preloader::new(&config.preloader);
    let mut ticks = 1;
    while preloader.advance(&mut rng) {
        ticks += 1;
    }
    log::info!(
        "[preloader] {} after {} ticks ({} ms)",
        preloader.label(),
        ticks,
        ticks * config.preloader.tick_ms
    );

    let gate = store.entry_gate();
    gate.enter();
    let confirm = store.playback_confirm();
    settle_playback(
        &player,
        &confirm,
        Err(PlaybackError::new("NotAllowedError (simulated autoplay policy)")),
    );
    log::info!("[music] started after enter: {}", store.reader().music_started());

    player.borrow_mut().toggle_play();
    settle_playback(&player, &confirm, Ok(()));
    log::info!("[music] started after retry: {}", store.reader().music_started());
}

fn run_scroll(
    config: &PageConfig,
    viewport_height: f32,
    steps: usize,
    frame_ms: u64,
) -> anyhow::Result<()> {
    let layout = Layout::stack(&config.sections, viewport_height);
    let mut stage = Stage::new();
    for section in &config.sections {
        stage
            .mount(section)
            .with_context(|| format!("mounting section '{}'", section.id))?;
    }

    let max_scroll = (layout.document_height() - viewport_height).max(0.0);
    let mut sink = LogSink::default();
    for step in 0..=steps {
        let scroll_y = max_scroll * step as f32 / steps as f32;
        let viewport = Viewport {
            scroll_y,
            height: viewport_height,
        };
        stage.advance(Duration::from_millis(frame_ms));
        let report = stage.frame(viewport, &layout, &mut sink);
        let summary: Vec<String> = config
            .sections
            .iter()
            .filter_map(|s| {
                let id = stage.section_id(&s.id)?;
                let p = report.samples.iter().find(|(sid, _)| *sid == id)?.1;
                Some(format!("{}={:.2}", s.id, p.get()))
            })
            .collect();
        log::info!(
            "[scroll] y={:>7.1} t={}ms styled={:>2} texts={} {}",
            scroll_y,
            stage.clock().as_millis(),
            report.styled,
            report.texts,
            summary.join(" ")
        );
    }
    stage.unmount_all();
    log::info!(
        "[scroll] {} styles applied, {} texts written",
        sink.applied,
        sink.texts
    );
    Ok(())
}

fn run_cadence(config: &PageConfig, ticks: usize, seed: u64) -> anyhow::Result<()> {
    let seed = config.cadence.seed.unwrap_or(seed);
    let mut driver = CadenceDriver::from_config(&config.cadence, StdRng::seed_from_u64(seed))?;
    let mut clock = VirtualClock::default();
    driver.start(&mut clock);
    log::info!("[cadence] t=0ms {}", driver.current());
    for _ in 0..ticks {
        let Some(handle) = clock.advance() else {
            break;
        };
        if let Some(ev) = driver.on_timer(handle, &mut clock) {
            log::info!(
                "[cadence] t={}ms {:<12} {:?} jitter=({:.1}, {:.1}) next={}ms",
                clock.now().as_millis(),
                ev.value,
                ev.variant,
                ev.jitter.x,
                ev.jitter.y,
                ev.next_delay.as_millis()
            );
        }
    }
    driver.stop(&mut clock);
    log::info!("[cadence] stopped, {} timers pending", clock.pending());
    Ok(())
}

/// Admin round trip against the in-memory service.
fn run_cms() -> anyhow::Result<()> {
    let mut cms = MemoryCms::new();
    log::info!("[cms] anonymous admin route: {:?}", guard_admin(cms.me().as_ref()));
    cms.sign_in(User {
        id: 1,
        name: Some("admin".into()),
        role: Role::Admin,
    });
    log::info!("[cms] admin route: {:?}", guard_admin(cms.me().as_ref()));

    cms.update_content("hero_title", "hero", "Vitrine")?;
    cms.add_photo(NewPhoto {
        section: "gallery".into(),
        src: "/images/gallery-1.jpg".into(),
        ..NewPhoto::default()
    })?;

    let mut session = AdminSession::load(&cms);
    session.apply(
        Mutation::UpdateContent {
            key: "hero_subtitle".into(),
            section: "hero".into(),
            value: "Portfolio".into(),
        },
        &mut cms,
    );
    cms.set_reject_writes(true);
    session.apply(Mutation::DeletePhoto(1), &mut cms);
    for notice in session.notices() {
        log::info!("[cms] {:?}", notice);
    }

    let view = ContentView::from_source(&cms);
    log::info!(
        "[cms] hero: '{}' / '{}' / '{}', {} photos",
        view.text("hero_title", "Title"),
        view.text("hero_subtitle", "Subtitle"),
        view.text("about_text", "About"),
        session.photos().len()
    );
    cms.logout()?;
    Ok(())
}
