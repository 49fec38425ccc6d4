//! Terminal paint demo (default binary).
//!
//! A [`PixelGrid`] drawn on a [`TerminalSurface`]. crossterm events are
//! translated into a [`TermHub`]; the grid's key and click listeners queue
//! paint actions, which the loop applies between frames.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::{cursor, style::Print, terminal, QueueableCommand};
use log::{info, warn};

use pixel_grid::config::DemoConfig;
use pixel_grid::core::PixelGrid;
use pixel_grid::input::{is_key_down, should_quit, InputTranslator, TermHub};
use pixel_grid::paint::{handle_key_event, PaintAction, Painter, STAMP_JSON};
use pixel_grid::term::TerminalSurface;
use pixel_grid::types::{Origin, Sprite};

type Grid = PixelGrid<TerminalSurface, TermHub>;

const SURFACE_ORIGIN: Origin = Origin::new(1, 1);
const POLL_MS: u64 = 50;

fn main() -> Result<()> {
    let config = DemoConfig::from_env();
    init_logging(&config)?;
    for (key, value) in &config.ignored {
        warn!("ignoring {}={:?}, using the default", key, value);
    }
    if !config.clicks_reach_every_row() {
        warn!(
            "cell size {} is odd: clicks only reach every other grid row",
            config.cell_size
        );
    }

    let stamp: Sprite = serde_json::from_str(STAMP_JSON).context("parse stamp sprite")?;
    let hub = TermHub::new();
    let surface = TerminalSurface::new(SURFACE_ORIGIN);
    let mut grid = PixelGrid::with_events(
        surface,
        config.width,
        config.height,
        config.cell_size,
        hub.clone(),
    )
    .context("create pixel grid")?;
    info!(
        "paint demo {}x{} cell size {}",
        config.width, config.height, config.cell_size
    );

    grid.surface_mut().enter()?;

    let result = run(&mut grid, &hub, stamp);

    // Always try to restore terminal state.
    let _ = grid.surface_mut().exit();
    result
}

fn init_logging(config: &DemoConfig) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_micros();
    if let Some(path) = &config.log_path {
        let file = File::create(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(grid: &mut Grid, hub: &TermHub, stamp: Sprite) -> Result<()> {
    let translator = InputTranslator::new(SURFACE_ORIGIN);
    let mut painter = Painter::new(stamp);

    let queue: Rc<RefCell<VecDeque<PaintAction>>> = Rc::default();
    let q = Rc::clone(&queue);
    grid.on_key_down(move |key| {
        if let Some(action) = handle_key_event(key) {
            q.borrow_mut().push_back(action);
        }
    });
    let q = Rc::clone(&queue);
    grid.on_mouse_click(move |x, y| q.borrow_mut().push_back(PaintAction::PaintAt { x, y }));

    let mut out = io::stdout();
    let mut last_status = String::new();

    loop {
        grid.surface_mut().present()?;
        draw_status(&mut out, grid, &painter, &mut last_status)?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let ev = event::read()?;
        match &ev {
            Event::Key(key) if is_key_down(key) && should_quit(key) => return Ok(()),
            Event::Resize(..) => grid.surface_mut().invalidate(),
            _ => {}
        }
        translator.pump(hub, &ev);

        // Listeners only queue; apply now that no dispatch is running.
        loop {
            let next = queue.borrow_mut().pop_front();
            let Some(action) = next else { break };
            painter.apply(grid, action);
        }
    }
}

fn draw_status(
    out: &mut io::Stdout,
    grid: &Grid,
    painter: &Painter,
    last: &mut String,
) -> Result<()> {
    let (cx, cy) = painter.cursor();
    let status = format!(
        "cursor ({cx},{cy})  color {}  space plot  n color  a/L line  o circle  r rect  s stamp  c clear  q quit",
        painter.color()
    );
    if status == *last {
        return Ok(());
    }

    let (_, rows) = grid.surface().term_size();
    let row = SURFACE_ORIGIN.row.saturating_add(rows).saturating_add(1);
    out.queue(cursor::MoveTo(SURFACE_ORIGIN.col, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(Print(&status))?;
    out.flush()?;
    *last = status;
    Ok(())
}
