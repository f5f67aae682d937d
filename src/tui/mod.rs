//! TUI module for the interactive terminal interface
//!
//! Runs the frame loop around a [`Menu`]: poll keys, update the menu, draw.
//! The loop never blocks on the delete worker; it only reads the progress
//! snapshot once per frame.

pub mod keys;
pub mod screens;
pub mod theme;
pub mod widgets;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{stdout, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use self::keys::KeyTracker;
use self::screens::{list_geometry, render};
use crate::input::Controller;
use crate::menu::Menu;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI until the user quits from the list.
pub fn run(menu: &mut Menu, frame_interval: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;

    // Release events let held arrows accelerate; not every terminal has them.
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    info!("terminal ui started (key release events: {})", release_events);

    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
    let result = event_loop(&mut terminal, menu, frame_interval, release_events);

    restore_terminal(&mut terminal, release_events)?;
    info!("terminal ui stopped");
    result
}

fn restore_terminal(terminal: &mut Term, release_events: bool) -> Result<()> {
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Term,
    menu: &mut Menu,
    frame_interval: Duration,
    release_events: bool,
) -> Result<()> {
    let mut keys = KeyTracker::new(release_events);
    let mut controller = Controller::new();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick = tick.wrapping_add(1);

        // Poll
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => keys.handle(key),
                Event::FocusLost => keys.clear(),
                Event::Resize(width, height) => debug!("terminal resized to {}x{}", width, height),
                _ => {}
            }
        }
        let controls = controller.poll(&keys.frame());

        // Update
        menu.update(&controls).context("delete cycle failed")?;
        if menu.should_quit() {
            return Ok(());
        }

        // Draw
        let size = terminal.size()?;
        menu.set_geometry(list_geometry(Rect::new(0, 0, size.width, size.height)));
        let view = menu.view();
        terminal.draw(|f| render(f, &view, tick))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        } else if elapsed > frame_interval * 4 {
            warn!("slow frame: {:?}", elapsed);
        }
    }
}
