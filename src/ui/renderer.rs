use crate::config::Config;
use crate::ui::app::App;
use crate::ui::core::{Component, EventHandler, EventType};
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;

/// Set up the terminal, run the event loop, and restore the terminal.
pub async fn run_app(config: Config) -> anyhow::Result<()> {
    let mouse_enabled = config.ui.mouse_enabled;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.init()?;
    let mut event_handler = EventHandler::new(tick_rate);
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render && event_handler.should_render() {
            terminal.draw(|f| app.render(f, f.area()))?;
            event_handler.mark_rendered();
            needs_render = false;
        }

        let event = event_handler.next_event().await?;
        let is_tick = matches!(event, EventType::Tick);
        app.handle_event(event);

        // Ticks only redraw while something is moving
        needs_render |= !is_tick || app.is_animating();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
