use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, Terminal};
use std::io;

use wrap_context::{arg_context, raw_context};

use crate::{event::EventHandler, view_model::Render};

/// Terminal in raw mode with mouse capture, plus its event source.
#[derive(Debug)]
pub struct Tui<B: Backend> {
    terminal: Terminal<B>,
    pub events: EventHandler,
}

fn release_terminal() -> anyhow::Result<()> {
    arg_context!(crossterm::execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen))?;
    arg_context!(terminal::disable_raw_mode())?;
    anyhow::Ok(())
}

impl<B: Backend> Tui<B> {
    pub fn new(terminal: Terminal<B>, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        arg_context!(crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture))?;
        arg_context!(terminal::enable_raw_mode())?;

        let panic_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = release_terminal();
            tracing::error!("{}", panic_info);
            panic_hook(panic_info);
        }));

        anyhow::Ok(())
    }

    pub fn draw<R: Render>(&mut self, root: &mut R) -> anyhow::Result<()> {
        raw_context!(self.terminal.draw(|frame| root.render(frame)))?;
        anyhow::Ok(())
    }

    fn exit(&mut self) -> anyhow::Result<()> {
        self.events.stop();
        arg_context!(release_terminal())?;
        arg_context!(self.terminal.show_cursor())?;
        anyhow::Ok(())
    }

    /// Gives the terminal back to the shell. Failures are reported, not returned.
    pub fn restore(&mut self) {
        if let Err(err) = self.exit() {
            tracing::error!("{:#}", err);
            eprintln!(
                "Failed to restore terminal. Run `reset` / `stty sane` or restart your terminal to recover: {}",
                err
            );
        }
    }
}
