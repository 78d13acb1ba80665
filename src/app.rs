//! Main loop: polls terminal events, feeds them to the quest screen, and
//! redraws when something changed.

use std::time::Duration;

use anyhow::Result;
use ratatui::{backend::Backend, Terminal};

use questboard_config::{constants::EVENT_TICK_MS, Config};
use questboard_core::{Event, EventHandler};
use questboard_logger as logger;
use questboard_screen::{QuestScreen, ScreenEvent};

pub struct App {
    screen: QuestScreen,
    event_handler: EventHandler,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn new(config: &Config, width: u16, height: u16) -> Self {
        Self {
            screen: QuestScreen::new(config, width, height),
            event_handler: EventHandler::new(Duration::from_millis(EVENT_TICK_MS)),
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| {
                    let area = frame.area();
                    self.screen.render(area, frame.buffer_mut());
                })?;
                self.needs_redraw = false;
            }

            match self.event_handler.next()? {
                Event::Key(key) => {
                    let outcome = self.screen.handle_key(key);
                    self.apply(outcome);
                }
                Event::Mouse(mouse) => {
                    let outcome = self.screen.handle_mouse(mouse);
                    self.apply(outcome);
                }
                Event::Resize(width, height) => {
                    self.screen.resize(width, height);
                    self.needs_redraw = true;
                }
                Event::Tick => {
                    if self.screen.tick() {
                        self.needs_redraw = true;
                    }
                }
            }
        }

        logger::info("Questboard exiting");
        Ok(())
    }

    fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::Handled => self.needs_redraw = true,
            ScreenEvent::Ignored => {}
            ScreenEvent::Quit => self.should_quit = true,
            ScreenEvent::Logout => {
                logger::info("Session ended by logout");
                self.should_quit = true;
            }
        }
    }
}
