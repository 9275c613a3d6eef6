use crate::config::Config;
use crate::game::Game;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App<R> {
    screen: Screen<R>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(config: &Config, rng: R) -> App<R> {
        App {
            screen: Screen::Game(Box::new(Game::new(config, rng))),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen<R> {
    Game(Box<Game<R>>),
    Quit,
}
