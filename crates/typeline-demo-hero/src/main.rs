#![forbid(unsafe_code)]

//! Hero banner demo: the animated tagline running in a real terminal.
//!
//! Run with `cargo run -p typeline-demo-hero`. Press `q` or Esc to quit.

use typeline::prelude::*;
use typeline::{KeyCode, PackedRgba};

struct Hero {
    tagline: TaglineState,
}

#[derive(Debug)]
enum Msg {
    Tick,
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Tick => Msg::Tick,
            Event::Key(k) if k.is_char('q') || k.code == KeyCode::Escape => Msg::Quit,
            _ => Msg::Noop,
        }
    }
}

impl Model for Hero {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::tick(self.tagline.delay())
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Tick => {
                self.tagline.tick();
                Cmd::tick(self.tagline.delay())
            }
            Msg::Quit => Cmd::quit(),
            Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let banner = Tagline::new()
            .title("BHUTAN · LAND OF THE THUNDER DRAGON")
            .title_style(Style::new().fg(PackedRgba::rgb(255, 214, 102)).bold())
            .lead_style(Style::new().fg(PackedRgba::rgb(180, 180, 190)))
            .accent_style(Style::new().fg(PackedRgba::rgb(255, 153, 51)).bold());

        // Inset the banner a little from the top-left corner.
        let area = Rect::new(2, 1, frame.width().saturating_sub(4), 3);
        let mut state = self.tagline.clone();
        StatefulWidget::render(&banner, area, frame, &mut state);
    }
}

fn main() -> typeline::Result<()> {
    let hero = Hero {
        tagline: TaglineState::default(),
    };
    Program::new(hero).run()?;
    Ok(())
}
