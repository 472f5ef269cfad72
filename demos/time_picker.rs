//! # Time Picker Example
//!
//! Two pickers on a scrollable page:
//! - The parent forwards primary presses to each picker as `Message::Click`
//! - Each picker's `Changed` message is intercepted by the parent
//! - Scrolling the page re-anchors an open panel; `d` toggles the end picker
//!
//! Set `CHIME_LOG=/tmp/chime.log` to write a trace log.
//!
//! Run with: `cargo run --example time_picker`

use std::path::PathBuf;

use chime::crossterm::event::{KeyCode, KeyModifiers};
use chime::ratatui::layout::{Alignment, Constraint, Layout, Rect};
use chime::ratatui::style::{Color, Style};
use chime::ratatui::text::{Line, Span};
use chime::ratatui::widgets::{Block, Borders, Paragraph};
use chime::ratatui::Frame;
use chime::widgets::time_picker::{self, TimePicker};
use chime::{
    listen, Command, Component, HostEvent, Model, ProgramOptions, ScrollDirection, Subscription,
    SubscriptionId,
};

const PAGE_ROWS: u16 = 60;

struct Schedule {
    start: TimePicker,
    end: TimePicker,
    scroll: u16,
    log: Vec<String>,
}

#[derive(Debug)]
enum Msg {
    Start(time_picker::Message),
    End(time_picker::Message),
    Host(HostEvent),
    ToggleEnd,
    Quit,
}

impl Schedule {
    fn picker_rows(&self, area: Rect) -> (Rect, Rect) {
        let top = i32::from(area.y) + 4 - i32::from(self.scroll);
        let row = |offset: i32| -> Rect {
            let y = top + offset;
            if y < i32::from(area.y) || y + 3 > i32::from(area.bottom()) {
                return Rect::default();
            }
            Rect::new(area.x + 10, y as u16, 22, 3)
        };
        (row(0), row(4))
    }

    fn over_open_panel(&self, pos: chime::ratatui::layout::Position) -> bool {
        [&self.start, &self.end]
            .iter()
            .filter_map(|p| p.overlay_area())
            .any(|area| area.contains(pos))
    }
}

impl Model for Schedule {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        (
            Schedule {
                start: TimePicker::new().with_placeholder("Start"),
                end: TimePicker::new()
                    .with_placeholder("End")
                    .with_interval(15),
                scroll: 0,
                log: Vec::new(),
            },
            Command::set_title("chime: time picker"),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Start(time_picker::Message::Changed(value)) => {
                self.log.push(format!("start -> {value}"));
                Command::none()
            }
            Msg::End(time_picker::Message::Changed(value)) => {
                self.log.push(format!("end -> {value}"));
                Command::none()
            }
            Msg::Start(m) => self.start.update(m).map(Msg::Start),
            Msg::End(m) => self.end.update(m).map(Msg::End),
            Msg::Host(event) => {
                if let Some(pos) = event.primary_press() {
                    let click = time_picker::Message::Click(pos);
                    return Command::batch([
                        self.start.update(click.clone()).map(Msg::Start),
                        self.end.update(click).map(Msg::End),
                    ]);
                }
                if let Some((direction, pos)) = event.scroll() {
                    if !self.over_open_panel(pos) {
                        self.scroll = match direction {
                            ScrollDirection::Up => self.scroll.saturating_sub(1),
                            ScrollDirection::Down => (self.scroll + 1).min(PAGE_ROWS),
                            ScrollDirection::Left | ScrollDirection::Right => self.scroll,
                        };
                    }
                }
                Command::none()
            }
            Msg::ToggleEnd => {
                let disabled = !self.end.is_disabled();
                self.end.set_disabled(disabled);
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [page_area, log_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        let page = Block::default()
            .borders(Borders::ALL)
            .title(" Schedule ");
        let inner = page.inner(page_area);
        frame.render_widget(page, page_area);

        let filler: Vec<Line> = (0..PAGE_ROWS)
            .map(|i| Line::styled(format!("  row {i:02}"), Style::default().fg(Color::DarkGray)))
            .collect();
        frame.render_widget(Paragraph::new(filler).scroll((self.scroll, 0)), inner);

        let (start_area, end_area) = self.picker_rows(inner);
        // The open picker is drawn last so its panel covers the other one.
        let mut pickers = [(&self.start, start_area), (&self.end, end_area)];
        pickers.sort_by_key(|(p, _)| p.is_open());
        for (picker, area) in pickers {
            picker.view(frame, area);
        }

        let log: Vec<Line> = self
            .log
            .iter()
            .rev()
            .take(4)
            .map(|entry| Line::raw(entry.as_str()))
            .collect();
        frame.render_widget(
            Paragraph::new(log).block(Block::default().borders(Borders::ALL).title(" Changes ")),
            log_area,
        );

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Click", Style::default().fg(Color::Cyan)),
            Span::raw(" open/pick  "),
            Span::styled("Wheel", Style::default().fg(Color::Cyan)),
            Span::raw(" scroll  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(" disable end  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(help, help_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![listen(SubscriptionId::of::<Schedule>(), |ev| match ev {
            HostEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                (KeyCode::Char('d'), _) => Some(Msg::ToggleEnd),
                _ => None,
            },
            HostEvent::Mouse(_) => Some(Msg::Host(ev)),
            _ => None,
        })];
        subs.extend(self.start.subscriptions().into_iter().map(|s| s.map(Msg::Start)));
        subs.extend(self.end.subscriptions().into_iter().map(|s| s.map(Msg::End)));
        subs
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        log_file: std::env::var_os("CHIME_LOG").map(PathBuf::from),
        ..ProgramOptions::default()
    };
    chime::run_with::<Schedule>((), options).await?;
    Ok(())
}
