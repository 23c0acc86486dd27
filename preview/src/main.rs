//! Terminal preview for badge-routines
//!
//! Draws the strip as a row of truecolor cells and runs the scheduler
//! against wall-clock time. Press `q`, `Esc` or `Ctrl-C` to stop.
//!
//! Usage: `badge-routines-preview [routine]` where `routine` is one of the
//! routine names (`hue_sweep`, `strip_rainbow`, ...). Without it, routines
//! are picked at random.

use std::{
    io::{self, Stdout, Write},
    thread,
    time::Duration as StdDuration,
};

use anyhow::{Context, bail};
use badge_routines::{
    Clock, Duration, Instant, Outcome, OutputDriver, Rgb, RoutineId, STRIP_PIXELS, Scheduler,
    SchedulerConfig, StopSignal,
};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType, disable_raw_mode, enable_raw_mode},
};

/// Frame capacity; the longest strip is the external one
const MAX_LEDS: usize = STRIP_PIXELS;

/// Cell drawn for each pixel
const PIXEL: &str = "  ";

/// How often the key thread checks for input
const KEY_POLL: StdDuration = StdDuration::from_millis(50);

static STOP: StopSignal = StopSignal::new();

/// Driver that paints each frame over the current terminal line
struct TerminalStrip {
    out: Stdout,
}

impl OutputDriver for TerminalStrip {
    type Error = io::Error;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        queue!(self.out, cursor::MoveToColumn(0))?;
        for color in colors {
            queue!(
                self.out,
                SetBackgroundColor(Color::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                }),
                Print(PIXEL),
            )?;
        }
        queue!(
            self.out,
            ResetColor,
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        self.out.flush()
    }
}

/// Wall-clock time with thread sleeps
struct StdClock;

impl Clock for StdClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(StdDuration::from_micros(duration.as_micros()));
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Raise the stop signal on the first quit key
fn watch_keys() {
    while !STOP.is_raised() {
        match event::poll(KEY_POLL) {
            Ok(true) => {
                if let Ok(Event::Key(key)) = event::read()
                    && is_quit(&key)
                {
                    STOP.raise();
                }
            }
            Ok(false) => {}
            Err(_) => STOP.raise(),
        }
    }
}

fn parse_routine() -> anyhow::Result<Option<RoutineId>> {
    let Some(name) = std::env::args().nth(1) else {
        return Ok(None);
    };
    match RoutineId::parse_from_str(&name) {
        Some(id) => Ok(Some(id)),
        None => {
            let known: Vec<_> = RoutineId::ALL.iter().map(|id| id.as_str()).collect();
            bail!("unknown routine `{name}`, expected one of: {}", known.join(", "))
        }
    }
}

fn run(routine: Option<RoutineId>) -> anyhow::Result<()> {
    let driver = TerminalStrip { out: io::stdout() };
    let mut scheduler = Scheduler::<_, _, _, MAX_LEDS>::new(
        driver,
        StdClock,
        rand::rng(),
        &STOP,
        SchedulerConfig::default(),
    );

    match routine {
        Some(id) => {
            while scheduler.run_routine(id).context("routine failed")? == Outcome::Completed {}
        }
        None => scheduler.run().context("scheduler failed")?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let routine = parse_routine()?;

    enable_raw_mode()?;
    execute!(io::stdout(), cursor::Hide)?;
    let keys = thread::spawn(watch_keys);

    let result = run(routine);

    STOP.raise();
    let _ = keys.join();
    execute!(io::stdout(), cursor::Show, ResetColor, Print("\r\n"))?;
    disable_raw_mode()?;

    result
}
