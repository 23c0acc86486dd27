#![no_std]

pub mod buffer;
pub mod clock;
pub mod color;
pub mod driver;
pub mod error;
pub mod math8;
pub mod routine;
pub mod scheduler;
pub mod stop;

pub use buffer::{ColorOrder, Frame, PixelBuffer, StripConfig};
pub use clock::{BlockingClock, Clock, Deadline, RUN_SECONDS, RunConfig, USE_TIMER};
pub use driver::{OutputDriver, SmartLeds};
pub use error::Error;
pub use routine::{Outcome, Routine, RoutineContext, RoutineId, RoutineSlot};
pub use scheduler::{BADGE_PIXELS, STRIP_PIXELS, Scheduler, SchedulerConfig};
pub use stop::StopSignal;

pub use color::{FloatRgb, Hsv, Pack, Rgb};
pub use embassy_time::{Duration, Instant};
