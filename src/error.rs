use thiserror::Error;

/// Errors surfaced by pixel buffers, routines and the scheduler
///
/// `E` is the error type of the [`OutputDriver`](crate::OutputDriver).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error<E> {
    /// A routine addressed a pixel outside its strip
    #[error("pixel index {index} is out of range for a strip of {len} pixels")]
    IndexOutOfRange { index: usize, len: usize },
    /// A strip configuration needs more pixels than the frame buffer holds
    #[error("strip of {requested} pixels exceeds frame capacity of {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    /// The LED driver failed to show a frame
    #[error("LED driver failed to show frame")]
    Driver(E),
}
