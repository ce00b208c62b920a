pub mod clock;
pub mod frame_loop;

pub use clock::FrameClock;
pub use frame_loop::{FrameLoop, InputEvent, LoopState};
