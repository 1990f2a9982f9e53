mod borrowed;
#[cfg(feature = "async")]
mod codec;
mod frame;
mod helpers;
mod io;


pub use borrowed::{BorrowedFrame, BorrowedFrames};
#[cfg(feature = "async")]
pub use codec::FrameCodec;
pub use frame::{Frame, FramePayload};
pub use io::{read_frame, read_frame_into, write_frame, write_raw_frame};
