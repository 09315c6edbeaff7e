//! Gateway adapters for the message gateway port.

mod recording;

pub use recording::{
    RecordedGuestMessage, RecordedStaffMessage, RecordedThreadedReply, RecordingGateway,
};
