//! Desk configuration: where staff announcements go.

use serde::Deserialize;

use crate::domain::foundation::ChannelId;

/// Staff-facing desk settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DeskConfig {
    /// Channels that receive new ticket announcements. The first channel is
    /// the primary one; its message becomes the ticket's thread target.
    pub staff_channels: Vec<ChannelId>,
}
