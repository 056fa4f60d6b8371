use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pending events the stats manager buffers before senders wait
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}
