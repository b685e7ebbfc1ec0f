use pipemon_common::types::StatusLevel;

/// Routes transitions at or above a level to one registered sink.
pub struct SinkRoute {
    pub min_level: StatusLevel,
    pub sink_index: usize,
}

impl SinkRoute {
    pub fn should_send(&self, level: StatusLevel) -> bool {
        level >= self.min_level
    }
}
