//! Tunables for default route discovery.

/// Size of the buffer the routing dump is read into when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Optional settings for a route query. Unset fields fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteConfig {
    /// Capacity of the response buffer, `DEFAULT_BUFFER_SIZE` if unset.
    pub buffer_size: Option<usize>,
    /// Sequence number of the dump request, 0 if unset.
    pub sequence: Option<u32>,
}

impl RouteConfig {
    pub fn buffer_size(&self) -> usize {
        self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE)
    }

    pub fn sequence(&self) -> u32 {
        self.sequence.unwrap_or(0)
    }
}
