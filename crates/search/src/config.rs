/// Tuning knobs for [`UctSearch`](crate::UctSearch).
#[derive(Clone, Debug)]
pub struct UctConfig {
    /// Simulations per move decision.
    pub playouts: u32,

    /// Exploration constant multiplying the prior term in PUCT selection.
    pub c_puct: f32,

    /// Node table capacity; rounded up to the next power of two.
    pub table_capacity: usize,

    /// Plies below which the chosen move is sampled in proportion to
    /// child visit counts instead of taken greedily.
    pub sample_opening_plies: u8,
}

impl Default for UctConfig {
    fn default() -> Self {
        UctConfig {
            playouts: 300,
            c_puct: 1.0,
            table_capacity: 4096,
            sample_opening_plies: 4,
        }
    }
}

impl UctConfig {
    pub fn with_playouts(playouts: u32) -> Self {
        UctConfig {
            playouts,
            ..UctConfig::default()
        }
    }
}
