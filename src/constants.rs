// How many slots a fresh or cleared set starts with.
pub const INITIAL_CAPACITY: usize = 15;

// Growth factor of 1.3, kept as an integer ratio so the new capacity is
// exactly floor(capacity * 1.3).
pub const GROWTH_NUMERATOR: usize = 13;
pub const GROWTH_DENOMINATOR: usize = 10;
