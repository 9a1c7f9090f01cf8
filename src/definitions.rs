/// Tokens of a typical plot expression fit on the stack.
pub const N_TOKENS_ON_STACK: usize = 32;
pub const N_DIAGNOSTICS_ON_STACK: usize = 4;
/// Nesting beyond this depth is reported as syntax error instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Distance between two consecutive sample positions.
pub const DEFAULT_STEP: f64 = 0.15;
pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 500.0;
/// Number of units of the x-axis that are visible in the viewport.
pub const DEFAULT_UNITS_X: f64 = 60.0;
pub const DEFAULT_UNITS_Y: f64 = 40.0;
