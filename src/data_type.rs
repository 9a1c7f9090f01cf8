use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use num::Float;

/// Gathers `Float`, `FromStr`, `Debug`, and `Display` in one trait.
/// Every type that is used as value of an expression needs to implement this,
/// which is the case for `f32` and `f64`.
pub trait DataType: Float + FromStr + Debug + Display {}
impl<T: Float + FromStr + Debug + Display> DataType for T {}
