mod add_two_ints;
pub use add_two_ints::*;
