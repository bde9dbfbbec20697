pub mod apply;
pub mod inspect;
pub mod keygen;
pub mod selftest;

pub use apply::*;
pub use inspect::*;
pub use keygen::*;
pub use selftest::*;
