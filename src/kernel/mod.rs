//! Kernel functions and Gram matrix evaluation

pub mod gaussian;
pub mod gram;
pub mod kind;
pub mod linear;
pub mod polynomial;
pub mod traits;

pub use self::gaussian::*;
pub use self::gram::{GRAM_STABILITY, gram_matrix, gram_matrix_stable, kernel_row, stabilize};
pub use self::kind::*;
pub use self::linear::*;
pub use self::polynomial::*;
pub use self::traits::*;
