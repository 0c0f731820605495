//! Matriz: dense `f32` matrices for small neural-network experiments
//!
//! **Matriz** provides one storage type, [`Matrix`], and a suite of free
//! functions that read and write it:
//!
//! 1. [`ops`] - multiply, add, subtract, transpose
//! 2. [`nn`] - Hadamard product, broadcast, scalar multiply, reductions,
//!    power, absolute value, column sums
//! 3. [`init`] - uniform and Xavier initialization from an injected RNG
//! 4. [`preprocess`] - strided windows cut from larger in-memory datasets
//!
//! # Design Principles
//!
//! - **Destination first**: every operation writes into a `&mut Matrix`
//!   passed as its first argument, so the borrow checker rules out a
//!   destination that aliases an operand
//! - **Validate, then write**: shape errors are returned before any output
//!   element changes
//! - **Exclusive ownership**: copies are deep, transfers empty the source
//!
//! # Quick Start
//!
//! ```rust
//! use matriz::{ops, Matrix};
//!
//! let a = Matrix::filled(3, 2, 2.0).unwrap();
//! let b = Matrix::filled(3, 2, 3.0).unwrap();
//! let mut c = Matrix::zeros(3, 2).unwrap();
//!
//! ops::add(&mut c, &a, &b).unwrap();
//! assert!(c.as_slice().iter().all(|&v| v == 5.0));
//! ```
//!
//! # Features
//!
//! - `tracing`: spans on the heavier operations and trace events on matrix
//!   copies and moves

pub mod error;
pub mod init;
pub mod matrix;
pub mod nn;
pub mod ops;
pub mod preprocess;

pub use error::{MatrizError, Result};
pub use init::{DEFAULT_RANDOMIZE_RANGE, MAX_RANDOMIZE_RANGE};
pub use matrix::Matrix;
