//! Quickstart for matriz
//!
//! Adds two filled matrices, then runs a tiny dense layer forward pass.
//!
//! Run with: cargo run --example quickstart

use matriz::{init, nn, ops, preprocess, Matrix};

fn main() -> matriz::Result<()> {
    println!("Matriz Quickstart");
    println!("=================\n");

    let a = Matrix::filled(3, 2, 2.0)?;
    let b = Matrix::filled(3, 2, 3.0)?;
    println!("A (3×2):");
    a.print();

    let mut sum = Matrix::zeros(3, 2)?;
    ops::add(&mut sum, &a, &b)?;
    println!("A + B:");
    sum.print();

    // Cut a 2×2 input batch out of a larger dataset
    let dataset = vec![
        vec![0.1, 0.2, 0.3, 0.4],
        vec![0.5, 0.6, 0.7, 0.8],
        vec![0.9, 1.0, 1.1, 1.2],
    ];
    let input = preprocess::extract_window(2, 2, 1, 1, &dataset)?;
    println!("\nInput window (rows 1-2, columns 1-2):");
    input.print();

    let mut weights = Matrix::zeros(2, 3)?;
    init::xavier_uniform_from_entropy(&mut weights);
    let mut bias = Matrix::zeros(1, 3)?;
    init::randomize_from_entropy(&mut bias, 0.1)?;

    let mut hidden = ops::auto_create(&input, &weights)?;
    ops::multiply(&mut hidden, &input, &weights)?;
    let mut tiled_bias = Matrix::zeros(hidden.rows(), hidden.cols())?;
    nn::broadcast(&mut tiled_bias, &bias, hidden.rows(), hidden.cols())?;
    let mut output = Matrix::zeros(hidden.rows(), hidden.cols())?;
    ops::add(&mut output, &hidden, &tiled_bias)?;

    println!("\nLayer output (2×3):");
    output.print();

    let mut magnitude = Matrix::zeros(output.rows(), output.cols())?;
    nn::absolute(&mut magnitude, &output)?;
    println!("\nL1 norm: {}", nn::sum_all_elements(&magnitude));

    Ok(())
}
