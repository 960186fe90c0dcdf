// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>

// -----------------------------------------------------------------------------------
// Vector utilities
// -----------------------------------------------------------------------------------

use num::{Float, Zero};

// Elementwise minimum res[i] = min(vec1[i], vec2[i])
pub fn vecvecmin<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    vec1.iter()
        .enumerate()
        .map(|(ii, el)| el.min(*vec2.get(ii).unwrap_or(&Zero::zero())))
        .collect()
}

// Elementwise maximum res[i] = max(vec1[i], vec2[i])
pub fn vecvecmax<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    vec1.iter()
        .enumerate()
        .map(|(ii, el)| el.max(*vec2.get(ii).unwrap_or(&Zero::zero())))
        .collect()
}

// Elementwise difference res[i] = vec1[i] - vec2[i]
pub fn vecvecdif<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    vec1.iter()
        .enumerate()
        .map(|(ii, el)| *el - *vec2.get(ii).unwrap_or(&Zero::zero()))
        .collect()
}

// Multiply vector by scalar
pub fn veckmul<T: Float>(vec1: &[T], k: T) -> Vec<T> {
    vec1.iter().map(|el| *el * k).collect()
}

// Euclidean norm sqrt(sum(vec[i]^2))
pub fn vecnorm<T: Float>(vec: &[T]) -> T {
    vec.iter()
        .fold(T::zero(), |acc, el| acc + *el * *el)
        .sqrt()
}

// Euclidean distance between two vectors
pub fn vecdist<T: Float>(vec1: &[T], vec2: &[T]) -> T {
    vecnorm(&vecvecdif(vec1, vec2))
}

// Divide by the euclidean norm. A zero vector stays zero
pub fn vecnormalize<T: Float>(vec: &[T]) -> Vec<T> {
    let norm = vecnorm(vec);
    if norm == T::zero() {
        vec![T::zero(); vec.len()]
    } else {
        vec.iter().map(|el| *el / norm).collect()
    }
}

// Column jj of a row-major matrix
pub fn matcol<T: Float>(mat: &[Vec<T>], jj: usize) -> Vec<T> {
    mat.iter()
        .map(|row| *row.get(jj).unwrap_or(&Zero::zero()))
        .collect()
}
