// ndops/core/ops/src/helpers/range.rs

// Arithmetic sequence generator
use crate::context::LaunchContext;
use crate::metrics::RANGE_ELEMENTS_TOTAL;
use ndarray::ArrayD;
use ndops_tensor::{ArrayData, Element, NDArray};
use tracing::{debug, warn};

/// Element types the generator can write
pub trait SequenceElement: Element {
    /// `start + i * delta` in this type's arithmetic
    fn nth(start: Self, delta: Self, i: usize) -> Self;
}

macro_rules! impl_float_sequence {
    ($($t:ty),*) => {
        $(
            impl SequenceElement for $t {
                fn nth(start: Self, delta: Self, i: usize) -> Self {
                    start + (i as $t) * delta
                }
            }
        )*
    };
}

macro_rules! impl_int_sequence {
    ($($t:ty),*) => {
        $(
            impl SequenceElement for $t {
                fn nth(start: Self, delta: Self, i: usize) -> Self {
                    start.wrapping_add((i as $t).wrapping_mul(delta))
                }
            }
        )*
    };
}

impl_float_sequence!(f32, f64);
impl_int_sequence!(i32, i64);

/// Fill `output` with `start, start + delta, ..., start + (N - 1) * delta`
/// where `N` is the element count of `output`.
///
/// `start` and `delta` are scalars converted to the element type of
/// `output`. The caller is expected to pass a C-ordered buffer with unit
/// element stride; any other layout is still filled in logical row-major
/// order, through the slower strided path.
pub fn range(_context: &LaunchContext, start: &NDArray, delta: &NDArray, output: &mut NDArray) {
    let written = match output.data_mut() {
        ArrayData::Float32(out) => fill(start, delta, out),
        ArrayData::Float64(out) => fill(start, delta, out),
        ArrayData::Int32(out) => fill(start, delta, out),
        ArrayData::Int64(out) => fill(start, delta, out),
    };
    RANGE_ELEMENTS_TOTAL.inc_by(written as u64);
}

fn fill<T: SequenceElement>(start: &NDArray, delta: &NDArray, out: &mut ArrayD<T>) -> usize {
    if out.is_empty() {
        return 0;
    }

    let (start, delta) = match (start.e::<T>(0), delta.e::<T>(0)) {
        (Ok(start), Ok(delta)) => (start, delta),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Range parameters are not usable scalars, output left untouched");
            return 0;
        }
    };

    match out.as_slice_mut() {
        Some(slice) => {
            for (i, value) in slice.iter_mut().enumerate() {
                *value = T::nth(start, delta, i);
            }
            slice.len()
        }
        None => {
            debug!(strides = ?out.strides(), "Range output is not contiguous, using strided fill");
            let mut written = 0;
            for (i, value) in out.iter_mut().enumerate() {
                *value = T::nth(start, delta, i);
                written += 1;
            }
            written
        }
    }
}
