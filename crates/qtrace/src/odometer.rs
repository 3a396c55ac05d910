//! Mixed-radix enumeration and accumulation of a partial trace.

use faer::Mat;
use log::trace;
use num_traits::Zero;
use smallvec::SmallVec;

use qtrace_core::Entry;

use crate::resolve::TraceLayout;

/// Counters kept inline up to this many positions (seven subsystems plus
/// the sentinel).
const INLINE_COUNTERS: usize = 16;

type Counters = SmallVec<[usize; INLINE_COUNTERS]>;

/// A multi-wheel counter with an independent radix per position.
///
/// Position 0 is the least significant wheel. A sentinel wheel past the
/// last position absorbs the final carry, which ends the enumeration.
#[derive(Clone, Debug)]
pub struct Odometer {
    counters: Counters,
    bounds: Counters,
}

impl Odometer {
    /// An odometer at zero with the given per-position bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace::Odometer;
    /// let mut odometer = Odometer::new([2, 3]);
    /// let mut states = 1;
    /// while odometer.advance() {
    ///     states += 1;
    /// }
    /// assert_eq!(states, 6);
    /// ```
    pub fn new<I: IntoIterator<Item = usize>>(bounds: I) -> Self {
        let mut bounds: Counters = bounds.into_iter().collect();
        bounds.push(2);
        let counters = SmallVec::from_elem(0, bounds.len());
        Self { counters, bounds }
    }

    /// The current digit of every position, sentinel excluded.
    #[inline(always)]
    pub fn digits(&self) -> &[usize] {
        &self.counters[..self.counters.len() - 1]
    }

    /// Step to the next state.
    ///
    /// Returns false once every state has been visited; the digits are then
    /// back at zero.
    #[inline]
    pub fn advance(&mut self) -> bool {
        let sentinel = self.counters.len() - 1;
        let mut pos = 0;
        self.counters[0] += 1;
        while pos < sentinel && self.counters[pos] >= self.bounds[pos] {
            self.counters[pos] = 0;
            pos += 1;
            self.counters[pos] += 1;
        }
        pos < sentinel
    }
}

/// Sum `entry(I, J)` into the reduced matrix for every pair of input
/// indices that agree on the traced subsystems.
///
/// The odometer has two wheels per logical subsystem: a row digit, and a
/// column digit that is pinned to zero for traced subsystems so the column
/// index reuses the row digit there. `entry` reads the input at flat row
/// `I` and flat column `J`.
pub(crate) fn accumulate<T, F>(layout: &TraceLayout, entry: F) -> Mat<T>
where
    T: Entry,
    F: Fn(usize, usize) -> T,
{
    let n = layout.num_subsystems();
    let keep_dim = layout.keep_dim();
    let dims = layout.dims();
    let strides = layout.strides();
    let reduced_strides = layout.reduced_strides();

    let mut out = Mat::from_fn(keep_dim, keep_dim, |_, _| T::zero());

    let column_bounds = (0..n).map(|i| if layout.is_traced(i) { 1 } else { dims[i] });
    let mut odometer = Odometer::new(dims.iter().copied().chain(column_bounds));
    trace!(
        "odometer: {} wheels, {} states",
        2 * n,
        layout.trace_dim() * keep_dim * keep_dim
    );

    loop {
        let (row_digits, col_digits) = odometer.digits().split_at(n);

        let (mut i, mut j, mut k, mut l) = (0, 0, 0, 0);
        let mut kept = 0;
        for q in 0..n {
            let stride = strides[q];
            i += stride * row_digits[q];
            if layout.is_traced(q) {
                j += stride * row_digits[q];
            } else {
                j += stride * col_digits[q];
                let reduced_stride = reduced_strides[kept];
                k += reduced_stride * row_digits[q];
                l += reduced_stride * col_digits[q];
                kept += 1;
            }
        }

        out[(k, l)] += entry(i, j);

        if !odometer.advance() {
            break;
        }
    }

    out
}
