/// One sampled value, immutable once pushed. `recorded_us` is monotonic time
/// from the pipeline [`TimeBase`](crate::TimeBase), so consumers can tell how
/// far a queued reading lags behind production.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<T> {
    pub value: T,
    pub recorded_us: u64,
}

impl<T> Reading<T> {
    pub fn new(value: T, recorded_us: u64) -> Self {
        Self { value, recorded_us }
    }
}
