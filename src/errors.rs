use thiserror::Error;

/// An enum that indicates what went wrong when building or validating a
/// distribution specification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// A NaN (Not a Number) was found in the input.
    #[error("A NaN (Not a Number) was found in the input. ")]
    NanErr,
    /// A parameter did not fullfill the conditions of the distribution.
    /// Maybe `b <= a` for a range, a non-positive standard deviation, a
    /// negative probability, a zero sample size or an infinite value where
    /// only finite ones are allowed.
    #[error(
        "A parameter did not fullfill the conditions of the distribution. Maybe `b <= a` for a range, a non-positive standard deviation, a negative probability, a zero sample size or an infinite value where only finite ones are allowed. "
    )]
    InvalidParameter,
    /// The outcome table of a discrete specification was empty (or all its
    /// probabilities were zero, wich makes it impossible to normalize).
    #[error(
        "The outcome table of a discrete specification was empty (or all its probabilities were zero). "
    )]
    EmptyOutcomeTable,
}

/// An enum that indicates what went wrong with an estimation or a test.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatError {
    /// A NaN (Not a Number) was found in the input. (Or maybe `+- inf` depending on the function)
    #[error(
        "A NaN (Not a Number) was found in the input. (Or maybe `+- inf` depending on the function)"
    )]
    NanErr,
    /// There were no samples at all: no moment can be estimated from an
    /// empty sample.
    #[error("There were no samples at all: no moment can be estimated from an empty sample. ")]
    DegenerateSample,
    /// Less than 2 bins were requested, or every bin ended up with zero
    /// expected frequency (the spec and the sample range do not overlap).
    #[error(
        "Less than 2 bins were requested, or every bin ended up with zero expected frequency (the spec and the sample range do not overlap). "
    )]
    InsufficientBins,
    /// The significance level was set to an invalid value. (`0.0 < significance < 1.0`)
    #[error("The significance level was set to an invalid value. (`0.0 < significance < 1.0`)")]
    InvalidSignificance,
    /// There was an error when performing some numerical computation.
    /// Overflow/underflow/division by 0 (for example standardized moments of
    /// a zero-variance sample).
    #[error(
        "There was an error when performing some numerical computation. Overflow/underflow/division by 0"
    )]
    NumericalError,
}
