use std::error::Error as StdError;

/// Error reporter is any object that can be used to collect errors during validation by
/// the [`Validation`] trait.
///
/// This is usually done directly by [`VecReporter`]. However, in most cases, users will
/// just use the `validate` method that uses the default vector reporter without caring
/// too much about the underlying implementation.
pub trait ErrorReporter<E: StdError>: Sized {
    /// Report an error into this [`ErrorReporter`].
    fn report<E2: Into<E>>(&mut self, error: E2);
}

/// A simple [`ErrorReporter`] implementation that collects all errors into a vector.
#[derive(Debug)]
pub struct VecReporter<E: StdError> {
    errors: Vec<E>,
}

impl<E: StdError> VecReporter<E> {
    #[must_use]
    pub fn new() -> VecReporter<E> {
        VecReporter { errors: Vec::new() }
    }

    #[must_use]
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }
}

impl<E: StdError> Default for VecReporter<E> {
    fn default() -> Self {
        VecReporter::new()
    }
}

impl<E: StdError> ErrorReporter<E> for VecReporter<E> {
    fn report<X: Into<E>>(&mut self, error: X) {
        self.errors.push(error.into());
    }
}

/// Validation trait is implemented by objects that can be validated.
///
/// Each validation process reports errors using a provided [ErrorReporter]. Compared to
/// traits like `From` and `Into`, validation can typically produce more than one error.
pub trait Validation {
    type Error: StdError;

    fn validate_all<R: ErrorReporter<Self::Error>>(&self, reporter: &mut R);

    fn validate(&self) -> Result<(), Vec<Self::Error>> {
        let mut reporter = VecReporter::new();
        self.validate_all(&mut reporter);
        if reporter.errors.is_empty() {
            Ok(())
        } else {
            Err(reporter.errors)
        }
    }
}
