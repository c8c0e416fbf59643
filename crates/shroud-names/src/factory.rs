/// A restartable source of candidate names.
///
/// Sequences are infinite, so `next_name` never fails. Callers that need
/// unique names keep drawing until a candidate passes their own check.
pub trait NameFactory {
    /// Restarts the sequence from its first candidate.
    fn reset(&mut self);

    /// Returns the next candidate.
    fn next_name(&mut self) -> String;
}

impl<F: NameFactory + ?Sized> NameFactory for Box<F> {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn next_name(&mut self) -> String {
        (**self).next_name()
    }
}
