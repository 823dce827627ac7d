/// ProgressReporter port for user-facing progress messages
///
/// Goes to stderr so it never mixes with report output on stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports a long-running step; implementations may show a spinner
    /// until the next call.
    fn report_step(&self, message: &str);

    /// Reports a warning that does not stop the run
    fn report_warning(&self, message: &str);

    /// Reports an error or failed operation
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
