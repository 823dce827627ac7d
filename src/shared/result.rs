/// Crate-wide Result alias. Fatal errors travel as `anyhow::Error`, usually
/// wrapping an `AppStreamError`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
