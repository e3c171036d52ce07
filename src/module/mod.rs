use crate::di::Container;
use crate::error::Result;

/// A feature module: registers its providers and controllers.
///
/// Registration order matters, since a provider can only be injected once
/// everything it depends on is already in the container.
pub trait Module {
    fn register(container: &mut Container) -> Result<()>;
}
