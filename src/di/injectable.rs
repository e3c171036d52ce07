use crate::di::Container;
use crate::error::Result;

/// Types that can build themselves from the services in a [`Container`].
///
/// Fields holding `Arc<T>` resolve with `container.resolve::<T>()`, fields
/// holding `Arc<dyn Trait>` with `container.resolve_trait::<dyn Trait>()`.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// # Errors
    /// Returns an error if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
