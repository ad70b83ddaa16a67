//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use stellar_burgers_core::async_effect;
///
/// async_effect! {
///     let catalog = api.ingredients().await.ok()?;
///     Some(CatalogAction::Loaded(catalog))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
