/// Marker for plain structs bundling the dependencies of a component.
pub trait Dependencies {}

/// Component which reads its dependencies from a bundle it owns.
///
/// ```
/// use providence::{Container, Dependencies, Scoped};
/// use std::sync::Arc;
///
/// struct ReportDeps {
///     title: Arc<str>,
///     pages: u32,
/// }
/// impl Dependencies for ReportDeps {}
///
/// struct Report(ReportDeps);
/// impl Scoped for Report {
///     type Dependencies = ReportDeps;
///     fn dependencies(&self) -> &ReportDeps {
///         &self.0
///     }
/// }
///
/// let container = Container::new();
/// container.register_shared::<Arc<str>>(Arc::from("Q3"));
/// container.register_factory(|| 12u32);
///
/// let report = Report(ReportDeps {
///     title: container.resolve(),
///     pages: container.resolve(),
/// });
/// assert_eq!("Q3", &*report.dependencies().title);
/// assert_eq!(12, report.dependencies().pages);
/// ```
pub trait Scoped {
    type Dependencies: Dependencies;

    fn dependencies(&self) -> &Self::Dependencies;
}
