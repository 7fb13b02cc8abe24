/// Decides whether a declared name is visible outside its package.
pub trait VisibilityPolicy: Send + Sync {
    fn is_exported(&self, name: &str) -> bool;
}

/// Exported iff the first character is an uppercase letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseExported;

impl VisibilityPolicy for UppercaseExported {
    fn is_exported(&self, name: &str) -> bool {
        name.chars().next().is_some_and(char::is_uppercase)
    }
}

impl<F> VisibilityPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_exported(&self, name: &str) -> bool {
        self(name)
    }
}
