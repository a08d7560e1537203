/// Result of reading the project shortcuts file.
///
/// A missing file is not an error: `exists` is false and the view shows onboarding instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLoad {
    pub exists: bool,
    pub identifiers: Vec<String>,
}

impl ProjectLoad {
    pub fn not_configured() -> Self {
        Self::default()
    }

    pub fn configured(identifiers: Vec<String>) -> Self {
        Self { exists: true, identifiers }
    }
}
