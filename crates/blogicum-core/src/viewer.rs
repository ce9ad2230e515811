//! The actor on whose behalf a request is served.

use uuid::Uuid;

/// Who is looking. Threaded explicitly through every policy and service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// True when the viewer is the authenticated user `id`.
    pub fn is(&self, id: Uuid) -> bool {
        self.user_id() == Some(id)
    }
}

impl From<Option<Uuid>> for Viewer {
    fn from(id: Option<Uuid>) -> Self {
        id.map_or(Self::Anonymous, Self::User)
    }
}
