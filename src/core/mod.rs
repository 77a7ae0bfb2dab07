// Domain-layer modules and shared errors/models
pub mod enrichment {
    pub use crate::enrichment::*;
}

pub mod pitch {
    pub use crate::pitch::*;
}

pub mod campus {
    pub use crate::campus::*;
}

pub mod brand {
    pub use crate::brand::*;
}

pub mod language {
    pub use crate::language::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
