use serde::Deserialize;

/// PATCH body shared by targets and tasks.
#[derive(Debug, Deserialize)]
pub struct SetCompletedRequest {
    pub completed: bool,
}
