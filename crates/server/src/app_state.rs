use shared::protocol::Repository;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repositories: Vec<Repository>,
    /// When set, every product submission is answered with this status.
    pub(crate) product_failure_status: Option<u16>,
}
