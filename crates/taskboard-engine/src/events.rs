/// Notifications emitted by the repository after a state change.
///
/// Subscribers hold only derived read copies of repository state; on an
/// event they re-query rather than patching their copies in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryEvent {
    /// The canonical task list changed (status update, reorder, reset).
    TasksChanged,
    /// The search query changed; filtered views must be recomputed.
    SearchChanged,
}
