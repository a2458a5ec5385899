//! Per-request accessors consulted by the guard.

use access_keeper::Clearances;

/// An incoming request, as seen by a [`Guard`](crate::Guard).
///
/// Hosts implement this for their request or session type. Only the handler
/// and action are required; a request that reports no clearance levels is
/// treated as a guest.
///
/// # Example
///
/// ```
/// use access_guard::AccessRequest;
/// use access_keeper::Clearances;
///
/// struct Request {
///     roles: Option<String>,
/// }
///
/// impl AccessRequest for Request {
///     fn clearance_levels(&self) -> Option<Clearances> {
///         self.roles.as_deref().map(Clearances::from_csv)
///     }
///
///     fn action_name(&self) -> &str {
///         "index"
///     }
///
///     fn handler_name(&self) -> &str {
///         "ArticlesController"
///     }
/// }
/// ```
pub trait AccessRequest {
    /// Clearance levels of the current principal.
    fn clearance_levels(&self) -> Option<Clearances> {
        None
    }

    /// Singular clearance accessor kept for older hosts.
    ///
    /// Only consulted when [`clearance_levels`](Self::clearance_levels)
    /// yields nothing and the guard allows it.
    #[deprecated(note = "implement `clearance_levels` instead")]
    fn clearance_level(&self) -> Option<Clearances> {
        None
    }

    /// Name of the action being performed (`index`, `edit`).
    fn action_name(&self) -> &str;

    /// Fully qualified name of the handler serving the request.
    fn handler_name(&self) -> &str;
}
