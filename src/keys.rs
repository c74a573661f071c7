use derive_more::Display;

/// Every key the pipeline reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CacheKey {
    /// The run cursor ([`PersistentCursor`](crate::PersistentCursor)).
    #[display("persistentVars")]
    PersistentVars,
    #[display("champions")]
    Champions,
    #[display("skinlines")]
    Skinlines,
    #[display("skins")]
    Skins,
    #[display("universes")]
    Universes,
    /// Entities present on the tracked channel but not the reference one.
    #[display("added")]
    Added,
    /// Mined art changes.
    #[display("changes")]
    Changes,
}
impl CacheKey {
    pub const ALL: [CacheKey; 7] = [
        Self::PersistentVars,
        Self::Champions,
        Self::Skinlines,
        Self::Skins,
        Self::Universes,
        Self::Added,
        Self::Changes,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersistentVars => "persistentVars",
            Self::Champions => "champions",
            Self::Skinlines => "skinlines",
            Self::Skins => "skins",
            Self::Universes => "universes",
            Self::Added => "added",
            Self::Changes => "changes",
        }
    }
}
