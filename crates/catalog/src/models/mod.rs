mod champion;
mod grouping;
mod report;
mod skin;
mod version;

pub use self::champion::Champion;
pub use self::grouping::Grouping;
pub use self::report::AddedEntitiesReport;
pub use self::skin::{QuestSkinInfo, Skin, SkinTier, Skins, split_id};
pub use self::version::{ContentMetadata, ContentVersion, has_changed};

use serde::{Deserialize, Serialize};

/// One channel's worth of normalized game data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub champions: Vec<Champion>,
    pub skinlines: Vec<Grouping>,
    pub skins: Skins,
    pub universes: Vec<Grouping>,
}
