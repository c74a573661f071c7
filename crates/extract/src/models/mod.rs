mod patch;

pub use self::patch::Patch;
