/// Constants used throughout the gantry codebase
// Root namespace
pub const DEFAULT_ROOT: &str = "ROOT0";
pub const DEFAULT_ROOT_PREFIX: &str = "./";

// Name syntax. Names always use '/' regardless of platform; conversion to
// platform-native paths happens only at the filesystem boundary.
pub const RESOLVED_MARKER: &str = "//";
pub const NAME_SEPARATOR: char = '/';
