/// 点赞数来源响应头
pub const DATA_SOURCE_HEADER: &str = "X-Data-Source";

pub const URL_PATH_ALBUMS: &str = "/albums";
pub const URL_PATH_PLAYLISTS: &str = "/playlists";
pub const URL_PATH_COLLABORATIONS: &str = "/collaborations";
