/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PRIMARY_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_EMBED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";
pub const DEFAULT_EMBED_REFERER: &str = "https://vuen.link/";
pub const DEFAULT_EMBED_FETCH_DEST: &str = "iframe";

// Catalogue source defaults
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://apiv2.sonyliv.com/AGL/4.7/A/ENG/WEB/IN/UNKNOWN/TRAY/EXTCOLLECTION/30188540?layout=spotlight_layout&id=30188_540",
    "https://apiv2.sonyliv.com/AGL/4.7/A/ENG/WEB/IN/UNKNOWN/TRAY/EXTCOLLECTION/3937924064?layout=portrait_layout&id=39379_24064",
    "https://apiv2.sonyliv.com/AGL/3.5/A/ENG/WEB/IN/UNKNOWN/PAGE-V2/39379_24064?kids_safe=false",
];
pub const DEFAULT_LEAF_LAYOUT: &str = "CONTENT_ITEM";
pub const DEFAULT_GROUP_LAYOUT: &str = "portrait_layout";

// Schedule feed defaults
pub const DEFAULT_SCHEDULE_ENDPOINT: &str = "https://s2watch.me/api/v1/schedule/list?detailed=true";
pub const DEFAULT_REDIRECT_PREFIX: &str = "https://vuen.link/ch?id=";
pub const DEFAULT_EMBED_TEMPLATE: &str =
    "https://vividmosaica.com/embed3.php?player=desktop&live=do{id}";
pub const DEFAULT_PLAYER_FUNCTION: &str = "trteHltUgp";
pub const DEFAULT_SCHEDULE_FILE: &str = "s1.json";

// Output defaults
pub const DEFAULT_LINK_TEMPLATE: &str = "https://dai.google.com/linear/hls/event/{key}/master.m3u8";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_DATE_FORMAT: &str = "%A %dth %B %Y";
pub const DEFAULT_LABEL_SUFFIX: &str = " - Schedule Time UK GMT";
pub const DEFAULT_CATEGORY: &str = "Soccer";
pub const DEFAULT_CHANNEL_NAME: &str = "Sliv";
pub const DEFAULT_GROUP_TITLE: &str = "Soccer";
pub const DEFAULT_SCHEDULE_DOCUMENT: &str = "api.json";
pub const DEFAULT_CHANNEL_LIST_DOCUMENT: &str = "max.json";
pub const DEFAULT_PLAYLIST_DOCUMENT: &str = "playlist.m3u";

// Publish defaults
pub const DEFAULT_OUTPUT_DIR: &str = "./data/output";
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_USER_AGENT: &str = "matchcast";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
