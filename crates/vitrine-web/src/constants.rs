// DOM contract shared by the page markup and the wasm front-end.

// Optional JSON page config: <script type="application/json" id=...>
pub const PAGE_CONFIG_ID: &str = "page-config";

// Preloader
pub const PRELOADER_ID: &str = "preloader";
pub const PRELOADER_COUNTER_ID: &str = "preloader-counter";
pub const PRELOADER_ENTER_ID: &str = "preloader-enter";

// Main content is cloned from the template once the gate opens
pub const MAIN_TEMPLATE_ID: &str = "main-template";
pub const MAIN_CONTENT_ID: &str = "main-content";

// Cadence strobe
pub const CADENCE_STAGE_ID: &str = "cadence";
pub const CADENCE_WORD_ID: &str = "cadence-word";

// Music controls
pub const MUSIC_TOGGLE_ID: &str = "music-toggle";
pub const MUSIC_MUTE_ID: &str = "music-mute";

// Scroll sections measured by id; "page" falls back to the whole document
pub const PAGE_SECTION_ID: &str = "page";

// Content service
pub const CONTENT_URL: &str = "/api/cms/content";
pub const PHOTOS_URL: &str = "/api/cms/photos";
pub const CMS_KEY_ATTR: &str = "data-cms-key";
pub const CMS_PHOTO_ATTR: &str = "data-cms-photo"; // "<section>:<slot>"

// Classes
pub const HIDDEN_CLASS: &str = "hidden";
pub const READY_CLASS: &str = "is-ready";
pub const PLAYING_CLASS: &str = "is-playing";
pub const MUTED_CLASS: &str = "is-muted";

// A frame slower than this is logged
pub const SLOW_FRAME_MS: f32 = 50.0;
