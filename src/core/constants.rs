//! Engine-wide magic numbers for auto-framing, styling and the animation timeline.
//! Keeping them in a single place makes it easier to tweak them consistently.

/// Zoom level the auto-framing formula starts from before subtracting the span term.
pub const AUTO_ZOOM_BASE: f64 = 6.5;

/// The rounded-up extent span (in degrees) is divided by this before being
/// subtracted from [`AUTO_ZOOM_BASE`].
pub const AUTO_ZOOM_SPAN_DIVISOR: f64 = 10.0;

/// Auto-framing never zooms out further than this.
pub const MIN_AUTO_ZOOM: f64 = 1.0;

/// Separator placed between attribute values when building hover text.
pub const HOVER_TEXT_SEPARATOR: &str = "_";

/// Default marker color.
pub const DEFAULT_MARKER_COLOR: &str = "darkblue";

/// Default overlay opacity used by the plot entry point.
pub const DEFAULT_PLOT_OPACITY: f64 = 0.5;

/// Overlay layer defaults when no override is given.
pub const DEFAULT_LAYER_COLOR: &str = "red";
pub const DEFAULT_LAYER_OPACITY: f64 = 0.3;
pub const DEFAULT_LAYER_OUTLINE_COLOR: &str = "red";

/// Source type of every overlay layer.
pub const LAYER_SOURCE_TYPE: &str = "geojson";

/// Timeline: slider transition and per-step frame/transition duration.
pub const SLIDER_TRANSITION_MS: u32 = 300;
pub const STEP_FRAME_DURATION_MS: u32 = 300;
pub const STEP_TRANSITION_MS: u32 = 300;

/// Pausing jumps immediately: no frame time, no transition.
pub const PAUSE_FRAME_DURATION_MS: u32 = 0;
pub const PAUSE_TRANSITION_MS: u32 = 0;

/// Slider placement (fractions of the plot area) and padding (pixels).
pub const SLIDER_LENGTH: f64 = 0.9;
pub const SLIDER_X: f64 = 0.1;
pub const SLIDER_PAD_BOTTOM: u32 = 10;
pub const SLIDER_PAD_TOP: u32 = 30;

/// Play/pause button placement and padding.
pub const PLAY_BUTTON_POSITION: (f64, f64) = (0.1, -0.1);
pub const PAUSE_BUTTON_POSITION: (f64, f64) = (0.1, 0.05);
pub const BUTTON_PAD_RIGHT: u32 = 20;
pub const BUTTON_PAD_TOP: u32 = 40;

/// Environment variable holding the default base-map access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Spatial reference identifier meaning "unspecified".
pub const UNKNOWN_SRID: i32 = 0;

/// Default geometry column names for in-memory sets and database reads.
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geometry";
pub const DEFAULT_DB_GEOMETRY_COLUMN: &str = "geom";
