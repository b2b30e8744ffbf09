//! Background theme color, its persistence, and contrast-aware text color.

pub mod color;
pub mod contrast;
pub mod store;

pub use color::{DEFAULT_BACKGROUND, InvalidThemeColor, Rgb, ThemeColor};
pub use contrast::{
    ContrastColor, LUMINANCE_THRESHOLD, ThemePalette, contrast_color,
};
pub use store::{ThemeStore, ThemeStoreError, ThemeUpdate};
