use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use harvest_defence_core::CropKind;
use harvest_defence_rendering::Color;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Palette and glyph set used by the Macroquad backend.
///
/// Every field has a compiled-in default; the optional `assets/theme.toml`
/// manifest overrides entries selectively. The theme is presentation-only
/// and never feeds back into the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Window clear color behind the field and sidebar.
    pub background: Color,
    /// Fill color of a field tile.
    pub soil: Color,
    /// Grid line color between tiles.
    pub grid_line: Color,
    /// Sidebar panel fill.
    pub sidebar_background: Color,
    /// Sidebar panel border.
    pub sidebar_border: Color,
    /// Highlight behind the selected seed row.
    pub selection_highlight: Color,
    /// Color of the player's vehicle glyph.
    pub player: Color,
    /// Color of raider glyphs.
    pub raider: Color,
    /// Primary sidebar text color.
    pub text: Color,
    /// Glyph drawn for the player's vehicle.
    pub player_glyph: char,
    /// Glyph drawn for each raider.
    pub raider_glyph: char,
    crop_colors: [Color; CropKind::ALL.len()],
}

impl Theme {
    /// Returns the path probed for the optional theme manifest.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/theme.toml")
    }

    /// Loads the default manifest if present, falling back to the built-in
    /// theme when the file does not exist. A present-but-invalid manifest is
    /// an error rather than a silent fallback.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_manifest_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_manifest_path(path)
    }

    /// Loads a theme manifest from the provided path.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read theme manifest at {}",
                manifest_path.display()
            )
        })?;
        parse_theme(&contents)
    }

    /// Color used for glyphs of the provided crop kind.
    #[must_use]
    pub fn crop_color(&self, kind: CropKind) -> Color {
        self.crop_colors[kind.slot().get() as usize - 1]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0x28, 0x78, 0x28),
            soil: Color::from_rgb_u8(0x50, 0x32, 0x14),
            grid_line: Color::from_rgb_u8(0x1e, 0x1e, 0x1e),
            sidebar_background: Color::from_rgb_u8(0x32, 0x3c, 0x46),
            sidebar_border: Color::from_rgb_u8(0x14, 0x14, 0x14),
            selection_highlight: Color::from_rgb_u8(0xdc, 0xdc, 0x46),
            player: Color::from_rgb_u8(0xff, 0xff, 0xff),
            raider: Color::from_rgb_u8(0xc8, 0xc8, 0xd2),
            text: Color::from_rgb_u8(0xe6, 0xe6, 0xe6),
            player_glyph: '@',
            raider_glyph: 'r',
            crop_colors: [
                Color::from_rgb_u8(0xe6, 0xc8, 0x32), // corn
                Color::from_rgb_u8(0xc8, 0xa0, 0x64), // potato
                Color::from_rgb_u8(0xe6, 0x3c, 0x28), // tomato
                Color::from_rgb_u8(0x64, 0xc8, 0x50), // bean
                Color::from_rgb_u8(0x96, 0xdc, 0x78), // cabbage
                Color::from_rgb_u8(0x3c, 0x8c, 0x3c), // broccoli
            ],
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    colors: ColorOverrides,
    #[serde(default)]
    glyphs: GlyphOverrides,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ColorOverrides {
    background: Option<String>,
    soil: Option<String>,
    grid_line: Option<String>,
    sidebar_background: Option<String>,
    sidebar_border: Option<String>,
    selection_highlight: Option<String>,
    player: Option<String>,
    raider: Option<String>,
    text: Option<String>,
    #[serde(default)]
    crops: HashMap<String, String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct GlyphOverrides {
    player: Option<String>,
    raider: Option<String>,
}

fn parse_theme(contents: &str) -> Result<Theme> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse theme manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported theme manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut theme = Theme::default();
    let colors = manifest.colors;
    apply_color(&mut theme.background, colors.background.as_deref(), "background")?;
    apply_color(&mut theme.soil, colors.soil.as_deref(), "soil")?;
    apply_color(&mut theme.grid_line, colors.grid_line.as_deref(), "grid_line")?;
    apply_color(
        &mut theme.sidebar_background,
        colors.sidebar_background.as_deref(),
        "sidebar_background",
    )?;
    apply_color(
        &mut theme.sidebar_border,
        colors.sidebar_border.as_deref(),
        "sidebar_border",
    )?;
    apply_color(
        &mut theme.selection_highlight,
        colors.selection_highlight.as_deref(),
        "selection_highlight",
    )?;
    apply_color(&mut theme.player, colors.player.as_deref(), "player")?;
    apply_color(&mut theme.raider, colors.raider.as_deref(), "raider")?;
    apply_color(&mut theme.text, colors.text.as_deref(), "text")?;

    for (name, value) in colors.crops {
        let kind = parse_crop_name(&name)
            .with_context(|| format!("unknown crop `{name}` in theme manifest"))?;
        let index = kind.slot().get() as usize - 1;
        theme.crop_colors[index] = parse_hex_color(&value)
            .with_context(|| format!("invalid color for crop `{name}`"))?;
    }

    if let Some(glyph) = manifest.glyphs.player.as_deref() {
        theme.player_glyph = parse_glyph(glyph).context("invalid player glyph")?;
    }
    if let Some(glyph) = manifest.glyphs.raider.as_deref() {
        theme.raider_glyph = parse_glyph(glyph).context("invalid raider glyph")?;
    }

    Ok(theme)
}

fn apply_color(slot: &mut Color, value: Option<&str>, name: &str) -> Result<()> {
    if let Some(value) = value {
        *slot = parse_hex_color(value).with_context(|| format!("invalid color for `{name}`"))?;
    }
    Ok(())
}

fn parse_crop_name(name: &str) -> Result<CropKind> {
    match name {
        "Corn" => Ok(CropKind::Corn),
        "Potato" => Ok(CropKind::Potato),
        "Tomato" => Ok(CropKind::Tomato),
        "Bean" => Ok(CropKind::Bean),
        "Cabbage" => Ok(CropKind::Cabbage),
        "Broccoli" => Ok(CropKind::Broccoli),
        _ => bail!("unknown crop name `{name}`"),
    }
}

fn parse_hex_color(value: &str) -> Result<Color> {
    let digits = value
        .strip_prefix('#')
        .with_context(|| format!("color `{value}` must start with `#`"))?;
    if digits.len() != 6 {
        bail!("color `{value}` must use exactly six hex digits");
    }
    let red = u8::from_str_radix(&digits[0..2], 16)
        .with_context(|| format!("color `{value}` has invalid hex digits"))?;
    let green = u8::from_str_radix(&digits[2..4], 16)
        .with_context(|| format!("color `{value}` has invalid hex digits"))?;
    let blue = u8::from_str_radix(&digits[4..6], 16)
        .with_context(|| format!("color `{value}` has invalid hex digits"))?;
    Ok(Color::from_rgb_u8(red, green, blue))
}

fn parse_glyph(value: &str) -> Result<char> {
    let mut chars = value.chars();
    let Some(glyph) = chars.next() else {
        bail!("glyph must not be empty");
    };
    if chars.next().is_some() {
        bail!("glyph `{value}` must be a single character");
    }
    Ok(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_yield_the_default_theme() {
        let theme = parse_theme("version = 1\n").expect("minimal manifest parses");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn partial_overrides_keep_untouched_defaults() {
        let manifest = r##"
            version = 1

            [colors]
            background = "#101010"

            [colors.crops]
            Tomato = "#ff0000"

            [glyphs]
            raider = "R"
        "##;

        let theme = parse_theme(manifest).expect("manifest parses");
        assert_eq!(theme.background, Color::from_rgb_u8(0x10, 0x10, 0x10));
        assert_eq!(
            theme.crop_color(CropKind::Tomato),
            Color::from_rgb_u8(0xff, 0x00, 0x00)
        );
        assert_eq!(
            theme.crop_color(CropKind::Corn),
            Theme::default().crop_color(CropKind::Corn)
        );
        assert_eq!(theme.raider_glyph, 'R');
        assert_eq!(theme.player_glyph, '@');
    }

    #[test]
    fn unsupported_versions_are_rejected() {
        assert!(parse_theme("version = 2\n").is_err());
    }

    #[test]
    fn unknown_crop_names_are_rejected() {
        let manifest = r##"
            version = 1

            [colors.crops]
            Turnip = "#ffffff"
        "##;
        assert!(parse_theme(manifest).is_err());
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for bad in ["ff0000", "#ff00", "#ggffff"] {
            let manifest = format!("version = 1\n\n[colors]\nsoil = \"{bad}\"\n");
            assert!(parse_theme(&manifest).is_err(), "`{bad}` must be rejected");
        }
    }

    #[test]
    fn multi_character_glyphs_are_rejected() {
        let manifest = "version = 1\n\n[glyphs]\nplayer = \"@@\"\n";
        assert!(parse_theme(manifest).is_err());
    }

    #[test]
    fn explicit_manifest_paths_must_exist() {
        let theme = Theme::from_manifest_path("assets/definitely-not-here.toml");
        assert!(theme.is_err());
    }
}
