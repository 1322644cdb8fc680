use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Console colors for one theme.
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  info: Color,
  success: Color,
  label: Color,
  value: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

const DARK: Palette = Palette {
  timestamp: rgb(110, 150, 190),
  primary: rgb(200, 210, 225),
  accent: rgb(230, 120, 80),
  info: rgb(110, 150, 190),
  success: rgb(95, 185, 140),
  label: rgb(49, 120, 198),
  value: rgb(240, 200, 90),
};

const LIGHT: Palette = Palette {
  timestamp: rgb(70, 90, 120),
  primary: rgb(40, 45, 60),
  accent: rgb(190, 70, 40),
  info: rgb(30, 95, 165),
  success: rgb(30, 130, 80),
  label: rgb(30, 80, 150),
  value: rgb(150, 100, 20),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      Color::Black => ComfyColor::Black,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::Reset => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn palette(&self) -> &'static Palette {
    match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  const fn pick(&self, color: Color) -> Color {
    if self.enabled { color } else { Color::Reset }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette().timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette().primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette().accent)
  }

  pub const fn info(&self) -> Color {
    self.pick(self.palette().info)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette().success)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette().label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette().value)
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
      _ => Some(ClapColor::Ansi(AnsiColor::White)),
    }
  }

  /// Help output styles, always using the dark palette.
  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_env(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// Reads the background slot of a `COLORFGBG` value such as `15;0`; light when it is 8 or above.
fn theme_from_env(colorfgbg: Option<&str>) -> Theme {
  colorfgbg
    .and_then(|value| value.split(';').next_back())
    .and_then(|bg| bg.parse::<u8>().ok())
    .map_or(Theme::Dark, |bg| if bg >= 8 { Theme::Light } else { Theme::Dark })
}
