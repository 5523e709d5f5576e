use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub error: Color,
  pub key_fg: Color,
  pub key_bg: Color,
  pub tag: Color,
}

pub static THEMES: [Theme; 3] = [
  Theme {
    name: "Midnight",
    bg: Color::Rgb(22, 24, 33),
    fg: Color::Rgb(220, 223, 228),
    muted: Color::Rgb(120, 126, 140),
    accent: Color::Rgb(255, 92, 92),
    border: Color::Rgb(60, 64, 78),
    highlight_fg: Color::Rgb(255, 255, 255),
    highlight_bg: Color::Rgb(58, 48, 70),
    stripe_bg: Color::Rgb(28, 30, 40),
    error: Color::Rgb(255, 120, 100),
    key_fg: Color::Rgb(22, 24, 33),
    key_bg: Color::Rgb(160, 166, 180),
    tag: Color::Rgb(140, 180, 255),
  },
  Theme {
    name: "Paper",
    bg: Color::Rgb(250, 248, 242),
    fg: Color::Rgb(40, 40, 40),
    muted: Color::Rgb(130, 130, 125),
    accent: Color::Rgb(200, 40, 40),
    border: Color::Rgb(200, 196, 186),
    highlight_fg: Color::Rgb(20, 20, 20),
    highlight_bg: Color::Rgb(238, 226, 200),
    stripe_bg: Color::Rgb(243, 240, 232),
    error: Color::Rgb(190, 50, 30),
    key_fg: Color::Rgb(250, 248, 242),
    key_bg: Color::Rgb(90, 90, 90),
    tag: Color::Rgb(40, 90, 170),
  },
  Theme {
    name: "Terminal",
    bg: Color::Reset,
    fg: Color::White,
    muted: Color::DarkGray,
    accent: Color::Red,
    border: Color::DarkGray,
    highlight_fg: Color::Black,
    highlight_bg: Color::Gray,
    stripe_bg: Color::Reset,
    error: Color::LightRed,
    key_fg: Color::Black,
    key_bg: Color::Gray,
    tag: Color::Cyan,
  },
];
