pub const THEME_COOKIE: &str = "theme";
const COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Green,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Green];

    pub fn parse(value: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|theme| theme.as_str() == value.trim())
    }

    /// Theme stored in the cookie, light when unset or unknown.
    pub fn from_cookie(value: Option<&str>) -> Theme {
        value.and_then(Theme::parse).unwrap_or_default()
    }

    /// Theme from a raw `Cookie` request header.
    pub fn from_cookie_header(header: Option<&str>) -> Theme {
        let value = header.and_then(|cookies| {
            cookies.split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .find(|(name, _)| *name == THEME_COOKIE)
                .map(|(_, value)| value)
        });
        Theme::from_cookie(value)
    }

    /// `Set-Cookie` value remembering this theme.
    pub fn to_cookie(&self) -> String {
        format!("{}={}; Path=/; Max-Age={}; SameSite=Lax", THEME_COOKIE, self.as_str(), COOKIE_MAX_AGE_SECS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Green => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Green => "Green",
        }
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Green,
            Theme::Green => Theme::Light,
        }
    }
}
