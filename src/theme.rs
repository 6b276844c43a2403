use ratatui::style::Color;

/// Color slots used by the diff viewer.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,

    pub diff_add_bg: Color,
    pub diff_del_bg: Color,
    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub diff_context_fg: Color,
    /// Background of padding cells in split mode.
    pub filler_bg: Color,
    pub selection_bg: Color,

    pub success: Color,
    pub error: Color,

    pub syntax: SyntaxColors,
}

#[derive(Debug, Clone)]
pub struct SyntaxColors {
    pub comment: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub type_name: Color,
    pub variable: Color,
    pub operator: Color,
    pub property: Color,
    pub tag: Color,
    pub punctuation: Color,
    pub default_fg: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "github-dark", "dracula"];

impl Theme {
    /// Look up a built-in theme; unknown names get `one-dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            _ => one_dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        one_dark()
    }
}

pub fn next_theme(current: &str) -> &'static str {
    let idx = THEME_NAMES.iter().position(|&n| n == current).unwrap_or(0);
    THEME_NAMES[(idx + 1) % THEME_NAMES.len()]
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Cyan,
        text: Color::White,
        text_muted: Color::DarkGray,
        surface: Color::Rgb(30, 30, 30),
        diff_add_bg: Color::Rgb(0, 30, 0),
        diff_del_bg: Color::Rgb(40, 0, 0),
        diff_add_fg: Color::Green,
        diff_del_fg: Color::Red,
        diff_context_fg: Color::Rgb(171, 178, 191),
        filler_bg: Color::Rgb(20, 20, 20),
        selection_bg: Color::Rgb(70, 50, 100),
        success: Color::Green,
        error: Color::Red,
        syntax: SyntaxColors {
            comment: Color::Rgb(106, 115, 125),
            keyword: Color::Rgb(198, 120, 221),
            string: Color::Rgb(152, 195, 121),
            number: Color::Rgb(209, 154, 102),
            function: Color::Rgb(97, 175, 239),
            type_name: Color::Rgb(229, 192, 123),
            variable: Color::Rgb(171, 178, 191),
            operator: Color::Rgb(86, 182, 194),
            property: Color::Rgb(224, 108, 117),
            tag: Color::Rgb(224, 108, 117),
            punctuation: Color::Rgb(140, 140, 140),
            default_fg: Color::Rgb(171, 178, 191),
        },
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: Color::Rgb(88, 166, 255),
        text: Color::Rgb(230, 237, 243),
        text_muted: Color::Rgb(125, 133, 144),
        surface: Color::Rgb(22, 27, 34),
        diff_add_bg: Color::Rgb(18, 40, 24),
        diff_del_bg: Color::Rgb(50, 18, 18),
        diff_add_fg: Color::Rgb(63, 185, 80),
        diff_del_fg: Color::Rgb(248, 81, 73),
        diff_context_fg: Color::Rgb(230, 237, 243),
        filler_bg: Color::Rgb(13, 17, 23),
        selection_bg: Color::Rgb(50, 60, 90),
        success: Color::Rgb(63, 185, 80),
        error: Color::Rgb(248, 81, 73),
        syntax: SyntaxColors {
            comment: Color::Rgb(125, 133, 144),
            keyword: Color::Rgb(255, 123, 114),
            string: Color::Rgb(165, 214, 255),
            number: Color::Rgb(121, 192, 255),
            function: Color::Rgb(210, 168, 255),
            type_name: Color::Rgb(255, 166, 87),
            variable: Color::Rgb(230, 237, 243),
            operator: Color::Rgb(255, 123, 114),
            property: Color::Rgb(121, 192, 255),
            tag: Color::Rgb(126, 231, 135),
            punctuation: Color::Rgb(125, 133, 144),
            default_fg: Color::Rgb(230, 237, 243),
        },
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(139, 233, 253),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        surface: Color::Rgb(40, 42, 54),
        diff_add_bg: Color::Rgb(15, 40, 15),
        diff_del_bg: Color::Rgb(45, 10, 10),
        diff_add_fg: Color::Rgb(80, 250, 123),
        diff_del_fg: Color::Rgb(255, 85, 85),
        diff_context_fg: Color::Rgb(248, 248, 242),
        filler_bg: Color::Rgb(30, 31, 40),
        selection_bg: Color::Rgb(80, 60, 120),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        syntax: SyntaxColors {
            comment: Color::Rgb(98, 114, 164),
            keyword: Color::Rgb(255, 121, 198),
            string: Color::Rgb(241, 250, 140),
            number: Color::Rgb(189, 147, 249),
            function: Color::Rgb(80, 250, 123),
            type_name: Color::Rgb(139, 233, 253),
            variable: Color::Rgb(248, 248, 242),
            operator: Color::Rgb(255, 121, 198),
            property: Color::Rgb(189, 147, 249),
            tag: Color::Rgb(255, 121, 198),
            punctuation: Color::Rgb(248, 248, 242),
            default_fg: Color::Rgb(248, 248, 242),
        },
    }
}
