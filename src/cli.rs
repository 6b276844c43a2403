use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pairdiff",
    version,
    about = "Side-by-side and unified diff of two texts with drag-to-select lines"
)]
pub struct Cli {
    /// Old version of the text (`-` reads stdin)
    pub old: PathBuf,

    /// New version of the text (`-` reads stdin)
    pub new: PathBuf,

    /// Start in unified (consolidated) view instead of split
    #[arg(long)]
    pub unified: bool,

    /// Highlight as this language instead of guessing from the file names
    #[arg(short, long)]
    pub language: Option<String>,

    /// Color theme (one-dark, github-dark, dracula)
    #[arg(long)]
    pub theme: Option<String>,

    /// Title of the old column
    #[arg(long)]
    pub old_title: Option<String>,

    /// Title of the new column
    #[arg(long)]
    pub new_title: Option<String>,

    /// Rows rendered beyond each edge of the visible area
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Disable syntax highlighting
    #[arg(long)]
    pub no_highlight: bool,
}

impl Cli {
    pub fn reads_stdin(&self) -> (bool, bool) {
        (is_stdin(&self.old), is_stdin(&self.new))
    }
}

pub fn is_stdin(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}
