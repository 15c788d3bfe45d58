use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lingopad")]
#[command(author, version, about = "Gemini-backed translation notepad with glossary enforcement", long_about = None)]
pub struct Cli {
    /// Store file path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text and append the result to the collection
    Translate(TranslateArgs),

    /// Re-translate existing lines in place
    Retranslate(RetranslateArgs),

    /// Fetch (or reuse) an explanation for a translated line
    Explain(ExplainArgs),

    /// Show the line collection
    List(ListArgs),

    /// Edit a line's original or translation text
    Edit(EditArgs),

    /// Delete lines by index
    Delete(DeleteArgs),

    /// Print selected lines to stdout
    Copy(CopyArgs),

    /// Remove every line
    Clear(ClearArgs),

    /// Export the collection as CSV
    Export(ExportArgs),

    /// Save, load, and manage named notes
    Note(NoteArgs),

    /// Manage the glossary
    Glossary(GlossaryArgs),

    /// Manage the API key
    Key(KeyArgs),

    /// Manage settings
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Text to translate
    #[arg(required = true)]
    pub text: String,

    /// Source language code, or "auto" (defaults to the saved choice)
    #[arg(long)]
    pub src: Option<String>,

    /// Target language code (defaults to the saved choice)
    #[arg(long)]
    pub tgt: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RetranslateArgs {
    /// Line indices to re-translate
    pub indices: Vec<usize>,

    /// Re-translate every line
    #[arg(long, default_value_t = false)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Line index to explain
    pub index: usize,

    /// Bypass the cached explanation and fetch a fresh one
    #[arg(long, default_value_t = false)]
    pub refresh: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Display layout; the choice is remembered
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Original and translation interleaved per line
    Pair,
    /// All originals, then all translations
    Split,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Split => "split",
        }
    }

    pub fn from_store(value: &str) -> Self {
        match value {
            "split" => Self::Split,
            _ => Self::Pair,
        }
    }
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Line index to edit
    pub index: usize,

    /// New original text
    #[arg(long)]
    pub orig: Option<String>,

    /// New translation text
    #[arg(long)]
    pub tran: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Line indices to delete
    pub indices: Vec<usize>,

    /// Delete every line
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyMode {
    Orig,
    Tran,
    Both,
}

#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Line indices to copy
    pub indices: Vec<usize>,

    /// Copy every line
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Which side of each line to print
    #[arg(long, value_enum, default_value_t = CopyMode::Both)]
    pub mode: CopyMode,
}

#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output CSV file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Copy lines into a new or overwritten named note
    Save {
        /// Note name
        name: String,

        /// Line indices to include
        indices: Vec<usize>,

        /// Include every line
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Append a note's lines to the end of the collection
    Load {
        /// Note name
        name: String,
    },

    /// Show saved notes
    List,

    /// Delete a note (the live collection is untouched)
    Delete {
        /// Note name
        name: String,
    },
}

#[derive(Parser, Debug)]
pub struct GlossaryArgs {
    #[command(subcommand)]
    pub action: GlossaryAction,
}

#[derive(Subcommand, Debug)]
pub enum GlossaryAction {
    /// Append a substitution rule
    Add {
        /// Source term
        src: String,

        /// Forced target term
        tgt: String,

        /// Match whole words only
        #[arg(long, default_value_t = false)]
        whole: bool,
    },

    /// Show the glossary in application order
    List,

    /// Remove the entry at an index
    Remove { index: usize },

    /// Remove every entry
    Clear,

    /// Append entries from a "source = target" file
    Import {
        /// Glossary file path
        file: PathBuf,

        /// Mark every imported entry whole-word
        #[arg(long, default_value_t = false)]
        whole: bool,
    },
}

#[derive(Parser, Debug)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub action: KeyAction,
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Save the API key
    Set {
        /// API key value
        key: String,
    },

    /// Show the saved key, masked
    Show,

    /// Round-trip a one-word translation to verify the key
    Test,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current settings
    Show,

    /// Get a setting value
    Get {
        /// Setting key (e.g., model, maxTokens)
        key: String,
    },

    /// Set a setting value
    Set {
        /// Setting key (e.g., model, maxTokens)
        key: String,
        /// Value to set
        value: String,
    },

    /// Restore every setting to its default
    Reset,

    /// Show the store file path
    Path,
}
