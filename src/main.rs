//! pianokeys - Inspect note conversions and piano key maps from the terminal.
//!
//! # Usage
//!
//! ```bash
//! pianokeys range C3 B4   # Print the key map for a range as JSON
//! pianokeys name 69       # Print the note for a MIDI number (A4)
//! pianokeys midi C#4      # Print the MIDI number for a note (61)
//! pianokeys key KeyQ      # Print the note bound to a physical key
//! pianokeys binds         # Print the whole key binding table
//! ```
//!
//! Set `RUST_LOG=pianokeys=debug` to see log output on stderr.

use anyhow::{bail, Context, Result};
use pianokeys::keyboard::{
    generate_note_map_from_range, key_bind, midi_to_note, note_to_midi, KEY_BINDS,
};

/// Subcommand selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print the key map between two notes.
    Range { start: String, end: String },
    /// Convert a MIDI number to a note string.
    Name { midi: i32 },
    /// Convert a note string to a MIDI number.
    Midi { note: String },
    /// Look up the note bound to a key code.
    Key { code: String },
    /// Print every key binding.
    Binds,
    /// Print usage and exit.
    Help,
}

/// Command-line options for the application.
struct CliOptions {
    command: Command,
}

impl CliOptions {
    /// Parses command-line arguments, skipping the program name.
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().skip(1).collect();
        let arg = |i: usize, what: &str| -> Result<String> {
            match args.get(i) {
                Some(value) => Ok(value.clone()),
                None => bail!("missing {} argument", what),
            }
        };

        let command = match args.first().map(String::as_str) {
            None | Some("--help") | Some("-h") | Some("help") => Command::Help,
            Some("range") => Command::Range {
                start: arg(1, "<START>")?,
                end: arg(2, "<END>")?,
            },
            Some("name") => {
                let raw = arg(1, "<MIDI>")?;
                let midi = raw
                    .parse::<i32>()
                    .with_context(|| format!("invalid MIDI number {:?}", raw))?;
                Command::Name { midi }
            }
            Some("midi") => Command::Midi {
                note: arg(1, "<NOTE>")?,
            },
            Some("key") => Command::Key {
                code: arg(1, "<CODE>")?,
            },
            Some("binds") => Command::Binds,
            Some(other) => bail!("unknown command {:?}, use --help for usage", other),
        };

        Ok(Self { command })
    }
}

fn print_help() {
    eprintln!("pianokeys - Virtual piano keyboard note utilities");
    eprintln!();
    eprintln!("Usage: pianokeys <COMMAND>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  range <START> <END>  Print the key map between two notes as JSON");
    eprintln!("  name <MIDI>          Print the note string for a MIDI number");
    eprintln!("  midi <NOTE>          Print the MIDI number for a note string");
    eprintln!("  key <CODE>           Print the note bound to a physical key code");
    eprintln!("  binds                Print the full key binding table");
    eprintln!("  -h, --help           Print this help message");
}

/// Runs a command, writing its result to stdout.
fn run(command: Command) -> Result<()> {
    match command {
        Command::Range { start, end } => {
            let range = generate_note_map_from_range(&start, &end)
                .with_context(|| format!("Failed to build key map for {}..{}", start, end))?;
            let json = serde_json::to_string_pretty(&range)?;
            println!("{}", json);
        }
        Command::Name { midi } => println!("{}", midi_to_note(midi)),
        Command::Midi { note } => {
            let midi = note_to_midi(&note).with_context(|| format!("Failed to convert {}", note))?;
            println!("{}", midi);
        }
        Command::Key { code } => match key_bind(&code) {
            Some(note) => println!("{}", note),
            None => bail!("key {:?} is not bound to a note", code),
        },
        Command::Binds => {
            for (code, note) in KEY_BINDS.iter() {
                println!("{:<14}{}", code, note);
            }
        }
        Command::Help => print_help(),
    }
    Ok(())
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse(std::env::args())?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Running {:?}", cli.command);
    run(cli.command)
}
