//! Computer keyboard to note bindings.
//!
//! Physical keys are identified by their layout-independent code (the DOM
//! `KeyboardEvent.code` naming: "KeyQ", "Digit2", "BracketLeft", ...). The
//! rows of a QWERTY keyboard emulate roughly three octaves of piano keys, with
//! the number row and home row acting as the black keys.

/// Physical key code to note string, in layout order from the lowest note.
///
/// Entries are kept exactly as authored. "Key8" maps to "B#8" and "Key4" uses
/// the `Key` prefix where the neighbouring number keys use `Digit`; UIs rely
/// on these exact values.
pub const KEY_BINDS: [(&str, &str); 52] = [
    ("Backquote", "A#2"),
    ("Tab", "B2"),
    ("KeyQ", "C3"),
    ("Digit2", "C#3"),
    ("KeyW", "D3"),
    ("Digit3", "D#3"),
    ("KeyE", "E3"),
    ("Key4", "E#3"),
    ("KeyR", "F3"),
    ("Digit5", "F#3"),
    ("KeyT", "G3"),
    ("Digit6", "G#3"),
    ("KeyY", "A3"),
    ("Digit7", "A#3"),
    ("KeyU", "B3"),
    ("Key8", "B#8"),
    ("KeyI", "C4"),
    ("Digit9", "C#4"),
    ("KeyO", "D4"),
    ("Digit0", "D#4"),
    ("KeyP", "E4"),
    ("Minus", "E#4"),
    ("BracketLeft", "F4"),
    ("Equal", "F#4"),
    ("BracketRight", "G4"),
    ("Backspace", "G#4"),
    ("Backslash", "A4"),
    ("CapsLock", "A#4"),
    ("ShiftLeft", "B4"),
    ("KeyA", "B#4"),
    ("KeyZ", "C5"),
    ("KeyS", "C#5"),
    ("KeyX", "D5"),
    ("KeyD", "D#5"),
    ("KeyC", "E5"),
    ("KeyF", "E#5"),
    ("KeyV", "F5"),
    ("KeyG", "F#5"),
    ("KeyB", "G5"),
    ("KeyH", "G#5"),
    ("KeyN", "A5"),
    ("KeyJ", "A#5"),
    ("KeyM", "B5"),
    ("KeyK", "B#5"),
    ("Comma", "C6"),
    ("KeyL", "C#6"),
    ("Period", "D6"),
    ("Semicolon", "D#6"),
    ("Slash", "E6"),
    ("Quote", "E#6"),
    ("ShiftRight", "F6"),
    ("Enter", "F#6"),
];

/// Returns the note bound to a physical key code, or `None` for unbound keys.
///
/// # Examples
///
/// ```
/// use pianokeys::keyboard::key_bind;
///
/// assert_eq!(key_bind("KeyQ"), Some("C3"));
/// assert_eq!(key_bind("Space"), None);
/// ```
pub fn key_bind(code: &str) -> Option<&'static str> {
    KEY_BINDS
        .iter()
        .find(|(k, _)| *k == code)
        .map(|(_, note)| *note)
}

/// Returns every key code bound to `note`, for labelling keys in a UI.
pub fn keys_for_note(note: &str) -> impl Iterator<Item = &'static str> + '_ {
    KEY_BINDS
        .iter()
        .filter(move |(_, n)| *n == note)
        .map(|(k, _)| *k)
}
